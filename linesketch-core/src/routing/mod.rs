mod line_source;
mod osrm;
mod routing_error;

pub use line_source::{direct_line, line_between, DirectLineSource, LineGeometrySource};
pub use osrm::OsrmLineSource;
pub use routing_error::RoutingError;
