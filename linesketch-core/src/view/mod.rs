mod derived_view;
mod route_points;

pub use derived_view::{DerivedView, DerivedViewCache};
pub use route_points::{
    control_points_of, segment_length_meters, stops_of, ControlPoint, RouteStop,
};
