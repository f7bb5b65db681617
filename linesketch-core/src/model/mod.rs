mod model_error;
mod modification;
mod segment;
mod speeds;
mod timetable;

pub mod segment_ops;

pub use model_error::ModelError;
pub use modification::{Modification, ModificationPatch};
pub use segment::{Segment, SegmentEnd, SegmentGeometry};
pub(crate) use segment::line_string_from_positions;
pub use speeds::{resync, SegmentSpeeds, DEFAULT_SEGMENT_SPEED};
pub use timetable::Timetable;
