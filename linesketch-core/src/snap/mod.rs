mod snap_stop;
mod stop_index;

pub mod source_ops;

pub use snap_stop::SnapStop;
pub use source_ops::SnapError;
pub use stop_index::{snap_tolerance_meters, StopIndex, MINIMUM_SNAP_STOP_ZOOM_LEVEL};
