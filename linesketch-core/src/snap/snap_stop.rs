use geo::{Coord, Point};
use serde::{Deserialize, Serialize};

/// a known transit stop that sketched endpoints can snap to. field names
/// match the GTFS `stops.txt` columns so rows deserialize directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapStop {
    pub stop_id: String,
    pub stop_lat: f64,
    pub stop_lon: f64,
}

impl SnapStop {
    pub fn coord(&self) -> Coord<f64> {
        Coord {
            x: self.stop_lon,
            y: self.stop_lat,
        }
    }

    pub fn point(&self) -> Point<f64> {
        Point::from(self.coord())
    }
}
