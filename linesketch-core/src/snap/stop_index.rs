use geo::{Coord, Distance, Haversine, Point};
use rstar::primitives::GeomWithData;
use rstar::RTree;

use crate::snap::SnapStop;

/// below this zoom level clicks never snap to stops
pub const MINIMUM_SNAP_STOP_ZOOM_LEVEL: u32 = 12;

/// snap tolerance in meters for a map zoom level. tolerance shrinks
/// exponentially as the map zooms in, tracking the on-screen size of a
/// fixed pixel radius.
pub fn snap_tolerance_meters(zoom: u32) -> f64 {
    10_000.0 * (-0.27 * zoom as f64).exp()
}

/// spatial index over snap candidate stops
pub struct StopIndex {
    stops: Vec<SnapStop>,
    tree: RTree<GeomWithData<[f64; 2], usize>>,
}

impl StopIndex {
    pub fn new(stops: Vec<SnapStop>) -> Self {
        let entries = stops
            .iter()
            .enumerate()
            .map(|(i, stop)| GeomWithData::new([stop.stop_lon, stop.stop_lat], i))
            .collect();
        let tree = RTree::bulk_load(entries);
        Self { stops, tree }
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// the nearest stop within snap tolerance of `point`, or None when the
    /// map is zoomed out past [MINIMUM_SNAP_STOP_ZOOM_LEVEL] or no stop is
    /// close enough
    pub fn nearest_within(&self, point: Coord<f64>, zoom: u32) -> Option<&SnapStop> {
        if zoom < MINIMUM_SNAP_STOP_ZOOM_LEVEL {
            return None;
        }
        let nearest = self.tree.nearest_neighbor(&[point.x, point.y])?;
        let stop = &self.stops[nearest.data];
        let distance = Haversine.distance(Point::from(point), stop.point());
        if distance <= snap_tolerance_meters(zoom) {
            Some(stop)
        } else {
            None
        }
    }
}
