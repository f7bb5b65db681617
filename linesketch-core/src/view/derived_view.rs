use geo::LineString;
use serde_json::{Map, Value};

use crate::model::{Segment, SegmentGeometry};
use crate::view::{control_points_of, stops_of, ControlPoint, RouteStop};

/// everything a map layer needs to render a sketched route: polylines for
/// the drawn segments (transient single-point segments are filtered out),
/// draggable control points, and stop markers
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView {
    pub segment_features: Vec<LineString<f64>>,
    pub control_points: Vec<ControlPoint>,
    pub stops: Vec<RouteStop>,
}

impl DerivedView {
    pub fn from_segments(segments: &[Segment]) -> Self {
        let segment_features = segments
            .iter()
            .filter_map(|segment| match &segment.geometry {
                SegmentGeometry::Point(_) => None,
                SegmentGeometry::LineString(line) => Some(line.clone()),
            })
            .collect();
        Self {
            segment_features,
            control_points: control_points_of(segments),
            stops: stops_of(segments),
        }
    }

    /// renders the view as a GeoJSON feature collection, with a `kind`
    /// property distinguishing segment, stop, and control point features
    pub fn to_feature_collection(&self) -> geojson::FeatureCollection {
        let mut features = vec![];
        for (index, line) in self.segment_features.iter().enumerate() {
            let mut properties = Map::new();
            properties.insert(String::from("kind"), Value::from("segment"));
            properties.insert(String::from("index"), Value::from(index));
            features.push(feature(geojson::Value::from(line), properties));
        }
        for stop in &self.stops {
            let mut properties = Map::new();
            properties.insert(String::from("kind"), Value::from("stop"));
            properties.insert(String::from("index"), Value::from(stop.index));
            properties.insert(String::from("autoCreated"), Value::from(stop.auto_created));
            properties.insert(
                String::from("distanceFromStart"),
                Value::from(stop.distance_from_start),
            );
            if let Some(stop_id) = &stop.stop_id {
                properties.insert(String::from("stopId"), Value::from(stop_id.as_str()));
            }
            features.push(feature(
                geojson::Value::Point(vec![stop.position.x, stop.position.y]),
                properties,
            ));
        }
        for control_point in &self.control_points {
            let mut properties = Map::new();
            properties.insert(String::from("kind"), Value::from("control-point"));
            properties.insert(String::from("index"), Value::from(control_point.index));
            features.push(feature(
                geojson::Value::Point(vec![
                    control_point.position.x,
                    control_point.position.y,
                ]),
                properties,
            ));
        }
        geojson::FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}

fn feature(value: geojson::Value, properties: Map<String, Value>) -> geojson::Feature {
    geojson::Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// caches the most recent view so repeated renders of an unchanged route
/// skip recomputation
#[derive(Debug, Default)]
pub struct DerivedViewCache {
    cached: Option<(Vec<Segment>, DerivedView)>,
    recomputations: usize,
}

impl DerivedViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&mut self, segments: &[Segment]) -> &DerivedView {
        let fresh = matches!(&self.cached, Some((inputs, _)) if inputs.as_slice() == segments);
        if !fresh {
            self.recomputations += 1;
            self.cached = Some((segments.to_vec(), DerivedView::from_segments(segments)));
        }
        match &self.cached {
            Some((_, view)) => view,
            // populated just above whenever it was empty or stale
            None => unreachable!(),
        }
    }

    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}
