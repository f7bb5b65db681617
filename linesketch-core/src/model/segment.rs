use geo::{Coord, LineString, Point};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::model::ModelError;

/// selects one end of a segment's directed geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentEnd {
    Start,
    End,
}

/// geometry for one piece of a sketched route. a route that consists of a
/// single placed endpoint holds a transient [SegmentGeometry::Point]; every
/// other segment carries a directed [SegmentGeometry::LineString].
///
/// serialized as a GeoJSON geometry object so modification records written
/// by other tooling round-trip unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentGeometry {
    Point(Point<f64>),
    LineString(LineString<f64>),
}

impl SegmentGeometry {
    /// the coordinates of this geometry in order. a Point yields one entry.
    pub fn coords(&self) -> Vec<Coord<f64>> {
        match self {
            SegmentGeometry::Point(point) => vec![point.0],
            SegmentGeometry::LineString(line) => line.0.clone(),
        }
    }
}

impl Serialize for SegmentGeometry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = match self {
            SegmentGeometry::Point(point) => geojson::Value::from(point),
            SegmentGeometry::LineString(line) => geojson::Value::from(line),
        };
        geojson::Geometry::new(value).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SegmentGeometry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let geometry = geojson::Geometry::deserialize(deserializer)?;
        SegmentGeometry::try_from(&geometry).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<&geojson::Geometry> for SegmentGeometry {
    type Error = ModelError;

    fn try_from(geometry: &geojson::Geometry) -> Result<Self, ModelError> {
        match &geometry.value {
            geojson::Value::Point(position) => {
                Ok(SegmentGeometry::Point(Point::from(coord_from_position(
                    position,
                )?)))
            }
            geojson::Value::LineString(positions) => Ok(SegmentGeometry::LineString(
                line_string_from_positions(positions)?,
            )),
            other => Err(ModelError::UnsupportedGeometryError(
                geometry_type_name(other).to_string(),
            )),
        }
    }
}

/// one directed piece of route geometry between two endpoints. an endpoint
/// is either a rider-visible stop (`stop_at_start`/`stop_at_end` true,
/// optionally snapped to a known stop id) or a free control point shaping
/// the path. `spacing` is the auto-created stop spacing hint in meters,
/// where zero disables intermediate stops on this segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub geometry: SegmentGeometry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_stop_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_stop_id: Option<String>,
    pub stop_at_start: bool,
    pub stop_at_end: bool,
    #[serde(default)]
    pub spacing: f64,
}

impl Segment {
    /// coordinate at one end of this segment, treating Point and LineString
    /// geometries uniformly
    pub fn endpoint(&self, end: SegmentEnd) -> Coord<f64> {
        match &self.geometry {
            SegmentGeometry::Point(point) => point.0,
            SegmentGeometry::LineString(line) => match end {
                SegmentEnd::Start => line.0[0],
                SegmentEnd::End => line.0[line.0.len() - 1],
            },
        }
    }

    /// true while this segment is the transient single-coordinate form
    pub fn is_point(&self) -> bool {
        matches!(self.geometry, SegmentGeometry::Point(_))
    }
}

pub(crate) fn coord_from_position(position: &[f64]) -> Result<Coord<f64>, ModelError> {
    match (position.first(), position.get(1)) {
        (Some(x), Some(y)) => Ok(Coord { x: *x, y: *y }),
        _ => Err(ModelError::MalformedPositionError),
    }
}

pub(crate) fn line_string_from_positions(
    positions: &[Vec<f64>],
) -> Result<LineString<f64>, ModelError> {
    if positions.len() < 2 {
        return Err(ModelError::DegenerateLineStringError(positions.len()));
    }
    let coords = positions
        .iter()
        .map(|position| coord_from_position(position))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(LineString::new(coords))
}

fn geometry_type_name(value: &geojson::Value) -> &'static str {
    match value {
        geojson::Value::Point(_) => "Point",
        geojson::Value::MultiPoint(_) => "MultiPoint",
        geojson::Value::LineString(_) => "LineString",
        geojson::Value::MultiLineString(_) => "MultiLineString",
        geojson::Value::Polygon(_) => "Polygon",
        geojson::Value::MultiPolygon(_) => "MultiPolygon",
        geojson::Value::GeometryCollection(_) => "GeometryCollection",
    }
}
