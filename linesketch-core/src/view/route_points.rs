//! derived point entities along a segment sequence. neither stops nor
//! control points are stored on the modification; both are recomputed from
//! segment boundary flags whenever the route changes.

use geo::{Coord, Distance, Haversine, Length, Point};

use crate::model::{Segment, SegmentEnd, SegmentGeometry};

/// a free waypoint shaping the route with no boarding. `index` is the
/// endpoint index shared with [RouteStop] entries, 0 through segment count.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPoint {
    pub index: usize,
    pub position: Coord<f64>,
}

/// a boarding-capable point along the route. endpoint stops carry their
/// endpoint index; auto-created stops carry the index of the segment they
/// lie on, which is the segment a drag of that stop splits.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStop {
    pub index: usize,
    pub position: Coord<f64>,
    pub stop_id: Option<String>,
    pub auto_created: bool,
    pub distance_from_start: f64,
}

/// scans segment boundaries for endpoints that are not rider-visible
/// stops. interior junctions are checked through each segment's start; the
/// final endpoint of the sequence is checked separately.
pub fn control_points_of(segments: &[Segment]) -> Vec<ControlPoint> {
    let mut control_points = vec![];
    for (i, segment) in segments.iter().enumerate() {
        if !segment.stop_at_start {
            control_points.push(ControlPoint {
                index: i,
                position: segment.endpoint(SegmentEnd::Start),
            });
        }
        if i == segments.len() - 1 && !segment.stop_at_end {
            control_points.push(ControlPoint {
                index: i + 1,
                position: segment.endpoint(SegmentEnd::End),
            });
        }
    }
    control_points
}

/// the stops riders see along the sequence: real stops at flagged
/// endpoints plus auto-created stops every `spacing` meters along each
/// segment's geometry
pub fn stops_of(segments: &[Segment]) -> Vec<RouteStop> {
    let mut stops = vec![];
    let mut distance_from_start = 0.0;
    for (i, segment) in segments.iter().enumerate() {
        if segment.stop_at_start {
            stops.push(RouteStop {
                index: i,
                position: segment.endpoint(SegmentEnd::Start),
                stop_id: segment.from_stop_id.clone(),
                auto_created: false,
                distance_from_start,
            });
        }
        let segment_length = segment_length_meters(segment);
        if segment.spacing > 0.0 && segment_length > segment.spacing {
            append_auto_stops(&mut stops, i, segment, distance_from_start, segment_length);
        }
        distance_from_start += segment_length;
    }
    if let Some(last) = segments.last() {
        if last.stop_at_end {
            stops.push(RouteStop {
                index: segments.len(),
                position: last.endpoint(SegmentEnd::End),
                stop_id: last.to_stop_id.clone(),
                auto_created: false,
                distance_from_start,
            });
        }
    }
    stops
}

pub fn segment_length_meters(segment: &Segment) -> f64 {
    match &segment.geometry {
        SegmentGeometry::Point(_) => 0.0,
        SegmentGeometry::LineString(line) => Haversine.length(line),
    }
}

fn append_auto_stops(
    stops: &mut Vec<RouteStop>,
    segment_index: usize,
    segment: &Segment,
    base_distance: f64,
    segment_length: f64,
) {
    let coords = segment.geometry.coords();
    let spacing = segment.spacing;
    let mut mark = spacing;
    let mut traversed = 0.0;
    for pair in coords.windows(2) {
        let pair_length = Haversine.distance(Point::from(pair[0]), Point::from(pair[1]));
        if pair_length <= 0.0 {
            continue;
        }
        while mark < traversed + pair_length && mark < segment_length {
            let t = (mark - traversed) / pair_length;
            stops.push(RouteStop {
                index: segment_index,
                position: Coord {
                    x: pair[0].x + (pair[1].x - pair[0].x) * t,
                    y: pair[0].y + (pair[1].y - pair[0].y) * t,
                },
                stop_id: None,
                auto_created: true,
                distance_from_start: base_distance + mark,
            });
            mark += spacing;
        }
        traversed += pair_length;
    }
}
