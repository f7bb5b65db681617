//! checks and summaries over a whole segment sequence

use geo::{Coord, Rect};
use itertools::Itertools;

use crate::model::{ModelError, Segment, SegmentEnd};

/// adjacent segments share an endpoint coordinate up to this many degrees
const CONTINUITY_TOLERANCE: f64 = 1e-9;

/// verifies that every segment ends where its successor begins.
///
/// # Arguments
///
/// * `segments` - the full ordered sequence of a modification
///
/// # Returns
///
/// * the first discontinuous pair of segment indices, if any
pub fn check_continuity(segments: &[Segment]) -> Result<(), ModelError> {
    for ((i, previous), (j, next)) in segments.iter().enumerate().tuple_windows() {
        let end = previous.endpoint(SegmentEnd::End);
        let start = next.endpoint(SegmentEnd::Start);
        if (end.x - start.x).abs() > CONTINUITY_TOLERANCE
            || (end.y - start.y).abs() > CONTINUITY_TOLERANCE
        {
            return Err(ModelError::DiscontinuityError(i, j));
        }
    }
    Ok(())
}

/// axis-aligned bounds of the whole route, used to fit a map viewport when
/// an editing session opens. None when there is nothing to fit (no
/// segments, or only a transient single-point segment).
pub fn bounds_of(segments: &[Segment]) -> Option<Rect<f64>> {
    let mut coords = segments
        .iter()
        .filter(|segment| !segment.is_point())
        .flat_map(|segment| segment.geometry.coords());
    let first: Coord<f64> = coords.next()?;
    let (min, max) = coords.fold((first, first), |(min, max), coord| {
        (
            Coord {
                x: min.x.min(coord.x),
                y: min.y.min(coord.y),
            },
            Coord {
                x: max.x.max(coord.x),
                y: max.y.max(coord.y),
            },
        )
    });
    Some(Rect::new(min, max))
}
