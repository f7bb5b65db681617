//! per-edit transforms over a single speed array. each structural edit
//! pairs one of these with [linesketch_core::model::resync] so the
//! one-speed-per-segment invariant is restored no matter how far out of
//! sync the incoming array was.

use linesketch_core::model::resync;

/// the route grew by a segment at its end
pub fn extended(speeds: Vec<f64>, segment_count: usize, default: f64) -> Vec<f64> {
    resync(speeds, segment_count, default)
}

/// the route grew by a segment at its start: the new first segment takes
/// on the speed of the previous first segment
pub fn extended_from_start(mut speeds: Vec<f64>, segment_count: usize, default: f64) -> Vec<f64> {
    let first = speeds.first().copied().unwrap_or(default);
    speeds.insert(0, first);
    resync(speeds, segment_count, default)
}

/// segment `index` split in two: both halves travel at its speed
pub fn duplicated_at(
    mut speeds: Vec<f64>,
    index: usize,
    segment_count: usize,
    default: f64,
) -> Vec<f64> {
    if speeds.len() > index {
        let duplicate = speeds[index];
        speeds.insert(index + 1, duplicate);
    }
    resync(speeds, segment_count, default)
}

/// the first segment was deleted
pub fn without_first(mut speeds: Vec<f64>, segment_count: usize, default: f64) -> Vec<f64> {
    if !speeds.is_empty() {
        speeds.remove(0);
    }
    resync(speeds, segment_count, default)
}

/// the last segment was deleted. trimming only applies when the array was
/// tracking the segment count; an already-short array is left for resync.
pub fn without_last(mut speeds: Vec<f64>, segment_count: usize, default: f64) -> Vec<f64> {
    speeds.truncate(segment_count);
    resync(speeds, segment_count, default)
}

/// two segments merged into one spanning segment: the speed entry at the
/// removed junction goes away
pub fn spliced_out(
    mut speeds: Vec<f64>,
    index: usize,
    segment_count: usize,
    default: f64,
) -> Vec<f64> {
    if speeds.len() > index {
        speeds.remove(index);
    }
    resync(speeds, segment_count, default)
}
