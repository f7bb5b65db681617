/// travel speed assumed for a segment when none has been chosen yet, in km/h
pub const DEFAULT_SEGMENT_SPEED: f64 = 10.0;

/// pads `speeds` by repeating its last entry (or `default` when empty) until
/// it holds one entry per segment. never truncates: a removal point trims
/// the array itself before calling this. idempotent once lengths agree, so
/// it is safe to apply after every structural edit regardless of ordering.
pub fn resync(mut speeds: Vec<f64>, segment_count: usize, default: f64) -> Vec<f64> {
    let fill = speeds.last().copied().unwrap_or(default);
    while speeds.len() < segment_count {
        speeds.push(fill);
    }
    speeds
}

/// the speed arrays owned by a modification: a reroute has exactly one,
/// while an added trip pattern has one per timetable, all edited in
/// lockstep. per-edit speed logic is written once against a single array
/// and applied here via [SegmentSpeeds::map_each].
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentSpeeds {
    Single(Vec<f64>),
    PerTimetable(Vec<Vec<f64>>),
}

impl SegmentSpeeds {
    /// applies `transform` to every speed array in this set
    pub fn map_each<F>(self, mut transform: F) -> SegmentSpeeds
    where
        F: FnMut(Vec<f64>) -> Vec<f64>,
    {
        match self {
            SegmentSpeeds::Single(speeds) => SegmentSpeeds::Single(transform(speeds)),
            SegmentSpeeds::PerTimetable(sets) => {
                SegmentSpeeds::PerTimetable(sets.into_iter().map(transform).collect())
            }
        }
    }

    /// restores the one-speed-per-segment invariant on every array
    pub fn resync(self, segment_count: usize, default: f64) -> SegmentSpeeds {
        self.map_each(|speeds| resync(speeds, segment_count, default))
    }

    pub(crate) fn variant_name(&self) -> &'static str {
        match self {
            SegmentSpeeds::Single(_) => "single-array",
            SegmentSpeeds::PerTimetable(_) => "per-timetable",
        }
    }
}
