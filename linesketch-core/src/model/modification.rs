use serde::{Deserialize, Serialize};

use crate::model::{ModelError, Segment, SegmentSpeeds, Timetable};

/// a transit network modification owning a segment sequence and its speed
/// arrays. the editor never keeps its own copy of this state: every edit
/// reads the current record, computes a full replacement, and hands back a
/// [ModificationPatch] for the owner to apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Modification {
    #[serde(rename = "add-trip-pattern", rename_all = "camelCase")]
    AddTripPattern {
        segments: Vec<Segment>,
        timetables: Vec<Timetable>,
    },
    #[serde(rename = "reroute", rename_all = "camelCase")]
    Reroute {
        segments: Vec<Segment>,
        segment_speeds: Vec<f64>,
    },
}

impl Modification {
    pub fn segments(&self) -> &[Segment] {
        match self {
            Modification::AddTripPattern { segments, .. } => segments,
            Modification::Reroute { segments, .. } => segments,
        }
    }

    /// copies out this modification's speed arrays in editable form
    pub fn speeds(&self) -> SegmentSpeeds {
        match self {
            Modification::AddTripPattern { timetables, .. } => SegmentSpeeds::PerTimetable(
                timetables
                    .iter()
                    .map(|timetable| timetable.segment_speeds.clone())
                    .collect(),
            ),
            Modification::Reroute { segment_speeds, .. } => {
                SegmentSpeeds::Single(segment_speeds.clone())
            }
        }
    }

    fn variant_name(&self) -> &'static str {
        match self {
            Modification::AddTripPattern { .. } => "add-trip-pattern",
            Modification::Reroute { .. } => "reroute",
        }
    }

    /// replaces this modification's segments, and speed arrays when the
    /// patch carries them. a patch built from one modification shape cannot
    /// be applied to the other.
    pub fn apply(&mut self, patch: ModificationPatch) -> Result<(), ModelError> {
        let ModificationPatch {
            segments: new_segments,
            speeds,
            ..
        } = patch;
        match (self, speeds) {
            (Modification::AddTripPattern { segments, .. }, None) => *segments = new_segments,
            (Modification::Reroute { segments, .. }, None) => *segments = new_segments,
            (
                Modification::AddTripPattern {
                    segments,
                    timetables,
                },
                Some(SegmentSpeeds::PerTimetable(sets)),
            ) => {
                if sets.len() != timetables.len() {
                    return Err(ModelError::TimetableCountMismatchError {
                        timetables: timetables.len(),
                        arrays: sets.len(),
                    });
                }
                *segments = new_segments;
                for (timetable, set) in timetables.iter_mut().zip(sets) {
                    timetable.segment_speeds = set;
                }
            }
            (
                Modification::Reroute {
                    segments,
                    segment_speeds,
                },
                Some(SegmentSpeeds::Single(set)),
            ) => {
                *segments = new_segments;
                *segment_speeds = set;
            }
            (modification, Some(speeds)) => {
                return Err(ModelError::SpeedVariantMismatchError {
                    patch: speeds.variant_name(),
                    modification: modification.variant_name(),
                })
            }
        }
        Ok(())
    }
}

/// a complete replacement for the editable fields of a modification,
/// produced by exactly one completed editor interaction. `generation` is
/// the interaction counter captured when the edit began reading state; a
/// binding layer can use it to discard results that resolved after a newer
/// interaction started.
#[derive(Debug, Clone, PartialEq)]
pub struct ModificationPatch {
    pub segments: Vec<Segment>,
    pub speeds: Option<SegmentSpeeds>,
    pub generation: u64,
}
