use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// one service period of an added trip pattern. only the speed array
/// participates in route editing; the remaining fields ride along so
/// records loaded from disk are written back whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timetable {
    pub name: String,
    #[serde(default)]
    pub headway_secs: u32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub exact_times: bool,
    pub segment_speeds: Vec<f64>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_timetable_round_trips() {
        let raw = r#"{
            "name": "Weekday",
            "headwaySecs": 600,
            "startTime": "06:00:00",
            "endTime": "22:30:00",
            "segmentSpeeds": [15.0, 20.0]
        }"#;
        let timetable: Timetable =
            serde_json::from_str(raw).expect("failed to deserialize timetable");
        assert_eq!(timetable.headway_secs, 600);
        assert_eq!(timetable.segment_speeds, vec![15.0, 20.0]);
        assert!(!timetable.exact_times);
        let encoded = serde_json::to_string(&timetable).expect("failed to serialize timetable");
        assert!(encoded.contains("\"segmentSpeeds\""));
    }
}
