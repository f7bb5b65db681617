use linesketch_core::model::DEFAULT_SEGMENT_SPEED;
use serde::{Deserialize, Serialize};

use crate::editor::EditorError;

/// defines behaviors of an editing session
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct EditorConfiguration {
    /// clicks on open map space extend the route
    pub allow_extend: bool,
    /// extend from the route's end rather than its start
    pub extend_from_end: bool,
    /// fetch road-following geometry instead of drawing direct lines
    pub follow_road: bool,
    /// auto-created stop spacing in meters stamped onto new segments, 0 to disable
    pub spacing: f64,
    /// speed in km/h used when a growing speed array has no entry to repeat
    pub default_speed: f64,
    /// current map zoom level, gates snapping to known stops
    pub zoom: u32,
    /// base url of an OSRM service used when following roads
    pub osrm_url: Option<String>,
}

impl Default for EditorConfiguration {
    fn default() -> Self {
        Self {
            allow_extend: true,
            extend_from_end: true,
            follow_road: false,
            spacing: 400.0,
            default_speed: DEFAULT_SEGMENT_SPEED,
            zoom: 14,
            osrm_url: None,
        }
    }
}

impl TryFrom<&String> for EditorConfiguration {
    type Error = EditorError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        if f.ends_with(".toml") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                EditorError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            toml::from_str(&s).map_err(|e| {
                EditorError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })
        } else if f.ends_with(".json") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                EditorError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            serde_json::from_str(&s).map_err(|e| {
                EditorError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })
        } else {
            Err(EditorError::ConfigurationError(format!(
                "unsupported file type: {f}"
            )))
        }
    }
}
