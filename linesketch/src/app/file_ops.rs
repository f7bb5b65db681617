//! file input and output for the command line editor

use linesketch_core::model::Modification;
use linesketch_core::snap::{source_ops, SnapStop};

use crate::app::AppError;

pub fn read_modification(filename: &str) -> Result<Modification, AppError> {
    let raw = std::fs::read_to_string(filename).map_err(|e| AppError::FileReadError {
        filename: filename.to_string(),
        message: format!("{e}"),
    })?;
    serde_json::from_str(&raw).map_err(|e| AppError::FileReadError {
        filename: filename.to_string(),
        message: format!("{e}"),
    })
}

pub fn write_modification(filename: &str, modification: &Modification) -> Result<(), AppError> {
    let encoded =
        serde_json::to_string_pretty(modification).map_err(|e| AppError::FileWriteError {
            filename: filename.to_string(),
            message: format!("{e}"),
        })?;
    std::fs::write(filename, encoded).map_err(|e| AppError::FileWriteError {
        filename: filename.to_string(),
        message: format!("{e}"),
    })
}

/// snap candidates from a GTFS bundle (.zip) or a bare stops.txt
pub fn load_snap_stops(stops_file: Option<&String>) -> Result<Vec<SnapStop>, AppError> {
    let stops = match stops_file {
        None => vec![],
        Some(f) if f.ends_with(".zip") => source_ops::stops_from_gtfs(f)?,
        Some(f) => source_ops::stops_from_csv(f)?,
    };
    if !stops.is_empty() {
        log::info!("loaded {} snap candidate stops", stops.len());
    }
    Ok(stops)
}
