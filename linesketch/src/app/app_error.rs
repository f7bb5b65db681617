use linesketch_core::model::ModelError;
use linesketch_core::snap::SnapError;

use crate::editor::EditorError;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("failure reading '{filename}': {message}")]
    FileReadError { filename: String, message: String },
    #[error("failure writing '{filename}': {message}")]
    FileWriteError { filename: String, message: String },
    #[error(transparent)]
    EditorError(#[from] EditorError),
    #[error(transparent)]
    SnapError(#[from] SnapError),
    #[error(transparent)]
    ModelError(#[from] ModelError),
}
