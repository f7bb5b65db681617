mod app_error;
mod editor_app;
mod line_source;
mod operation;

pub mod file_ops;

pub use app_error::AppError;
pub use editor_app::EditorApp;
pub use line_source::AppLineSource;
pub use operation::{EditorOperation, ViewFormat};
