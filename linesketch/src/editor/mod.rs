mod configuration;
mod editor_error;
mod transit_editor;

pub mod speed_ops;

pub use configuration::EditorConfiguration;
pub use editor_error::EditorError;
pub use transit_editor::TransitEditor;
