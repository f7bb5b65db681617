use linesketch_core::model::ModelError;
use linesketch_core::routing::RoutingError;

#[derive(thiserror::Error, Debug)]
pub enum EditorError {
    #[error("failed computing road geometry for edit: {source}")]
    RouteGeometryError {
        #[from]
        source: RoutingError,
    },
    #[error("endpoint index {index} out of range for {count} segments")]
    EndpointIndexError { index: usize, count: usize },
    #[error("segment index {index} out of range for {count} segments")]
    SegmentIndexError { index: usize, count: usize },
    #[error("invalid editor configuration: {0}")]
    ConfigurationError(String),
    #[error(transparent)]
    ModelError(#[from] ModelError),
}
