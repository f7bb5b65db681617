#[derive(thiserror::Error, Debug)]
pub enum RoutingError {
    #[error("road routing service unreachable: {0}")]
    ServiceError(String),
    #[error("no road path found between ({from_lon}, {from_lat}) and ({to_lon}, {to_lat})")]
    NoPathError {
        from_lon: f64,
        from_lat: f64,
        to_lon: f64,
        to_lat: f64,
    },
    #[error("failed to interpret routing service response: {0}")]
    ResponseFormatError(String),
}
