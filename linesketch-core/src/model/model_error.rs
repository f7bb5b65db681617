#[derive(thiserror::Error, Debug)]
pub enum ModelError {
    #[error("segment geometry must be a GeoJSON Point or LineString, found {0}")]
    UnsupportedGeometryError(String),
    #[error("LineString geometry requires at least two positions, found {0}")]
    DegenerateLineStringError(usize),
    #[error("GeoJSON position requires at least two ordinates")]
    MalformedPositionError,
    #[error("segments {0} and {1} do not share an endpoint coordinate")]
    DiscontinuityError(usize, usize),
    #[error("cannot apply a {patch} speed patch to a {modification} modification")]
    SpeedVariantMismatchError {
        patch: &'static str,
        modification: &'static str,
    },
    #[error("modification has {timetables} timetables but patch carries {arrays} speed arrays")]
    TimetableCountMismatchError { timetables: usize, arrays: usize },
}
