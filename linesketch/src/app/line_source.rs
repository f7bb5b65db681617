use geo::{Coord, LineString};
use linesketch_core::routing::{
    DirectLineSource, LineGeometrySource, OsrmLineSource, RoutingError,
};

use crate::editor::EditorConfiguration;

/// the line sources the command line app can wire into an editor,
/// dispatching behind one type so the editor stays generic
pub enum AppLineSource {
    Direct(DirectLineSource),
    Osrm(OsrmLineSource),
}

impl AppLineSource {
    pub fn from_configuration(configuration: &EditorConfiguration) -> Self {
        if configuration.follow_road {
            match &configuration.osrm_url {
                Some(url) => return AppLineSource::Osrm(OsrmLineSource::new(url, "driving")),
                None => {
                    log::warn!("follow_road is set but no osrm_url is configured, drawing direct lines");
                }
            }
        }
        AppLineSource::Direct(DirectLineSource {})
    }
}

impl LineGeometrySource for AppLineSource {
    async fn line_string(
        &self,
        from: Coord<f64>,
        to: Coord<f64>,
    ) -> Result<LineString<f64>, RoutingError> {
        match self {
            AppLineSource::Direct(source) => source.line_string(from, to).await,
            AppLineSource::Osrm(source) => source.line_string(from, to).await,
        }
    }
}
