use geo::{Coord, LineString};
use serde::Deserialize;

use crate::model::line_string_from_positions;
use crate::routing::{LineGeometrySource, RoutingError};

/// road-following line source backed by an OSRM `route` endpoint,
/// requesting full-resolution GeoJSON geometry
#[derive(Debug, Clone)]
pub struct OsrmLineSource {
    base_url: String,
    profile: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Deserialize)]
struct OsrmRoute {
    geometry: geojson::Geometry,
}

impl OsrmLineSource {
    pub fn new(base_url: &str, profile: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            profile: profile.to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn route_url(&self, from: Coord<f64>, to: Coord<f64>) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}?overview=full&geometries=geojson",
            self.base_url, self.profile, from.x, from.y, to.x, to.y
        )
    }
}

impl LineGeometrySource for OsrmLineSource {
    async fn line_string(
        &self,
        from: Coord<f64>,
        to: Coord<f64>,
    ) -> Result<LineString<f64>, RoutingError> {
        let url = self.route_url(from, to);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RoutingError::ServiceError(format!("request to {url} failed: {e}")))?;
        let body: OsrmResponse = response
            .json()
            .await
            .map_err(|e| RoutingError::ResponseFormatError(format!("{e}")))?;
        if body.code != "Ok" {
            return Err(RoutingError::NoPathError {
                from_lon: from.x,
                from_lat: from.y,
                to_lon: to.x,
                to_lat: to.y,
            });
        }
        let route = body.routes.first().ok_or(RoutingError::NoPathError {
            from_lon: from.x,
            from_lat: from.y,
            to_lon: to.x,
            to_lat: to.y,
        })?;
        match &route.geometry.value {
            geojson::Value::LineString(positions) => line_string_from_positions(positions)
                .map_err(|e| RoutingError::ResponseFormatError(format!("{e}"))),
            _ => Err(RoutingError::ResponseFormatError(String::from(
                "route geometry is not a LineString",
            ))),
        }
    }
}
