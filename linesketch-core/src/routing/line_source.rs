use geo::{Coord, LineString};

use crate::routing::RoutingError;

/// a service producing road-following line geometry between two
/// coordinates. implementations may suspend on network I/O and may fail
/// when no road path exists; callers decide whether to fall back to a
/// direct line or abandon the edit.
#[allow(async_fn_in_trait)]
pub trait LineGeometrySource {
    async fn line_string(
        &self,
        from: Coord<f64>,
        to: Coord<f64>,
    ) -> Result<LineString<f64>, RoutingError>;
}

/// straight two-point geometry, used when road following is disabled and
/// as an offline stand-in for a routing service
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectLineSource {}

impl LineGeometrySource for DirectLineSource {
    async fn line_string(
        &self,
        from: Coord<f64>,
        to: Coord<f64>,
    ) -> Result<LineString<f64>, RoutingError> {
        Ok(direct_line(from, to))
    }
}

pub fn direct_line(from: Coord<f64>, to: Coord<f64>) -> LineString<f64> {
    LineString::new(vec![from, to])
}

/// line geometry connecting `from` to `to`. with `follow_road` this
/// delegates to `source` and surfaces its errors; otherwise it returns a
/// direct line without suspending. every structural edit that reshapes a
/// segment passes through here, so this is the latency-sensitive seam of
/// the editor.
pub async fn line_between<S: LineGeometrySource>(
    from: Coord<f64>,
    to: Coord<f64>,
    follow_road: bool,
    source: &S,
) -> Result<LineString<f64>, RoutingError> {
    if follow_road {
        source.line_string(from, to).await
    } else {
        Ok(direct_line(from, to))
    }
}
