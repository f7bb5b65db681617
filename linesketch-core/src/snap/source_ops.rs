//! loaders turning external stop datasets into snap candidates

use gtfs_structures::Gtfs;

use crate::snap::SnapStop;

#[derive(thiserror::Error, Debug)]
pub enum SnapError {
    #[error("failed to parse GTFS bundle: {0}")]
    BundleReadError(#[from] gtfs_structures::Error),
    #[error("failure reading stops file '{filename}': {source}")]
    StopsFileReadError {
        filename: String,
        source: csv::Error,
    },
}

/// collects snap candidates from every located stop of a GTFS bundle.
/// stops missing coordinates borrow their parent station's location when
/// one exists; otherwise they are skipped and counted in a warning.
pub fn stops_from_gtfs(bundle_file: &str) -> Result<Vec<SnapStop>, SnapError> {
    let gtfs = Gtfs::new(bundle_file)?;
    let mut candidates: Vec<SnapStop> = vec![];
    let mut unlocated = 0usize;
    for (stop_id, stop) in gtfs.stops.iter() {
        let location = match (stop.longitude, stop.latitude) {
            (Some(lon), Some(lat)) => Some((lon, lat)),
            _ => parent_location(stop, &gtfs),
        };
        match location {
            Some((stop_lon, stop_lat)) => candidates.push(SnapStop {
                stop_id: stop_id.clone(),
                stop_lat,
                stop_lon,
            }),
            None => unlocated += 1,
        }
    }
    if unlocated > 0 {
        log::warn!("skipped {unlocated} stops with no usable location in {bundle_file}");
    }
    Ok(candidates)
}

// one level of parent lookup only; a station referencing another station
// for its own location indicates a broken bundle
fn parent_location(stop: &gtfs_structures::Stop, gtfs: &Gtfs) -> Option<(f64, f64)> {
    let parent_id = stop.parent_station.as_ref()?;
    let parent = gtfs.stops.get(parent_id)?;
    match (parent.longitude, parent.latitude) {
        (Some(lon), Some(lat)) => Some((lon, lat)),
        _ => None,
    }
}

/// reads snap candidates from a bare `stops.txt`, ignoring any columns
/// beyond id and coordinates
pub fn stops_from_csv(stops_file: &str) -> Result<Vec<SnapStop>, SnapError> {
    let reader =
        csv::Reader::from_path(stops_file).map_err(|e| SnapError::StopsFileReadError {
            filename: stops_file.to_string(),
            source: e,
        })?;
    reader
        .into_deserialize::<SnapStop>()
        .map(|row| {
            row.map_err(|e| SnapError::StopsFileReadError {
                filename: stops_file.to_string(),
                source: e,
            })
        })
        .collect()
}
