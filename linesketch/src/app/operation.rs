//! editing operations exposed on the command line. each operation loads
//! the modification fresh, runs one editor interaction, applies the
//! resulting patch, and writes the record back, mirroring how a map
//! binding would drive the editor one event at a time.

use clap::{Subcommand, ValueEnum};
use geo::{Coord, Point};
use linesketch_core::model::{segment_ops, Modification, ModificationPatch};
use linesketch_core::snap::StopIndex;
use linesketch_core::view::DerivedView;
use serde::{Deserialize, Serialize};
use wkt::ToWkt;

use crate::app::{file_ops, AppLineSource, EditorApp};
use crate::editor::{EditorConfiguration, TransitEditor};

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum EditorOperation {
    /// extend the route with a map click at the given location
    Extend {
        #[arg(long)]
        lon: f64,
        #[arg(long)]
        lat: f64,
    },
    /// split a segment at the given location, inserting a new stop
    InsertStop {
        /// index of the segment to split
        #[arg(long)]
        segment: usize,
        #[arg(long)]
        lon: f64,
        #[arg(long)]
        lat: f64,
    },
    /// move the stop at an endpoint index, re-snapping to known stops
    MoveStop {
        #[arg(long)]
        index: usize,
        #[arg(long)]
        lon: f64,
        #[arg(long)]
        lat: f64,
    },
    /// move the control point at an endpoint index
    MovePoint {
        #[arg(long)]
        index: usize,
        #[arg(long)]
        lon: f64,
        #[arg(long)]
        lat: f64,
    },
    /// promote the control point at an endpoint index to a stop
    MakeStop {
        #[arg(long)]
        index: usize,
    },
    /// demote the stop at an endpoint index to a control point
    MakeControlPoint {
        #[arg(long)]
        index: usize,
    },
    /// delete the stop or control point at an endpoint index
    DeletePoint {
        #[arg(long)]
        index: usize,
    },
    /// print the renderable view of the route
    View {
        #[arg(long, value_enum, default_value_t = ViewFormat::Geojson)]
        format: ViewFormat,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, ValueEnum)]
pub enum ViewFormat {
    Geojson,
    Wkt,
}

impl EditorOperation {
    pub fn run(&self, app: &EditorApp) {
        let configuration = match &app.configuration_file {
            None => EditorConfiguration::default(),
            Some(f) => {
                EditorConfiguration::try_from(f).expect("failed reading editor configuration")
            }
        };
        let mut modification = file_ops::read_modification(&app.modification_file)
            .unwrap_or_else(|e| panic!("failed reading {}: {e}", app.modification_file));
        if let Err(e) = segment_ops::check_continuity(modification.segments()) {
            log::warn!("modification segments are discontinuous: {e}");
        }

        if let EditorOperation::View { format } = self {
            print_view(&modification, format);
            return;
        }

        let stops = file_ops::load_snap_stops(app.stops_file.as_ref())
            .expect("failed loading snap candidate stops");
        let line_source = AppLineSource::from_configuration(&configuration);
        let editor = TransitEditor::new(configuration, StopIndex::new(stops), line_source);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("failed creating async runtime for editor operations");

        let patch: Option<ModificationPatch> = match self {
            EditorOperation::Extend { lon, lat } => runtime
                .block_on(editor.click_map(&modification, Coord { x: *lon, y: *lat }))
                .expect("map click failed"),
            EditorOperation::InsertStop { segment, lon, lat } => Some(
                runtime
                    .block_on(editor.insert_stop(
                        &modification,
                        *segment,
                        Coord { x: *lon, y: *lat },
                    ))
                    .expect("stop insertion failed"),
            ),
            EditorOperation::MoveStop { index, lon, lat } => Some(
                runtime
                    .block_on(editor.drag_stop(&modification, *index, Coord { x: *lon, y: *lat }))
                    .expect("stop move failed"),
            ),
            EditorOperation::MovePoint { index, lon, lat } => Some(
                runtime
                    .block_on(editor.drag_control_point(
                        &modification,
                        *index,
                        Coord { x: *lon, y: *lat },
                    ))
                    .expect("control point move failed"),
            ),
            EditorOperation::MakeStop { index } => Some(
                editor
                    .make_stop(&modification, *index)
                    .expect("stop promotion failed"),
            ),
            EditorOperation::MakeControlPoint { index } => Some(
                editor
                    .make_control_point(&modification, *index)
                    .expect("stop demotion failed"),
            ),
            EditorOperation::DeletePoint { index } => Some(
                runtime
                    .block_on(editor.delete_point(&modification, *index))
                    .expect("deletion failed"),
            ),
            EditorOperation::View { .. } => return,
        };

        match patch {
            None => log::info!("route extension is disabled, nothing to do"),
            Some(patch) => {
                modification.apply(patch).expect("failed applying edit");
                file_ops::write_modification(&app.modification_file, &modification)
                    .unwrap_or_else(|e| panic!("failed writing {}: {e}", app.modification_file));
                log::info!(
                    "wrote {} segments to {}",
                    modification.segments().len(),
                    app.modification_file
                );
            }
        }
    }
}

fn print_view(modification: &Modification, format: &ViewFormat) {
    let segments = modification.segments();
    if let Some(bounds) = segment_ops::bounds_of(segments) {
        log::info!(
            "route bounds ({}, {}) to ({}, {})",
            bounds.min().x,
            bounds.min().y,
            bounds.max().x,
            bounds.max().y
        );
    }
    let view = DerivedView::from_segments(segments);
    match format {
        ViewFormat::Geojson => {
            let collection = view.to_feature_collection();
            println!(
                "{}",
                serde_json::to_string_pretty(&collection).expect("failed encoding view")
            );
        }
        ViewFormat::Wkt => {
            for line in &view.segment_features {
                println!("{}", line.to_wkt());
            }
            for stop in &view.stops {
                println!("{}", Point::from(stop.position).to_wkt());
            }
        }
    }
}
