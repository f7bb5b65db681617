use std::sync::atomic::{AtomicU64, Ordering};

use geo::{Coord, LineString, Point};
use linesketch_core::model::{
    Modification, ModificationPatch, Segment, SegmentEnd, SegmentGeometry,
};
use linesketch_core::routing::{line_between, LineGeometrySource};
use linesketch_core::snap::{SnapStop, StopIndex};

use crate::editor::{speed_ops, EditorConfiguration, EditorError};

/// the stateful controller of an editing session. interprets discrete map
/// interactions against the current state of a modification and produces
/// complete replacement patches for its owner to apply.
///
/// the editor holds no route state of its own: every operation reads the
/// segment sequence fresh from the modification, so concurrent operations
/// race benignly (last write wins) instead of corrupting each other. each
/// operation captures an interaction generation before suspending; a
/// binding layer that wants stale async results dropped can test patches
/// with [TransitEditor::is_current] before applying them.
pub struct TransitEditor<S: LineGeometrySource> {
    configuration: EditorConfiguration,
    stops: StopIndex,
    line_source: S,
    generation: AtomicU64,
}

impl<S: LineGeometrySource> TransitEditor<S> {
    pub fn new(configuration: EditorConfiguration, stops: StopIndex, line_source: S) -> Self {
        Self {
            configuration,
            stops,
            line_source,
            generation: AtomicU64::new(0),
        }
    }

    pub fn configuration(&self) -> &EditorConfiguration {
        &self.configuration
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::Relaxed)
    }

    /// true unless a newer interaction began after this patch's edit
    /// started reading state
    pub fn is_current(&self, patch: &ModificationPatch) -> bool {
        patch.generation == self.current_generation()
    }

    fn begin_interaction(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// the clicked or dragged-to location, snapped onto a known stop when
    /// one is within tolerance at the current zoom
    fn resolve_snap(&self, point: Coord<f64>) -> (Coord<f64>, Option<String>) {
        match self.stops.nearest_within(point, self.configuration.zoom) {
            Some(SnapStop {
                stop_id,
                stop_lat,
                stop_lon,
            }) => (
                Coord {
                    x: *stop_lon,
                    y: *stop_lat,
                },
                Some(stop_id.clone()),
            ),
            None => (point, None),
        }
    }

    async fn route_line(
        &self,
        from: Coord<f64>,
        to: Coord<f64>,
    ) -> Result<LineString<f64>, EditorError> {
        line_between(from, to, self.configuration.follow_road, &self.line_source)
            .await
            .map_err(|e| {
                log::warn!("abandoning edit, road geometry lookup failed: {e}");
                EditorError::from(e)
            })
    }

    /// handles a click on open map space by extending the route toward the
    /// clicked point. an empty route gains a transient single-point
    /// segment; otherwise a new segment is appended to the end or
    /// prepended to the start per the session configuration, and any
    /// leftover single-point segment is dropped. returns None when
    /// extension is disabled.
    pub async fn click_map(
        &self,
        modification: &Modification,
        point: Coord<f64>,
    ) -> Result<Option<ModificationPatch>, EditorError> {
        if !self.configuration.allow_extend {
            return Ok(None);
        }
        let generation = self.begin_interaction();
        let segments = modification.segments();
        let (coordinates, stop_id) = self.resolve_snap(point);
        let extend_from_end = self.configuration.extend_from_end;
        let spacing = self.configuration.spacing;

        let mut new_segments: Vec<Segment>;
        if segments.is_empty() {
            new_segments = vec![Segment {
                geometry: SegmentGeometry::Point(Point::from(coordinates)),
                from_stop_id: stop_id.clone(),
                to_stop_id: stop_id,
                stop_at_start: true,
                stop_at_end: true,
                spacing,
            }];
        } else if extend_from_end {
            let last = &segments[segments.len() - 1];
            let geometry = self
                .route_line(last.endpoint(SegmentEnd::End), coordinates)
                .await?;
            new_segments = segments.to_vec();
            new_segments.push(Segment {
                geometry: SegmentGeometry::LineString(geometry),
                from_stop_id: last.to_stop_id.clone(),
                to_stop_id: stop_id,
                stop_at_start: last.stop_at_end,
                stop_at_end: true,
                spacing,
            });
            new_segments.retain(|segment| !segment.is_point());
        } else {
            let first = &segments[0];
            let geometry = self
                .route_line(coordinates, first.endpoint(SegmentEnd::Start))
                .await?;
            new_segments = segments.to_vec();
            new_segments.insert(
                0,
                Segment {
                    geometry: SegmentGeometry::LineString(geometry),
                    from_stop_id: stop_id,
                    to_stop_id: first.from_stop_id.clone(),
                    stop_at_start: true,
                    stop_at_end: first.stop_at_start,
                    spacing,
                },
            );
            new_segments.retain(|segment| !segment.is_point());
        }

        let segment_count = new_segments.len();
        let default = self.configuration.default_speed;
        let speeds = modification.speeds().map_each(|speeds| {
            if extend_from_end {
                speed_ops::extended(speeds, segment_count, default)
            } else {
                speed_ops::extended_from_start(speeds, segment_count, default)
            }
        });
        Ok(Some(ModificationPatch {
            segments: new_segments,
            speeds: Some(speeds),
            generation,
        }))
    }

    /// a click directly on a drawn segment inserts a stop there
    pub async fn click_segment(
        &self,
        modification: &Modification,
        index: usize,
        point: Coord<f64>,
    ) -> Result<ModificationPatch, EditorError> {
        self.insert_stop(modification, index, point).await
    }

    /// dragging an auto-created stop pins it down as a real stop, splitting
    /// the segment it was generated on
    pub async fn drag_auto_created_stop(
        &self,
        modification: &Modification,
        index: usize,
        point: Coord<f64>,
    ) -> Result<ModificationPatch, EditorError> {
        self.insert_stop(modification, index, point).await
    }

    /// splits segment `index` at the given position into two segments
    /// joined by a new stop (snapped when possible), re-routing both
    /// halves and duplicating the split segment's speed into each
    pub async fn insert_stop(
        &self,
        modification: &Modification,
        index: usize,
        point: Coord<f64>,
    ) -> Result<ModificationPatch, EditorError> {
        let generation = self.begin_interaction();
        let segments = modification.segments();
        let source = segments
            .get(index)
            .ok_or(EditorError::SegmentIndexError {
                index,
                count: segments.len(),
            })?;
        let (coordinates, stop_id) = self.resolve_snap(point);

        let first_half = self
            .route_line(source.endpoint(SegmentEnd::Start), coordinates)
            .await?;
        let second_half = self
            .route_line(coordinates, source.endpoint(SegmentEnd::End))
            .await?;

        let mut new_segments = Vec::with_capacity(segments.len() + 1);
        new_segments.extend_from_slice(&segments[..index]);
        new_segments.push(Segment {
            geometry: SegmentGeometry::LineString(first_half),
            from_stop_id: source.from_stop_id.clone(),
            to_stop_id: stop_id.clone(),
            stop_at_start: source.stop_at_start,
            stop_at_end: true,
            spacing: source.spacing,
        });
        new_segments.push(Segment {
            geometry: SegmentGeometry::LineString(second_half),
            from_stop_id: stop_id,
            to_stop_id: source.to_stop_id.clone(),
            stop_at_start: true,
            stop_at_end: source.stop_at_end,
            spacing: source.spacing,
        });
        new_segments.extend_from_slice(&segments[index + 1..]);

        let segment_count = new_segments.len();
        let default = self.configuration.default_speed;
        let speeds = modification
            .speeds()
            .map_each(|speeds| speed_ops::duplicated_at(speeds, index, segment_count, default));
        Ok(ModificationPatch {
            segments: new_segments,
            speeds: Some(speeds),
            generation,
        })
    }

    /// moves the stop at endpoint `index` to a new position, re-snapping
    /// its stop id references against the known stops
    pub async fn drag_stop(
        &self,
        modification: &Modification,
        index: usize,
        point: Coord<f64>,
    ) -> Result<ModificationPatch, EditorError> {
        let (coordinates, stop_id) = self.resolve_snap(point);
        self.reshape_endpoint(modification, index, coordinates, Some(stop_id))
            .await
    }

    /// moves the control point at endpoint `index`; control points never
    /// snap and carry no stop ids
    pub async fn drag_control_point(
        &self,
        modification: &Modification,
        index: usize,
        point: Coord<f64>,
    ) -> Result<ModificationPatch, EditorError> {
        self.reshape_endpoint(modification, index, point, None).await
    }

    /// recomputes the segment geometries meeting endpoint `index` so they
    /// join at a new position. array lengths never change here, so the
    /// patch carries no speed update. `snapped_stop_id` also rewrites the
    /// adjoining stop id references when present.
    async fn reshape_endpoint(
        &self,
        modification: &Modification,
        index: usize,
        coordinates: Coord<f64>,
        snapped_stop_id: Option<Option<String>>,
    ) -> Result<ModificationPatch, EditorError> {
        let generation = self.begin_interaction();
        let segments = modification.segments();
        if segments.is_empty() || index > segments.len() {
            return Err(EditorError::EndpointIndexError {
                index,
                count: segments.len(),
            });
        }
        let mut new_segments = segments.to_vec();
        if index > 0 {
            let previous = &segments[index - 1];
            let geometry = self
                .route_line(previous.endpoint(SegmentEnd::Start), coordinates)
                .await?;
            let updated = &mut new_segments[index - 1];
            updated.geometry = SegmentGeometry::LineString(geometry);
            if let Some(stop_id) = &snapped_stop_id {
                updated.to_stop_id = stop_id.clone();
            }
        }
        if index < segments.len() {
            // the next segment can still be a single point when only one
            // endpoint has been placed
            let next = &segments[index];
            let geometry = self
                .route_line(coordinates, next.endpoint(SegmentEnd::End))
                .await?;
            let updated = &mut new_segments[index];
            updated.geometry = SegmentGeometry::LineString(geometry);
            if let Some(stop_id) = &snapped_stop_id {
                updated.from_stop_id = stop_id.clone();
            }
        }
        Ok(ModificationPatch {
            segments: new_segments,
            speeds: None,
            generation,
        })
    }

    /// turns the stop at endpoint `index` into a control point, clearing
    /// the stop id references on the segment(s) sharing that endpoint
    pub fn make_control_point(
        &self,
        modification: &Modification,
        index: usize,
    ) -> Result<ModificationPatch, EditorError> {
        let generation = self.begin_interaction();
        let segments = modification.segments();
        if segments.is_empty() || index > segments.len() {
            return Err(EditorError::EndpointIndexError {
                index,
                count: segments.len(),
            });
        }
        let mut new_segments = segments.to_vec();
        if index < new_segments.len() {
            let segment = &mut new_segments[index];
            segment.stop_at_start = false;
            segment.from_stop_id = None;
        }
        if index > 0 {
            let segment = &mut new_segments[index - 1];
            segment.stop_at_end = false;
            segment.to_stop_id = None;
        }
        Ok(ModificationPatch {
            segments: new_segments,
            speeds: None,
            generation,
        })
    }

    /// turns the control point at endpoint `index` into a rider-visible
    /// stop. the endpoint keeps its position and gains no stop id; a later
    /// drag can snap it onto a known stop.
    pub fn make_stop(
        &self,
        modification: &Modification,
        index: usize,
    ) -> Result<ModificationPatch, EditorError> {
        let generation = self.begin_interaction();
        let segments = modification.segments();
        if segments.is_empty() || index > segments.len() {
            return Err(EditorError::EndpointIndexError {
                index,
                count: segments.len(),
            });
        }
        let mut new_segments = segments.to_vec();
        if index < new_segments.len() {
            new_segments[index].stop_at_start = true;
        }
        if index > 0 {
            new_segments[index - 1].stop_at_end = true;
        }
        Ok(ModificationPatch {
            segments: new_segments,
            speeds: None,
            generation,
        })
    }

    /// removes the stop or control point at endpoint `index`. deleting an
    /// interior endpoint merges the two adjacent segments into one
    /// spanning segment with freshly routed geometry; deleting either
    /// terminal endpoint drops the terminal segment. one patch carries the
    /// new segments and speeds together.
    pub async fn delete_point(
        &self,
        modification: &Modification,
        index: usize,
    ) -> Result<ModificationPatch, EditorError> {
        let generation = self.begin_interaction();
        let segments = modification.segments();
        if segments.is_empty() || index > segments.len() {
            return Err(EditorError::EndpointIndexError {
                index,
                count: segments.len(),
            });
        }
        let new_count = segments.len() - 1;
        let default = self.configuration.default_speed;

        if index == 0 {
            let new_segments = segments[1..].to_vec();
            let speeds = modification
                .speeds()
                .map_each(|speeds| speed_ops::without_first(speeds, new_count, default));
            return Ok(ModificationPatch {
                segments: new_segments,
                speeds: Some(speeds),
                generation,
            });
        }

        if index == segments.len() {
            let new_segments = segments[..new_count].to_vec();
            let speeds = modification
                .speeds()
                .map_each(|speeds| speed_ops::without_last(speeds, new_count, default));
            return Ok(ModificationPatch {
                segments: new_segments,
                speeds: Some(speeds),
                generation,
            });
        }

        let before = &segments[index - 1];
        let after = &segments[index];
        let geometry = self
            .route_line(
                before.endpoint(SegmentEnd::Start),
                after.endpoint(SegmentEnd::End),
            )
            .await?;
        let mut new_segments = Vec::with_capacity(new_count);
        new_segments.extend_from_slice(&segments[..index - 1]);
        new_segments.push(Segment {
            geometry: SegmentGeometry::LineString(geometry),
            from_stop_id: before.from_stop_id.clone(),
            to_stop_id: after.to_stop_id.clone(),
            stop_at_start: before.stop_at_start,
            stop_at_end: after.stop_at_end,
            spacing: before.spacing,
        });
        new_segments.extend_from_slice(&segments[index + 1..]);

        let speeds = modification
            .speeds()
            .map_each(|speeds| speed_ops::spliced_out(speeds, index, new_count, default));
        Ok(ModificationPatch {
            segments: new_segments,
            speeds: Some(speeds),
            generation,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use futures::executor::block_on;
    use linesketch_core::model::{segment_ops, SegmentSpeeds, DEFAULT_SEGMENT_SPEED};
    use linesketch_core::routing::{DirectLineSource, RoutingError};

    struct NoPathSource {}

    impl LineGeometrySource for NoPathSource {
        async fn line_string(
            &self,
            from: Coord<f64>,
            to: Coord<f64>,
        ) -> Result<LineString<f64>, RoutingError> {
            Err(RoutingError::NoPathError {
                from_lon: from.x,
                from_lat: from.y,
                to_lon: to.x,
                to_lat: to.y,
            })
        }
    }

    fn editor() -> TransitEditor<DirectLineSource> {
        editor_with(EditorConfiguration::default(), vec![])
    }

    fn editor_with(
        configuration: EditorConfiguration,
        stops: Vec<SnapStop>,
    ) -> TransitEditor<DirectLineSource> {
        TransitEditor::new(configuration, StopIndex::new(stops), DirectLineSource {})
    }

    fn reroute(segments: Vec<Segment>, speeds: Vec<f64>) -> Modification {
        Modification::Reroute {
            segments,
            segment_speeds: speeds,
        }
    }

    fn line_segment(from: (f64, f64), to: (f64, f64), from_stop: Option<&str>) -> Segment {
        Segment {
            geometry: SegmentGeometry::LineString(LineString::new(vec![
                Coord {
                    x: from.0,
                    y: from.1,
                },
                Coord { x: to.0, y: to.1 },
            ])),
            from_stop_id: from_stop.map(String::from),
            to_stop_id: None,
            stop_at_start: true,
            stop_at_end: true,
            spacing: 0.0,
        }
    }

    fn three_segment_route() -> Vec<Segment> {
        vec![
            line_segment((0.0, 0.0), (0.01, 0.0), None),
            line_segment((0.01, 0.0), (0.02, 0.0), None),
            line_segment((0.02, 0.0), (0.03, 0.0), None),
        ]
    }

    fn speeds_of(patch: &ModificationPatch) -> Vec<f64> {
        match patch.speeds.clone() {
            Some(SegmentSpeeds::Single(speeds)) => speeds,
            other => panic!("expected a single speed array, got {other:?}"),
        }
    }

    #[test]
    fn test_first_extension_places_a_point_segment() {
        let editor = editor();
        let modification = reroute(vec![], vec![]);
        let patch = block_on(editor.click_map(&modification, Coord { x: -122.4, y: 37.8 }))
            .expect("click failed")
            .expect("extension enabled");

        assert_eq!(patch.segments.len(), 1);
        let segment = &patch.segments[0];
        assert!(segment.is_point());
        assert_eq!(segment.endpoint(SegmentEnd::Start), Coord { x: -122.4, y: 37.8 });
        assert!(segment.stop_at_start && segment.stop_at_end);
        assert_eq!(segment.from_stop_id, None);
        assert_eq!(speeds_of(&patch), vec![DEFAULT_SEGMENT_SPEED]);
    }

    #[test]
    fn test_second_extension_replaces_the_point_segment() {
        let editor = editor();
        let mut modification = reroute(vec![], vec![]);
        let first = block_on(editor.click_map(&modification, Coord { x: -122.4, y: 37.8 }))
            .expect("click failed")
            .expect("extension enabled");
        modification.apply(first).expect("failed applying patch");

        let second = block_on(editor.click_map(&modification, Coord { x: -122.41, y: 37.81 }))
            .expect("click failed")
            .expect("extension enabled");

        assert_eq!(second.segments.len(), 1);
        assert!(second.segments.iter().all(|segment| !segment.is_point()));
        let segment = &second.segments[0];
        assert_eq!(segment.endpoint(SegmentEnd::Start), Coord { x: -122.4, y: 37.8 });
        assert_eq!(segment.endpoint(SegmentEnd::End), Coord { x: -122.41, y: 37.81 });
        assert_eq!(speeds_of(&second).len(), 1);
    }

    #[test]
    fn test_extension_from_start_prepends_and_duplicates_first_speed() {
        let configuration = EditorConfiguration {
            extend_from_end: false,
            ..Default::default()
        };
        let editor = editor_with(configuration, vec![]);
        let modification = reroute(
            vec![line_segment((0.0, 0.0), (0.01, 0.0), Some("feed:a"))],
            vec![17.0],
        );
        let patch = block_on(editor.click_map(&modification, Coord { x: -0.01, y: 0.0 }))
            .expect("click failed")
            .expect("extension enabled");

        assert_eq!(patch.segments.len(), 2);
        assert_eq!(
            patch.segments[0].endpoint(SegmentEnd::Start),
            Coord { x: -0.01, y: 0.0 }
        );
        // prepended segment links to the old first segment's snapped start
        assert_eq!(patch.segments[0].to_stop_id.as_deref(), Some("feed:a"));
        assert_eq!(speeds_of(&patch), vec![17.0, 17.0]);
        segment_ops::check_continuity(&patch.segments).expect("route must stay continuous");
    }

    #[test]
    fn test_click_map_respects_allow_extend() {
        let configuration = EditorConfiguration {
            allow_extend: false,
            ..Default::default()
        };
        let editor = editor_with(configuration, vec![]);
        let modification = reroute(vec![], vec![]);
        let patch = block_on(editor.click_map(&modification, Coord { x: 0.0, y: 0.0 }))
            .expect("click failed");
        assert!(patch.is_none());
    }

    #[test]
    fn test_click_snaps_to_nearby_stop() {
        let stop = SnapStop {
            stop_id: String::from("feed:1"),
            stop_lat: 37.8001,
            stop_lon: -122.4001,
        };
        let editor = editor_with(EditorConfiguration::default(), vec![stop]);
        let modification = reroute(vec![], vec![]);
        let patch = block_on(editor.click_map(&modification, Coord { x: -122.4, y: 37.8 }))
            .expect("click failed")
            .expect("extension enabled");

        let segment = &patch.segments[0];
        assert_eq!(segment.from_stop_id.as_deref(), Some("feed:1"));
        assert_eq!(
            segment.endpoint(SegmentEnd::Start),
            Coord {
                x: -122.4001,
                y: 37.8001
            }
        );
    }

    #[test]
    fn test_insert_stop_splits_segment_and_duplicates_speed() {
        let editor = editor();
        let modification = reroute(three_segment_route(), vec![5.0, 6.0, 7.0]);
        let patch = block_on(editor.insert_stop(&modification, 1, Coord { x: 0.015, y: 0.001 }))
            .expect("insert failed");

        assert_eq!(patch.segments.len(), 4);
        assert_eq!(
            patch.segments[1].endpoint(SegmentEnd::End),
            Coord { x: 0.015, y: 0.001 }
        );
        assert_eq!(
            patch.segments[2].endpoint(SegmentEnd::Start),
            Coord { x: 0.015, y: 0.001 }
        );
        assert!(patch.segments[1].stop_at_end && patch.segments[2].stop_at_start);
        assert_eq!(speeds_of(&patch), vec![5.0, 6.0, 6.0, 7.0]);
        segment_ops::check_continuity(&patch.segments).expect("route must stay continuous");
    }

    #[test]
    fn test_insert_stop_rejects_bad_segment_index() {
        let editor = editor();
        let modification = reroute(three_segment_route(), vec![5.0, 6.0, 7.0]);
        let result = block_on(editor.insert_stop(&modification, 3, Coord { x: 0.0, y: 0.0 }));
        assert!(matches!(
            result,
            Err(EditorError::SegmentIndexError { index: 3, count: 3 })
        ));
    }

    #[test]
    fn test_drag_stop_reshapes_both_neighbors() {
        let editor = editor();
        let modification = reroute(three_segment_route(), vec![5.0, 6.0, 7.0]);
        let target = Coord { x: 0.012, y: 0.002 };
        let patch =
            block_on(editor.drag_stop(&modification, 1, target)).expect("drag failed");

        assert_eq!(patch.segments.len(), 3);
        assert_eq!(patch.segments[0].endpoint(SegmentEnd::End), target);
        assert_eq!(patch.segments[1].endpoint(SegmentEnd::Start), target);
        // untouched segment keeps its geometry
        assert_eq!(
            patch.segments[2].endpoint(SegmentEnd::Start),
            Coord { x: 0.02, y: 0.0 }
        );
        assert!(patch.speeds.is_none());
    }

    #[test]
    fn test_drag_first_and_last_endpoints_touch_one_segment() {
        let editor = editor();
        let modification = reroute(three_segment_route(), vec![5.0, 6.0, 7.0]);

        let start_patch = block_on(editor.drag_stop(
            &modification,
            0,
            Coord { x: -0.005, y: 0.0 },
        ))
        .expect("drag failed");
        assert_eq!(
            start_patch.segments[0].endpoint(SegmentEnd::Start),
            Coord { x: -0.005, y: 0.0 }
        );

        let end_patch = block_on(editor.drag_stop(
            &modification,
            3,
            Coord { x: 0.035, y: 0.0 },
        ))
        .expect("drag failed");
        assert_eq!(
            end_patch.segments[2].endpoint(SegmentEnd::End),
            Coord { x: 0.035, y: 0.0 }
        );
    }

    #[test]
    fn test_toggle_stop_to_control_point_clears_ids() {
        let editor = editor();
        let mut segments = three_segment_route();
        segments[0].to_stop_id = Some(String::from("feed:mid"));
        segments[1].from_stop_id = Some(String::from("feed:mid"));
        let modification = reroute(segments, vec![5.0, 6.0, 7.0]);

        let patch = editor
            .make_control_point(&modification, 1)
            .expect("toggle failed");
        assert!(!patch.segments[0].stop_at_end);
        assert!(!patch.segments[1].stop_at_start);
        assert_eq!(patch.segments[0].to_stop_id, None);
        assert_eq!(patch.segments[1].from_stop_id, None);
        assert!(patch.speeds.is_none());
    }

    #[test]
    fn test_toggle_control_point_to_stop() {
        let editor = editor();
        let mut segments = three_segment_route();
        segments[0].stop_at_end = false;
        segments[1].stop_at_start = false;
        let modification = reroute(segments, vec![5.0, 6.0, 7.0]);

        let patch = editor.make_stop(&modification, 1).expect("toggle failed");
        assert!(patch.segments[0].stop_at_end);
        assert!(patch.segments[1].stop_at_start);
        // a promoted control point has no snapped id until dragged
        assert_eq!(patch.segments[1].from_stop_id, None);
    }

    #[test]
    fn test_interior_deletion_merges_segments() {
        let editor = editor();
        let modification = reroute(three_segment_route(), vec![5.0, 6.0, 7.0]);
        let patch = block_on(editor.delete_point(&modification, 1)).expect("delete failed");

        assert_eq!(patch.segments.len(), 2);
        assert_eq!(
            patch.segments[0].endpoint(SegmentEnd::Start),
            Coord { x: 0.0, y: 0.0 }
        );
        assert_eq!(
            patch.segments[0].endpoint(SegmentEnd::End),
            Coord { x: 0.02, y: 0.0 }
        );
        assert_eq!(speeds_of(&patch), vec![5.0, 7.0]);
        segment_ops::check_continuity(&patch.segments).expect("route must stay continuous");
    }

    #[test]
    fn test_delete_first_endpoint_trims_leading_speed() {
        let editor = editor();
        let modification = reroute(three_segment_route(), vec![5.0, 6.0, 7.0]);
        let patch = block_on(editor.delete_point(&modification, 0)).expect("delete failed");

        assert_eq!(patch.segments.len(), 2);
        assert_eq!(
            patch.segments[0].endpoint(SegmentEnd::Start),
            Coord { x: 0.01, y: 0.0 }
        );
        assert_eq!(speeds_of(&patch), vec![6.0, 7.0]);
    }

    #[test]
    fn test_delete_last_endpoint_trims_trailing_speed() {
        let editor = editor();
        let modification = reroute(three_segment_route(), vec![5.0, 6.0, 7.0]);
        let patch = block_on(editor.delete_point(&modification, 3)).expect("delete failed");

        assert_eq!(patch.segments.len(), 2);
        assert_eq!(speeds_of(&patch), vec![5.0, 6.0]);
    }

    #[test]
    fn test_delete_last_endpoint_resyncs_short_speed_arrays() {
        let editor = editor();
        let modification = reroute(three_segment_route(), vec![5.0]);
        let patch = block_on(editor.delete_point(&modification, 3)).expect("delete failed");
        assert_eq!(speeds_of(&patch), vec![5.0, 5.0]);
    }

    #[test]
    fn test_deleting_the_only_endpoint_pair_empties_the_route() {
        let editor = editor();
        let modification = reroute(
            vec![line_segment((0.0, 0.0), (0.01, 0.0), None)],
            vec![5.0],
        );
        let patch = block_on(editor.delete_point(&modification, 0)).expect("delete failed");
        assert!(patch.segments.is_empty());
        assert!(speeds_of(&patch).is_empty());
    }

    #[test]
    fn test_timetable_speed_arrays_edited_in_lockstep() {
        let editor = editor();
        let modification = Modification::AddTripPattern {
            segments: three_segment_route(),
            timetables: vec![
                timetable("am", vec![5.0, 6.0, 7.0]),
                timetable("pm", vec![8.0, 9.0, 10.0]),
            ],
        };
        let patch = block_on(editor.delete_point(&modification, 1)).expect("delete failed");
        assert_eq!(
            patch.speeds,
            Some(SegmentSpeeds::PerTimetable(vec![
                vec![5.0, 7.0],
                vec![8.0, 10.0]
            ]))
        );
    }

    fn timetable(name: &str, segment_speeds: Vec<f64>) -> linesketch_core::model::Timetable {
        linesketch_core::model::Timetable {
            name: String::from(name),
            headway_secs: 600,
            start_time: chrono_time(6),
            end_time: chrono_time(22),
            exact_times: false,
            segment_speeds,
        }
    }

    fn chrono_time(hour: u32) -> chrono::NaiveTime {
        chrono::NaiveTime::from_hms_opt(hour, 0, 0).expect("valid test time")
    }

    #[test]
    fn test_length_invariant_holds_across_an_edit_sequence() {
        let editor = editor();
        let mut modification = reroute(vec![], vec![]);
        let clicks = [
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 0.01, y: 0.0 },
            Coord { x: 0.02, y: 0.01 },
            Coord { x: 0.03, y: 0.01 },
        ];
        for click in clicks {
            let patch = block_on(editor.click_map(&modification, click))
                .expect("click failed")
                .expect("extension enabled");
            modification.apply(patch).expect("failed applying patch");
            assert_speeds_match(&modification);
        }

        let split = block_on(editor.insert_stop(&modification, 1, Coord { x: 0.015, y: 0.0 }))
            .expect("insert failed");
        modification.apply(split).expect("failed applying patch");
        assert_speeds_match(&modification);

        let merge = block_on(editor.delete_point(&modification, 2)).expect("delete failed");
        modification.apply(merge).expect("failed applying patch");
        assert_speeds_match(&modification);

        let trim = block_on(editor.delete_point(&modification, 0)).expect("delete failed");
        modification.apply(trim).expect("failed applying patch");
        assert_speeds_match(&modification);

        segment_ops::check_continuity(modification.segments())
            .expect("route must stay continuous");
    }

    fn assert_speeds_match(modification: &Modification) {
        let count = modification.segments().len();
        match modification.speeds() {
            SegmentSpeeds::Single(speeds) => assert_eq!(speeds.len(), count),
            SegmentSpeeds::PerTimetable(sets) => {
                for set in sets {
                    assert_eq!(set.len(), count);
                }
            }
        }
    }

    #[test]
    fn test_routing_failure_abandons_the_interaction() {
        let configuration = EditorConfiguration {
            follow_road: true,
            ..Default::default()
        };
        let editor = TransitEditor::new(configuration, StopIndex::new(vec![]), NoPathSource {});
        let modification = reroute(three_segment_route(), vec![5.0, 6.0, 7.0]);
        let result = block_on(editor.delete_point(&modification, 1));
        assert!(matches!(
            result,
            Err(EditorError::RouteGeometryError { .. })
        ));
    }

    #[test]
    fn test_stale_patches_are_detectable() {
        let editor = editor();
        let modification = reroute(three_segment_route(), vec![5.0, 6.0, 7.0]);
        let stale = block_on(editor.drag_control_point(&modification, 1, Coord { x: 0.012, y: 0.001 }))
            .expect("drag failed");
        let fresh = block_on(editor.drag_control_point(&modification, 1, Coord { x: 0.013, y: 0.002 }))
            .expect("drag failed");
        assert!(!editor.is_current(&stale));
        assert!(editor.is_current(&fresh));
    }
}
