use tracing::{debug, warn};

use super::drag::route_drag;
use super::snap::route_stick;
use super::{ConnectorRequest, Coordinate, DrawInfo};
use crate::scene::SceneView;

/// Fill `result` for one pointer position.
///
/// Seeds the frame from the two endpoints, runs the drag router, then the snap router
/// unless an area selection is in progress. Any connection left over from a previous
/// call is cleared first.
pub fn allocate(result: &mut DrawInfo, request: &ConnectorRequest, scene: &SceneView<'_>) {
    result.clear_connection();

    let start = request.start_point.sanitized();
    let end = request.end_point.sanitized();
    let padding = request.line_config.normalized().padding;

    result.x = start.x.min(end.x) - padding;
    result.y = start.y.min(end.y) - padding;
    result.width = (start.x - end.x).abs() + padding * 2.0;
    result.height = (start.y - end.y).abs() + padding * 2.0;

    let arrow = &mut result.line_info.arrow_info;
    arrow.left_top_point = Coordinate::new(result.width - padding * 2.0, 0.0);
    arrow.right_bottom_point = Coordinate::new(result.width, padding * 2.0);

    route_drag(result, request, scene);
    if !scene.is_area_selecting {
        route_stick(result, request, scene);
    }
}

/// Entry point for callers: reports questionable input, then routes.
pub fn compute_connector_geometry(
    result: &mut DrawInfo,
    request: &ConnectorRequest,
    scene: &SceneView<'_>,
) {
    if !request.start_point.is_finite() || !request.end_point.is_finite() {
        warn!(
            start = ?request.start_point,
            end = ?request.end_point,
            "non-finite connector endpoint replaced with 0"
        );
    }
    if !(scene.zoom.is_finite() && scene.zoom > 0.0) {
        warn!(zoom = scene.zoom, "invalid zoom, routing at 1.0");
    }
    if request.start_point == request.end_point {
        debug!(point = ?request.start_point, "coincident endpoints");
    }
    let node = &request.from_node.style_info;
    if node.width <= 0.0 || node.height <= 0.0 {
        debug!(node = %request.from_node.id, "source node has no area");
    }

    allocate(result, request, scene);
}
