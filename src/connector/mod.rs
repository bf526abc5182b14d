//! Connector routing: Manhattan paths from a node edge to the pointer, with snapping
//! onto nearby node edges.

mod allocate;
mod arrow;
mod canvas;
mod drag;
mod frame;
mod snap;
mod sticky;
mod types;

pub use allocate::{allocate, compute_connector_geometry};
pub use arrow::{ArrowSpec, build_arrow, tip_hit_box};
pub use drag::route_drag;
pub use snap::route_stick;
pub use sticky::{
    StickyAnchor, StickyArea, contrary_position, line_sticky_position, node_sticky_area,
};
pub use types::{
    ArrowInfo, ConnectorRequest, Coordinate, DiagramNode, DrawInfo, Edge, LineInfo, NodeBox,
};

use crate::config::LineConfig;
use crate::scene::SceneView;

/// Request values after sanitising, with the source box in zoomed space.
#[derive(Debug, Clone, Copy)]
struct Prepared<'r> {
    start: Coordinate,
    end: Coordinate,
    config: LineConfig,
    from_id: &'r str,
    from_box: NodeBox,
    from_position: Edge,
    zoom: f32,
}

impl<'r> Prepared<'r> {
    fn new(request: &'r ConnectorRequest, scene: &SceneView<'_>) -> Self {
        let zoom = scene.effective_zoom();
        Self {
            start: request.start_point.sanitized(),
            end: request.end_point.sanitized(),
            config: request.line_config.normalized(),
            from_id: &request.from_node.id,
            from_box: request.from_node.style_info.scaled(zoom),
            from_position: request.from_position,
            zoom,
        }
    }
}

#[cfg(test)]
mod property_tests;
