use tracing::trace;

use super::canvas::{Route, commit_route};
use super::frame::{EdgeFrame, Uv};
use super::{ConnectorRequest, DrawInfo, Prepared};
use crate::scene::SceneView;

/// Route from the source anchor straight to the pointer, ignoring other nodes.
///
/// Pointers ahead of the origin edge get a single elbow. Pointers behind it get a stub
/// of `break_line_offset_node` out of the node, a detour past the nearer side at the
/// same clearance, and a final leg to the pointer.
pub fn route_drag(result: &mut DrawInfo, request: &ConnectorRequest, scene: &SceneView<'_>) {
    let prepared = Prepared::new(request, scene);
    let frame = EdgeFrame::for_edge(prepared.from_position);
    let route = drag_route(&prepared, &frame);
    let heading = route
        .last_heading(&frame)
        .unwrap_or(prepared.from_position);
    trace!(points = route.len(), ?heading, "drag route");
    commit_route(result, &frame, &route, heading, &prepared.config);
}

fn drag_route(prepared: &Prepared<'_>, frame: &EdgeFrame) -> Route {
    let s = frame.to_frame(prepared.start);
    let e = frame.to_frame(prepared.end);

    if e.u >= s.u {
        return Route::from_points(&[s, Uv::new(e.u, s.v), e]);
    }

    let source = frame.span(&prepared.from_box);
    let off = prepared.config.break_line_offset_node;
    let stub = s.u + off;
    let row = if e.v >= source.center_v() {
        source.v1 + off
    } else {
        source.v0 - off
    };
    Route::from_points(&[
        s,
        Uv::new(stub, s.v),
        Uv::new(stub, row),
        Uv::new(e.u, row),
        e,
    ])
}
