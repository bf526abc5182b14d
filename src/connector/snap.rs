use tracing::{debug, trace};

use super::canvas::{Route, commit_route};
use super::frame::{EdgeFrame, Heading, Span, Uv};
use super::sticky::{line_sticky_position, node_sticky_area};
use super::{ConnectorRequest, Coordinate, DrawInfo, Edge, NodeBox, Prepared};
use crate::scene::SceneView;

/// Re-route onto another node's edge when the pointer sits in one of its sticky bands.
///
/// Candidates are tried in scene order and the source node is skipped. The first
/// candidate with any sticky position ends the search, even if no route can be built
/// for it; in that case the drag result stays as it was.
pub fn route_stick(result: &mut DrawInfo, request: &ConnectorRequest, scene: &SceneView<'_>) {
    if scene.is_area_selecting {
        return;
    }
    let prepared = Prepared::new(request, scene);

    for node in scene.nodes {
        if node.id == prepared.from_id {
            continue;
        }
        let target = node.style_info.scaled(prepared.zoom);
        let area = node_sticky_area(&target, prepared.start);
        let Some(heading) =
            line_sticky_position(prepared.end, &area, prepared.config.sticky_tolerance)
        else {
            continue;
        };

        let anchor = area.anchor_for(heading).point();
        match snap_route(&prepared, &target, anchor, heading) {
            Some((frame, route)) => {
                commit_route(result, &frame, &route, heading, &prepared.config);
                result.is_connected_node = true;
                result.connected_node_id = Some(node.id.clone());
                result.connected_position = Some(heading.contrary());
                trace!(node = %node.id, ?heading, points = route.len(), "snapped");
            }
            None => {
                debug!(node = %node.id, ?heading, "sticky match rejected, keeping drag route");
            }
        }
        break;
    }
}

/// Route from the source anchor to `anchor`, arriving while travelling `heading`.
///
/// Returns `None` for a zero-length connection or non-finite geometry.
fn snap_route(
    prepared: &Prepared<'_>,
    target: &NodeBox,
    anchor: Coordinate,
    heading: Edge,
) -> Option<(EdgeFrame, Route)> {
    if anchor == prepared.start {
        return None;
    }

    let mut frame = EdgeFrame::for_edge(prepared.from_position);
    let mut approach = frame.heading(heading);
    if approach == Heading::NegV {
        frame = frame.mirrored_v();
        approach = Heading::PosV;
    }

    let s = frame.to_frame(prepared.start);
    let t = frame.to_frame(anchor);
    let source = frame.span(&prepared.from_box);
    let dest = frame.span(target);
    let off = prepared.config.break_line_offset_node;

    let route = match approach {
        Heading::PosU => facing_route(s, t, &source, &dest, off),
        Heading::NegU => same_side_route(s, t, &source, &dest, off),
        Heading::PosV | Heading::NegV => lateral_route(s, t, &source, &dest, off),
    };
    route.is_finite().then_some((frame, route))
}

/// Signed separation of `[a0, a1]` and `[b0, b1]`; zero or less means they overlap.
fn gap(a0: f32, a1: f32, b0: f32, b1: f32) -> f32 {
    (b0 - a1).max(a0 - b1)
}

fn gap_mid(a0: f32, a1: f32, b0: f32, b1: f32) -> f32 {
    if b0 >= a1 {
        (a1 + b0) / 2.0
    } else {
        (b1 + a0) / 2.0
    }
}

/// Column or row between `near` and `far` (`near < far`), `off` from `near` when the
/// gap allows it and in the middle otherwise.
fn clearance(near: f32, far: f32, off: f32) -> f32 {
    (near + off).min((near + far) / 2.0)
}

/// Target edge faces the source (arrival travelling `+u`).
fn facing_route(s: Uv, t: Uv, source: &Span, dest: &Span, off: f32) -> Route {
    let s0 = s.u + off;
    let t0 = t.u - off;
    let g = gap(source.v0, source.v1, dest.v0, dest.v1);
    if t0 >= s0 || (g <= 0.0 && t.u > s.u) {
        // room in front of the target: one column between the two faces
        let m = (s.u + t.u) / 2.0;
        return Route::from_points(&[s, Uv::new(m, s.v), Uv::new(m, t.v), t]);
    }

    trace!(gap = g, "facing route doubles back");
    if g > 0.0 {
        let c = gap_mid(source.v0, source.v1, dest.v0, dest.v1);
        return Route::from_points(&[
            s,
            Uv::new(s0, s.v),
            Uv::new(s0, c),
            Uv::new(t0, c),
            Uv::new(t0, t.v),
            t,
        ]);
    }

    let below = t.v >= s.v;
    if dest.u1 < source.u0 {
        // target behind the source: clear each node at its own row, stepping between
        // them in the channel that separates them
        let (w1, w2) = if below {
            (source.v1 + off, dest.v1 + off)
        } else {
            (source.v0 - off, dest.v0 - off)
        };
        let x = (dest.u1 + source.u0) / 2.0;
        return Route::from_points(&[
            s,
            Uv::new(s0, s.v),
            Uv::new(s0, w1),
            Uv::new(x, w1),
            Uv::new(x, w2),
            Uv::new(t0, w2),
            Uv::new(t0, t.v),
            t,
        ]);
    }

    // nodes overlap: go past both far faces and around the outside
    let ks = source.u1.max(dest.u1).max(s.u) + off;
    let kt = source.u0.min(dest.u0).min(t.u) - off;
    let w = if below {
        source.v1.max(dest.v1) + off
    } else {
        source.v0.min(dest.v0) - off
    };
    Route::from_points(&[
        s,
        Uv::new(ks, s.v),
        Uv::new(ks, w),
        Uv::new(kt, w),
        Uv::new(kt, t.v),
        t,
    ])
}

/// Target edge faces the same way as the origin edge (arrival travelling `-u`).
fn same_side_route(s: Uv, t: Uv, source: &Span, dest: &Span, off: f32) -> Route {
    let k = s.u.max(t.u).max(source.u1).max(dest.u1) + off;
    let g = gap(source.v0, source.v1, dest.v0, dest.v1);
    if g > 0.0 {
        return Route::from_points(&[s, Uv::new(k, s.v), Uv::new(k, t.v), t]);
    }

    trace!(gap = g, "same-side route clears the target");
    if dest.u0 > s.u {
        // target ahead: leave between the nodes, pass its nearer side, come back round
        let e = clearance(s.u, dest.u0, off);
        let above = dest.v0 - off;
        let below = dest.v1 + off;
        let w = if s.v - above <= below - s.v { above } else { below };
        return Route::from_points(&[
            s,
            Uv::new(e, s.v),
            Uv::new(e, w),
            Uv::new(k, w),
            Uv::new(k, t.v),
            t,
        ]);
    }

    let s0 = s.u + off;
    let w = if t.v >= s.v {
        source.v1 + off
    } else {
        source.v0 - off
    };
    if dest.u1 < source.u0 {
        // target behind: pass the source and drop into the channel behind it
        let x = clearance(dest.u1, source.u0, off);
        return Route::from_points(&[
            s,
            Uv::new(s0, s.v),
            Uv::new(s0, w),
            Uv::new(x, w),
            Uv::new(x, t.v),
            t,
        ]);
    }

    // nodes overlap: approach from just outside the target face
    let w = if t.v >= s.v {
        source.v1.max(dest.v1) + off
    } else {
        source.v0.min(dest.v0) - off
    };
    let x = t.u + off;
    Route::from_points(&[
        s,
        Uv::new(s0, s.v),
        Uv::new(s0, w),
        Uv::new(x, w),
        Uv::new(x, t.v),
        t,
    ])
}

/// Target edge is perpendicular to the origin edge (arrival travelling `+v`).
fn lateral_route(s: Uv, t: Uv, source: &Span, dest: &Span, off: f32) -> Route {
    let s0 = s.u + off;
    let t0 = t.v - off;
    if t.u >= s0 && s.v <= t0 {
        return Route::from_points(&[s, Uv::new(t.u, s.v), t]);
    }

    let g = gap(source.u0, source.u1, dest.u0, dest.u1);
    trace!(gap = g, "lateral route needs a detour");
    if g > 0.0 && dest.u0 >= source.u1 {
        // channel between the nodes
        let c = (source.u1 + dest.u0) / 2.0;
        Route::from_points(&[s, Uv::new(c, s.v), Uv::new(c, t0), Uv::new(t.u, t0), t])
    } else if g > 0.0 {
        // target behind the source: pass over the source's near side
        let w = t0.min(source.v0 - off);
        Route::from_points(&[s, Uv::new(s0, s.v), Uv::new(s0, w), Uv::new(t.u, w), t])
    } else if dest.v0 > source.v1 {
        // target below the source: cross between them, `off` above the target if it fits
        let r = clearance(source.v1, dest.v0, off).max(t0);
        Route::from_points(&[s, Uv::new(s0, s.v), Uv::new(s0, r), Uv::new(t.u, r), t])
    } else {
        // target sits over the source: clear both far faces first
        let k = source.u1.max(dest.u1).max(s.u) + off;
        let w = t0.min(source.v0 - off);
        Route::from_points(&[s, Uv::new(k, s.v), Uv::new(k, w), Uv::new(t.u, w), t])
    }
}
