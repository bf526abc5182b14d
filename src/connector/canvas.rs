//! Path assembly and the global → local canvas conversion shared by both routers.

use super::arrow::{ArrowSpec, build_arrow, tip_hit_box};
use super::frame::{EdgeFrame, Uv};
use super::types::{Coordinate, DrawInfo, Edge};
use crate::config::LineConfig;

/// Longest route any branch produces.
pub const MAX_ROUTE_POINTS: usize = 8;

/// Fixed-capacity polyline in an edge frame.
///
/// Consecutive duplicates are dropped on push, and a point that lies on the line
/// through its neighbours is removed. Axis-aligned routes therefore always turn at
/// every interior vertex: no zero-length segments, no straight-through vertices and
/// no 180° fold-backs.
#[derive(Debug, Clone, Copy)]
pub struct Route {
    points: [Uv; MAX_ROUTE_POINTS],
    len: usize,
}

impl Route {
    pub fn new() -> Self {
        Self {
            points: [Uv::new(0.0, 0.0); MAX_ROUTE_POINTS],
            len: 0,
        }
    }

    pub fn from_points(points: &[Uv]) -> Self {
        let mut route = Self::new();
        for &p in points {
            route.push(p);
        }
        route
    }

    pub fn push(&mut self, p: Uv) {
        if self.len > 0 && self.points[self.len - 1] == p {
            return;
        }
        if self.len >= 2 {
            let a = self.points[self.len - 2];
            let b = self.points[self.len - 1];
            if (a.u == b.u && b.u == p.u) || (a.v == b.v && b.v == p.v) {
                self.len -= 1;
                if a != p {
                    self.points[self.len] = p;
                    self.len += 1;
                }
                return;
            }
        }
        debug_assert!(self.len < MAX_ROUTE_POINTS, "route buffer overflow");
        if self.len < MAX_ROUTE_POINTS {
            self.points[self.len] = p;
            self.len += 1;
        }
    }

    pub fn points(&self) -> &[Uv] {
        &self.points[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_finite(&self) -> bool {
        self.points().iter().all(|p| p.u.is_finite() && p.v.is_finite())
    }

    /// Global direction of the final segment, if the route has one.
    pub fn last_heading(&self, frame: &EdgeFrame) -> Option<Edge> {
        if self.len < 2 {
            return None;
        }
        let a = frame.to_global(self.points[self.len - 2]);
        let b = frame.to_global(self.points[self.len - 1]);
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        Some(if dx.abs() >= dy.abs() {
            if dx >= 0.0 { Edge::Right } else { Edge::Left }
        } else if dy >= 0.0 {
            Edge::Bottom
        } else {
            Edge::Top
        })
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    fn empty() -> Self {
        Self {
            min_x: f32::INFINITY,
            min_y: f32::INFINITY,
            max_x: f32::NEG_INFINITY,
            max_y: f32::NEG_INFINITY,
        }
    }

    fn include(&mut self, p: Coordinate) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }
}

/// Write `route` into `result`: frame rectangle, local polyline, arrow, and tip box.
///
/// The rectangle is the bounding box of the line and the arrow triangle grown by
/// `padding` on every side. The arrow sits on the last point, travelling `heading`.
pub fn commit_route(
    result: &mut DrawInfo,
    frame: &EdgeFrame,
    route: &Route,
    heading: Edge,
    config: &LineConfig,
) {
    let terminal = route
        .points()
        .last()
        .map(|&p| frame.to_global(p))
        .unwrap_or_default();
    let arrow = build_arrow(
        terminal,
        ArrowSpec {
            position: heading,
            arrow_length: config.arrow_length,
            arrow_width: config.arrow_width,
        },
    );

    let mut bounds = Bounds::empty();
    for &p in route.points() {
        bounds.include(frame.to_global(p));
    }
    for p in arrow {
        bounds.include(p);
    }
    if route.is_empty() {
        bounds.include(terminal);
    }

    let padding = config.padding;
    result.x = bounds.min_x - padding;
    result.y = bounds.min_y - padding;
    result.width = (bounds.max_x - bounds.min_x + padding * 2.0).max(0.0);
    result.height = (bounds.max_y - bounds.min_y + padding * 2.0).max(0.0);

    let origin = Coordinate::new(result.x, result.y);
    let local = |p: Coordinate| Coordinate::new(p.x - origin.x, p.y - origin.y);

    let line = &mut result.line_info.broken_line_points;
    line.clear();
    line.extend(route.points().iter().map(|&p| local(frame.to_global(p))));

    let info = &mut result.line_info.arrow_info;
    info.p1 = local(arrow[0]);
    info.p2 = local(arrow[1]);
    info.p3 = local(arrow[2]);
    let (left_top, right_bottom) = tip_hit_box(info.p2, padding);
    info.left_top_point = left_top;
    info.right_bottom_point = right_bottom;
}
