//! Per-edge coordinate frames.
//!
//! Every router works in a frame where `u` points out of the origin edge and `v` runs
//! along it. The four origin edges differ only by an axis swap and sign flips, so one
//! routine covers all of them.

use super::types::{Coordinate, Edge, NodeBox};

/// A point in an edge frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uv {
    pub u: f32,
    pub v: f32,
}

impl Uv {
    pub fn new(u: f32, v: f32) -> Self {
        Self { u, v }
    }
}

/// Axis-aligned box in an edge frame, `u0 <= u1` and `v0 <= v1`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub u0: f32,
    pub u1: f32,
    pub v0: f32,
    pub v1: f32,
}

impl Span {
    pub fn center_v(&self) -> f32 {
        (self.v0 + self.v1) / 2.0
    }
}

/// Travel direction expressed in an edge frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    PosU,
    NegU,
    PosV,
    NegV,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeFrame {
    swap: bool,
    flip_u: bool,
    flip_v: bool,
}

impl EdgeFrame {
    /// Frame whose `+u` leaves the given origin edge.
    pub fn for_edge(edge: Edge) -> Self {
        let (swap, flip_u) = match edge {
            Edge::Right => (false, false),
            Edge::Left => (false, true),
            Edge::Bottom => (true, false),
            Edge::Top => (true, true),
        };
        Self {
            swap,
            flip_u,
            flip_v: false,
        }
    }

    /// Same frame mirrored along `v`.
    pub fn mirrored_v(self) -> Self {
        Self {
            flip_v: !self.flip_v,
            ..self
        }
    }

    pub fn to_frame(&self, p: Coordinate) -> Uv {
        let (a, b) = if self.swap { (p.y, p.x) } else { (p.x, p.y) };
        Uv::new(
            if self.flip_u { -a } else { a },
            if self.flip_v { -b } else { b },
        )
    }

    pub fn to_global(&self, p: Uv) -> Coordinate {
        let a = if self.flip_u { -p.u } else { p.u };
        let b = if self.flip_v { -p.v } else { p.v };
        if self.swap {
            Coordinate::new(b, a)
        } else {
            Coordinate::new(a, b)
        }
    }

    pub fn span(&self, node: &NodeBox) -> Span {
        let a = self.to_frame(Coordinate::new(node.left(), node.top()));
        let b = self.to_frame(Coordinate::new(node.right(), node.bottom()));
        Span {
            u0: a.u.min(b.u),
            u1: a.u.max(b.u),
            v0: a.v.min(b.v),
            v1: a.v.max(b.v),
        }
    }

    pub fn heading(&self, direction: Edge) -> Heading {
        let (dx, dy) = direction.unit();
        let d = self.to_frame(Coordinate::new(dx, dy));
        if d.u > 0.0 {
            Heading::PosU
        } else if d.u < 0.0 {
            Heading::NegU
        } else if d.v > 0.0 {
            Heading::PosV
        } else {
            Heading::NegV
        }
    }
}
