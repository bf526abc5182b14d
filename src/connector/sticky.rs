//! Sticky zones: where a connector end attaches to a node.

use super::types::{Coordinate, Edge, NodeBox};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickyAnchor {
    pub point_x: f32,
    pub point_y: f32,
}

impl StickyAnchor {
    pub fn point(&self) -> Coordinate {
        Coordinate::new(self.point_x, self.point_y)
    }
}

/// Per-edge anchors of one node, biased toward the connector's start point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickyArea {
    pub left_area: StickyAnchor,
    pub top_area: StickyAnchor,
    pub right_area: StickyAnchor,
    pub bottom_area: StickyAnchor,
    pub bounds: NodeBox,
}

impl StickyArea {
    /// Anchor a connector travelling in `heading` ends on.
    pub fn anchor_for(&self, heading: Edge) -> StickyAnchor {
        match heading {
            Edge::Right => self.left_area,
            Edge::Bottom => self.top_area,
            Edge::Left => self.right_area,
            Edge::Top => self.bottom_area,
        }
    }
}

fn clamp_span(value: f32, lo: f32, hi: f32) -> f32 {
    value.max(lo).min(hi.max(lo))
}

pub fn node_sticky_area(node: &NodeBox, start_point: Coordinate) -> StickyArea {
    let y = clamp_span(start_point.y, node.top(), node.bottom());
    let x = clamp_span(start_point.x, node.left(), node.right());
    StickyArea {
        left_area: StickyAnchor {
            point_x: node.left(),
            point_y: y,
        },
        top_area: StickyAnchor {
            point_x: x,
            point_y: node.top(),
        },
        right_area: StickyAnchor {
            point_x: node.right(),
            point_y: y,
        },
        bottom_area: StickyAnchor {
            point_x: x,
            point_y: node.bottom(),
        },
        bounds: *node,
    }
}

/// Which band of `area` contains `point`, as the direction the connector travels into
/// the node (the left band yields `Edge::Right`).
///
/// Bands extend `tolerance` either side of an edge and past its corners. Where two bands
/// overlap the nearer edge wins, ties going left, top, right, bottom.
pub fn line_sticky_position(point: Coordinate, area: &StickyArea, tolerance: f32) -> Option<Edge> {
    if !point.is_finite() {
        return None;
    }
    let b = &area.bounds;
    let within_x = point.x >= b.left() - tolerance && point.x <= b.right() + tolerance;
    let within_y = point.y >= b.top() - tolerance && point.y <= b.bottom() + tolerance;

    let candidates = [
        (Edge::Left, (point.x - b.left()).abs(), within_y),
        (Edge::Top, (point.y - b.top()).abs(), within_x),
        (Edge::Right, (point.x - b.right()).abs(), within_y),
        (Edge::Bottom, (point.y - b.bottom()).abs(), within_x),
    ];

    let mut best: Option<(Edge, f32)> = None;
    for (edge, distance, in_span) in candidates {
        if !in_span || distance > tolerance {
            continue;
        }
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((edge, distance));
        }
    }
    best.map(|(edge, _)| edge.contrary())
}

pub fn contrary_position(edge: Edge) -> Edge {
    edge.contrary()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> NodeBox {
        NodeBox::new(50.0, 300.0, 200.0, 100.0)
    }

    #[test]
    fn anchors_follow_start_point_clamped_to_edges() {
        let area = node_sticky_area(&node(), Coordinate::new(100.0, 100.0));
        assert_eq!(area.top_area.point(), Coordinate::new(100.0, 300.0));
        assert_eq!(area.bottom_area.point(), Coordinate::new(100.0, 400.0));
        // start y above the node clamps to its top
        assert_eq!(area.left_area.point(), Coordinate::new(50.0, 300.0));
        assert_eq!(area.right_area.point(), Coordinate::new(250.0, 300.0));
    }

    #[test]
    fn zero_size_node_keeps_anchors_on_its_corner() {
        let dot = NodeBox::new(10.0, 10.0, 0.0, 0.0);
        let area = node_sticky_area(&dot, Coordinate::new(500.0, -500.0));
        for anchor in [area.left_area, area.top_area, area.right_area, area.bottom_area] {
            assert_eq!(anchor.point(), Coordinate::new(10.0, 10.0));
        }
    }

    #[test]
    fn top_band_means_travelling_down() {
        let area = node_sticky_area(&node(), Coordinate::new(0.0, 0.0));
        assert_eq!(
            line_sticky_position(Coordinate::new(150.0, 295.0), &area, 12.0),
            Some(Edge::Bottom)
        );
        assert_eq!(
            line_sticky_position(Coordinate::new(45.0, 350.0), &area, 12.0),
            Some(Edge::Right)
        );
        assert_eq!(
            line_sticky_position(Coordinate::new(260.0, 350.0), &area, 12.0),
            Some(Edge::Left)
        );
        assert_eq!(
            line_sticky_position(Coordinate::new(150.0, 410.0), &area, 12.0),
            Some(Edge::Top)
        );
    }

    #[test]
    fn interior_and_far_points_do_not_stick() {
        let area = node_sticky_area(&node(), Coordinate::new(0.0, 0.0));
        assert_eq!(line_sticky_position(Coordinate::new(150.0, 350.0), &area, 12.0), None);
        assert_eq!(line_sticky_position(Coordinate::new(150.0, 250.0), &area, 12.0), None);
        assert_eq!(line_sticky_position(Coordinate::new(f32::NAN, 300.0), &area, 12.0), None);
    }

    #[test]
    fn corner_overlap_prefers_nearer_edge_then_order() {
        let area = node_sticky_area(&node(), Coordinate::new(0.0, 0.0));
        // 2px from the left edge, 8px above the top edge
        assert_eq!(
            line_sticky_position(Coordinate::new(52.0, 292.0), &area, 12.0),
            Some(Edge::Right)
        );
        // exact corner: left wins the tie
        assert_eq!(
            line_sticky_position(Coordinate::new(50.0, 300.0), &area, 12.0),
            Some(Edge::Right)
        );
    }

    #[test]
    fn anchor_for_matches_band() {
        let area = node_sticky_area(&node(), Coordinate::new(100.0, 0.0));
        assert_eq!(area.anchor_for(Edge::Bottom), area.top_area);
        assert_eq!(area.anchor_for(Edge::Left), area.right_area);
        assert_eq!(contrary_position(Edge::Bottom), Edge::Top);
    }
}
