use serde::{Deserialize, Serialize};

use crate::config::LineConfig;

/// A point in global canvas space (pixels)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f32,
    pub y: f32,
}

impl Coordinate {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Replace non-finite components with zero.
    pub fn sanitized(self) -> Self {
        let fix = |v: f32| if v.is_finite() { v } else { 0.0 };
        Self::new(fix(self.x), fix(self.y))
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Node edges, also used as travel directions.
///
/// `Right` points toward +x and `Bottom` toward +y (screen space).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Top, Edge::Right, Edge::Bottom];

    /// `left↔right`, `top↔bottom`
    pub fn contrary(self) -> Edge {
        match self {
            Edge::Left => Edge::Right,
            Edge::Right => Edge::Left,
            Edge::Top => Edge::Bottom,
            Edge::Bottom => Edge::Top,
        }
    }

    /// Unit vector of the direction in global space.
    pub fn unit(self) -> (f32, f32) {
        match self {
            Edge::Left => (-1.0, 0.0),
            Edge::Right => (1.0, 0.0),
            Edge::Top => (0.0, -1.0),
            Edge::Bottom => (0.0, 1.0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Edge::Left | Edge::Right)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Edge::Left => "left",
            Edge::Top => "top",
            Edge::Right => "right",
            Edge::Bottom => "bottom",
        }
    }
}

/// Axis-aligned node bounds; `offset_x/offset_y` is the top-left corner
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeBox {
    pub width: f32,
    pub height: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl NodeBox {
    pub fn new(offset_x: f32, offset_y: f32, width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            offset_x,
            offset_y,
        }
    }

    pub fn left(&self) -> f32 {
        self.offset_x
    }

    pub fn top(&self) -> f32 {
        self.offset_y
    }

    pub fn right(&self) -> f32 {
        self.offset_x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.offset_y + self.height
    }

    /// Copy scaled into zoomed pointer space, floor-rounded.
    ///
    /// Negative or non-finite extents collapse to zero so downstream clamping stays valid.
    pub fn scaled(&self, zoom: f32) -> Self {
        let scale = |v: f32| {
            let s = (v * zoom).floor();
            if s.is_finite() { s } else { 0.0 }
        };
        Self {
            width: scale(self.width).max(0.0),
            height: scale(self.height).max(0.0),
            offset_x: scale(self.offset_x),
            offset_y: scale(self.offset_y),
        }
    }
}

/// A node as seen by the router
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramNode {
    pub id: String,
    pub style_info: NodeBox,
}

impl DiagramNode {
    pub fn new(id: impl Into<String>, style_info: NodeBox) -> Self {
        Self {
            id: id.into(),
            style_info,
        }
    }
}

/// Input for one routing call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorRequest {
    pub start_point: Coordinate,
    pub end_point: Coordinate,
    #[serde(default)]
    pub line_config: LineConfig,
    pub from_node: DiagramNode,
    pub from_position: Edge,
}

/// Arrow triangle plus the draggable tip box, in local canvas space
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrowInfo {
    pub p1: Coordinate,
    pub p2: Coordinate,
    pub p3: Coordinate,
    pub left_top_point: Coordinate,
    pub right_bottom_point: Coordinate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineInfo {
    pub broken_line_points: Vec<Coordinate>,
    pub arrow_info: ArrowInfo,
}

/// Router output.
///
/// `(x, y, width, height)` is the local canvas rectangle in global space; everything in
/// `line_info` is relative to `(x, y)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawInfo {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub is_connected_node: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connected_node_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connected_position: Option<Edge>,
    pub line_info: LineInfo,
}

impl DrawInfo {
    /// Convert a local point back to global space.
    pub fn to_global(&self, p: Coordinate) -> Coordinate {
        Coordinate::new(p.x + self.x, p.y + self.y)
    }

    pub(crate) fn clear_connection(&mut self) {
        self.is_connected_node = false;
        self.connected_node_id = None;
        self.connected_position = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contrary_is_an_involution() {
        for edge in Edge::ALL {
            assert_ne!(edge.contrary(), edge);
            assert_eq!(edge.contrary().contrary(), edge);
        }
    }

    #[test]
    fn scaled_copy_floors_and_leaves_original() {
        let original = NodeBox::new(10.5, 3.0, 101.0, 51.0);
        let scaled = original.scaled(1.5);
        assert_eq!(scaled, NodeBox::new(15.0, 4.0, 151.0, 76.0));
        assert_eq!(original.width, 101.0);
    }

    #[test]
    fn scaled_copy_never_goes_negative() {
        let weird = NodeBox::new(0.0, 0.0, -20.0, f32::NAN);
        let scaled = weird.scaled(2.0);
        assert_eq!(scaled.width, 0.0);
        assert_eq!(scaled.height, 0.0);
    }

    #[test]
    fn draw_info_serializes_camel_case() {
        let info = DrawInfo {
            is_connected_node: true,
            connected_node_id: Some("b".to_string()),
            connected_position: Some(Edge::Top),
            ..Default::default()
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["isConnectedNode"], true);
        assert_eq!(json["connectedPosition"], "top");
        assert!(json["lineInfo"]["arrowInfo"].get("leftTopPoint").is_some());
    }

    #[test]
    fn unconnected_draw_info_omits_connection_fields() {
        let json = serde_json::to_value(DrawInfo::default()).unwrap();
        assert!(json.get("connectedNodeId").is_none());
        assert!(json.get("connectedPosition").is_none());
    }
}
