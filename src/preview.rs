//! Standalone SVG preview of a routed connector over its scene.

use std::fmt::Write;

use crate::connector::{ConnectorRequest, DrawInfo, NodeBox};
use crate::scene::SceneView;
use crate::xml::{escape_xml, fmt_num, fmt_points};

const MARGIN: f32 = 24.0;

/// Colors and sizes for preview rendering
#[derive(Debug, Clone)]
pub struct PreviewStyle {
    pub node_fill: String,
    pub node_stroke: String,
    pub node_text: String,
    pub source_stroke: String,
    pub target_stroke: String,
    pub line_stroke: String,
    pub line_width: f32,
    pub frame_stroke: String,
    pub handle_fill: String,
    pub background: String,
    pub font_family: String,
    pub font_size: f32,
    /// Outline the local canvas and the tip hit-box
    pub show_frame: bool,
}

impl Default for PreviewStyle {
    fn default() -> Self {
        Self {
            node_fill: "#f5f5f5".to_string(),
            node_stroke: "#333333".to_string(),
            node_text: "#333333".to_string(),
            source_stroke: "#1f6feb".to_string(),
            target_stroke: "#2da44e".to_string(),
            line_stroke: "#333333".to_string(),
            line_width: 1.5,
            frame_stroke: "#d1242f".to_string(),
            handle_fill: "rgba(209,36,47,0.25)".to_string(),
            background: "#ffffff".to_string(),
            font_family: "sans-serif".to_string(),
            font_size: 12.0,
            show_frame: false,
        }
    }
}

struct Extent {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Extent {
    fn of(draw: &DrawInfo) -> Self {
        Self {
            min_x: draw.x,
            min_y: draw.y,
            max_x: draw.x + draw.width,
            max_y: draw.y + draw.height,
        }
    }

    fn include(&mut self, b: &NodeBox) {
        self.min_x = self.min_x.min(b.left());
        self.min_y = self.min_y.min(b.top());
        self.max_x = self.max_x.max(b.right());
        self.max_y = self.max_y.max(b.bottom());
    }
}

/// Render nodes in zoomed space with the connector drawn in its own local canvas.
///
/// The connector sits in a nested `<svg>` at `(draw.x, draw.y)` so its points are
/// emitted exactly as the router produced them.
pub fn render_preview(
    scene: &SceneView<'_>,
    request: &ConnectorRequest,
    draw: &DrawInfo,
    style: &PreviewStyle,
) -> String {
    let zoom = scene.effective_zoom();
    let boxes: Vec<NodeBox> = scene
        .nodes
        .iter()
        .map(|n| n.style_info.scaled(zoom))
        .collect();

    let mut extent = Extent::of(draw);
    for b in &boxes {
        extent.include(b);
    }
    let min_x = extent.min_x - MARGIN;
    let min_y = extent.min_y - MARGIN;
    let width = (extent.max_x - extent.min_x + MARGIN * 2.0).max(1.0);
    let height = (extent.max_y - extent.min_y + MARGIN * 2.0).max(1.0);

    let mut body = String::new();
    let _ = write!(
        body,
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" />"#,
        fmt_num(min_x),
        fmt_num(min_y),
        fmt_num(width),
        fmt_num(height),
        escape_xml(&style.background)
    );

    for (node, b) in scene.nodes.iter().zip(&boxes) {
        let stroke = if node.id == request.from_node.id {
            &style.source_stroke
        } else if draw.connected_node_id.as_deref() == Some(node.id.as_str()) {
            &style.target_stroke
        } else {
            &style.node_stroke
        };
        let _ = write!(
            body,
            r#"<rect x="{}" y="{}" width="{}" height="{}" rx="4" fill="{}" stroke="{}" stroke-width="1" />"#,
            fmt_num(b.left()),
            fmt_num(b.top()),
            fmt_num(b.width),
            fmt_num(b.height),
            escape_xml(&style.node_fill),
            escape_xml(stroke)
        );
        let _ = write!(
            body,
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}" fill="{}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
            fmt_num(b.left() + b.width / 2.0),
            fmt_num(b.top() + b.height / 2.0),
            escape_xml(&style.font_family),
            fmt_num(style.font_size),
            escape_xml(&style.node_text),
            escape_xml(&node.id)
        );
    }

    body.push_str(&render_connector(draw, style));

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}">{}</svg>"#,
        fmt_num(min_x),
        fmt_num(min_y),
        fmt_num(width),
        fmt_num(height),
        fmt_num(width),
        fmt_num(height),
        body
    )
}

fn render_connector(draw: &DrawInfo, style: &PreviewStyle) -> String {
    let line = &draw.line_info;
    let arrow = &line.arrow_info;
    let mut out = String::new();

    let _ = write!(
        out,
        r#"<svg x="{}" y="{}" width="{}" height="{}" overflow="visible">"#,
        fmt_num(draw.x),
        fmt_num(draw.y),
        fmt_num(draw.width),
        fmt_num(draw.height)
    );
    if style.show_frame {
        let _ = write!(
            out,
            r#"<rect x="0" y="0" width="{}" height="{}" fill="none" stroke="{}" stroke-dasharray="4 3" />"#,
            fmt_num(draw.width),
            fmt_num(draw.height),
            escape_xml(&style.frame_stroke)
        );
    }
    if line.broken_line_points.len() > 1 {
        let _ = write!(
            out,
            r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linejoin="round" />"#,
            fmt_points(line.broken_line_points.iter().map(|p| (p.x, p.y))),
            escape_xml(&style.line_stroke),
            fmt_num(style.line_width)
        );
    }
    let _ = write!(
        out,
        r#"<polygon points="{}" fill="{}" />"#,
        fmt_points([arrow.p1, arrow.p2, arrow.p3].map(|p| (p.x, p.y))),
        escape_xml(&style.line_stroke)
    );
    if style.show_frame {
        let lt = arrow.left_top_point;
        let rb = arrow.right_bottom_point;
        let _ = write!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" />"#,
            fmt_num(lt.x),
            fmt_num(lt.y),
            fmt_num((rb.x - lt.x).max(0.0)),
            fmt_num((rb.y - lt.y).max(0.0)),
            escape_xml(&style.handle_fill)
        );
    }
    out.push_str("</svg>");
    out
}
