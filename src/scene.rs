//! Scene state the router reads: ordered nodes, zoom, and the area-selection flag.

use std::fs;
use std::path::Path;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::config::LineConfig;
use crate::connector::{
    ConnectorRequest, Coordinate, DiagramNode, DrawInfo, Edge, compute_connector_geometry,
};
use crate::error::{Error, Result};

/// Borrowed, read-only view of a scene for one routing call
#[derive(Debug, Clone, Copy)]
pub struct SceneView<'a> {
    pub nodes: &'a [DiagramNode],
    pub zoom: f32,
    pub is_area_selecting: bool,
}

impl SceneView<'static> {
    pub fn empty() -> Self {
        SceneView {
            nodes: &[],
            zoom: 1.0,
            is_area_selecting: false,
        }
    }
}

impl SceneView<'_> {
    /// Zoom used for routing; anything non-finite or non-positive counts as 1.0.
    pub fn effective_zoom(&self) -> f32 {
        if self.zoom.is_finite() && self.zoom > 0.0 {
            self.zoom
        } else {
            1.0
        }
    }
}

fn default_zoom() -> f32 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneSnapshot {
    #[serde(default)]
    pub nodes: Vec<DiagramNode>,
    #[serde(default = "default_zoom")]
    pub zoom: f32,
    #[serde(default)]
    pub is_area_selecting: bool,
}

impl Default for SceneSnapshot {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            zoom: default_zoom(),
            is_area_selecting: false,
        }
    }
}

impl SceneSnapshot {
    pub fn view(&self) -> SceneView<'_> {
        SceneView {
            nodes: &self.nodes,
            zoom: self.zoom,
            is_area_selecting: self.is_area_selecting,
        }
    }

    pub fn node(&self, id: &str) -> Option<&DiagramNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// Connector request as written in a scene file; the source node is referenced by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSpec {
    pub start_point: Coordinate,
    pub end_point: Coordinate,
    pub from_node_id: String,
    pub from_position: Edge,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_config: Option<LineConfig>,
}

/// A scene plus one connector request, as read from JSON or YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneFile {
    #[serde(default)]
    pub nodes: Vec<DiagramNode>,
    #[serde(default = "default_zoom")]
    pub zoom: f32,
    #[serde(default)]
    pub is_area_selecting: bool,
    pub request: RequestSpec,
}

impl SceneFile {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load by extension: `.json`, `.yaml` or `.yml`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Self::from_json(&content),
            "yaml" | "yml" => Self::from_yaml(&content),
            _ => Err(Error::UnsupportedFormat {
                kind: "scene",
                ext,
            }),
        }
    }

    /// Split into the scene and a resolved request.
    ///
    /// `fallback` fills in the line config when the file carries none.
    pub fn into_parts(self, fallback: LineConfig) -> Result<(SceneSnapshot, ConnectorRequest)> {
        let scene = SceneSnapshot {
            nodes: self.nodes,
            zoom: self.zoom,
            is_area_selecting: self.is_area_selecting,
        };
        let request = resolve_request(&scene, self.request, fallback)?;
        Ok((scene, request))
    }
}

fn resolve_request(
    scene: &SceneSnapshot,
    spec: RequestSpec,
    fallback: LineConfig,
) -> Result<ConnectorRequest> {
    let from_node = scene
        .node(&spec.from_node_id)
        .cloned()
        .ok_or(Error::UnknownNode(spec.from_node_id))?;
    Ok(ConnectorRequest {
        start_point: spec.start_point,
        end_point: spec.end_point,
        line_config: spec.line_config.unwrap_or(fallback),
        from_node,
        from_position: spec.from_position,
    })
}

/// Live scene state shared between an editor and the router.
///
/// Writers take the lock briefly per setter; `route` holds one read guard for the whole
/// call so it never sees a half-applied update.
#[derive(Debug, Default)]
pub struct SceneStore {
    state: RwLock<SceneSnapshot>,
}

impl SceneStore {
    pub fn new(snapshot: SceneSnapshot) -> Self {
        Self {
            state: RwLock::new(snapshot),
        }
    }

    pub fn set_nodes(&self, nodes: Vec<DiagramNode>) {
        self.state.write().nodes = nodes;
    }

    /// Replace the node with the same id in place, or append it.
    pub fn upsert_node(&self, node: DiagramNode) {
        let mut state = self.state.write();
        match state.nodes.iter_mut().find(|n| n.id == node.id) {
            Some(existing) => *existing = node,
            None => state.nodes.push(node),
        }
    }

    pub fn remove_node(&self, id: &str) -> Option<DiagramNode> {
        let mut state = self.state.write();
        let index = state.nodes.iter().position(|n| n.id == id)?;
        Some(state.nodes.remove(index))
    }

    pub fn set_zoom(&self, zoom: f32) {
        self.state.write().zoom = zoom;
    }

    pub fn set_area_selecting(&self, selecting: bool) {
        self.state.write().is_area_selecting = selecting;
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        self.state.read().clone()
    }

    pub fn route(&self, result: &mut DrawInfo, request: &ConnectorRequest) {
        let state = self.state.read();
        compute_connector_geometry(result, request, &state.view());
    }
}
