use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const PADDING: f32 = 10.0;
const ARROW_LENGTH: f32 = 8.0;
const ARROW_WIDTH: f32 = 4.0;
const BREAK_LINE_OFFSET_NODE: f32 = 20.0;
const STICKY_TOLERANCE: f32 = 12.0;

const BUILTIN_PRESETS: &[(&str, &str)] = &[
    ("compact", include_str!("../presets/compact.toml")),
    ("default", include_str!("../presets/default.toml")),
    ("spacious", include_str!("../presets/spacious.toml")),
];

/// Routing tunables.
///
/// `padding` keeps strokes off the local canvas edge, `break_line_offset_node` is the
/// clearance kept from a node before a route may turn, and `sticky_tolerance` is the
/// half-width of each snapping band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineConfig {
    #[serde(default = "default_padding")]
    pub padding: f32,
    #[serde(default = "default_arrow_length")]
    pub arrow_length: f32,
    #[serde(default = "default_arrow_width")]
    pub arrow_width: f32,
    #[serde(default = "default_break_line_offset_node")]
    pub break_line_offset_node: f32,
    #[serde(default = "default_sticky_tolerance")]
    pub sticky_tolerance: f32,
}

fn default_padding() -> f32 {
    PADDING
}
fn default_arrow_length() -> f32 {
    ARROW_LENGTH
}
fn default_arrow_width() -> f32 {
    ARROW_WIDTH
}
fn default_break_line_offset_node() -> f32 {
    BREAK_LINE_OFFSET_NODE
}
fn default_sticky_tolerance() -> f32 {
    STICKY_TOLERANCE
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            padding: PADDING,
            arrow_length: ARROW_LENGTH,
            arrow_width: ARROW_WIDTH,
            break_line_offset_node: BREAK_LINE_OFFSET_NODE,
            sticky_tolerance: STICKY_TOLERANCE,
        }
    }
}

impl LineConfig {
    pub fn from_preset(name: &str) -> Result<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        let content = BUILTIN_PRESETS
            .iter()
            .find(|(n, _)| *n == normalized)
            .map(|(_, c)| *c)
            .ok_or_else(|| Error::UnknownPreset {
                name: name.to_string(),
                available: Self::list_presets().join(", "),
            })?;
        Self::from_toml(content)
    }

    pub fn list_presets() -> Vec<&'static str> {
        BUILTIN_PRESETS.iter().map(|(n, _)| *n).collect()
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Negative or non-finite values become zero; the router relies on this.
    pub fn normalized(&self) -> Self {
        let fix = |v: f32| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self {
            padding: fix(self.padding),
            arrow_length: fix(self.arrow_length),
            arrow_width: fix(self.arrow_width),
            break_line_offset_node: fix(self.break_line_offset_node),
            sticky_tolerance: fix(self.sticky_tolerance),
        }
    }
}
