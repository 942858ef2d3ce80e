//! Layer descriptors handed to the renderer.
//!
//! Every per-item attribute is resolved up front, so the renderer only maps
//! fields onto its own layer accessors and never evaluates callbacks.

use crate::color::Rgba;
use citysheet_sheet::Point;
use serde::{Deserialize, Serialize};

/// A position lifted off the ground plane.
pub type Position3 = [f64; 3];

/// One renderable layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Layer {
    Path(PathLayer),
    Text(TextLayer),
    Column(ColumnLayer),
    Arc(ArcLayer),
}

impl Layer {
    /// Stable layer id.
    pub fn id(&self) -> &str {
        match self {
            Self::Path(layer) => &layer.id,
            Self::Text(layer) => &layer.id,
            Self::Column(layer) => &layer.id,
            Self::Arc(layer) => &layer.id,
        }
    }

    /// Whether the renderer should report hover events for this layer.
    pub fn pickable(&self) -> bool {
        match self {
            Self::Path(layer) => layer.pickable,
            Self::Text(layer) => layer.pickable,
            Self::Column(layer) => layer.pickable,
            Self::Arc(layer) => layer.pickable,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Path(layer) => layer.data.len(),
            Self::Text(layer) => layer.data.len(),
            Self::Column(layer) => layer.data.len(),
            Self::Arc(layer) => layer.data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Grid boundary paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathLayer {
    pub id: String,
    pub pickable: bool,
    pub data: Vec<PathItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    pub path: Vec<Point>,
    pub color: Rgba,
    pub width: f64,
}

/// Cell value labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLayer {
    pub id: String,
    pub pickable: bool,
    pub size_scale: f64,
    pub data: Vec<TextItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    pub name: String,
    pub position: Position3,
    pub text: String,
    pub font: String,
    pub size: f64,
    pub color: Rgba,
    pub background_color: Rgba,
}

/// Cell towers, four-sided and rotated to sit square on the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnLayer {
    pub id: String,
    pub pickable: bool,
    pub radius: f64,
    pub disk_resolution: u32,
    pub angle: f64,
    pub extruded: bool,
    pub data: Vec<ColumnItem>,
}

/// How strongly a tower's outline is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TowerStyle {
    /// Nothing is hovered.
    Normal,
    /// Hovered tower or an endpoint of the hovered arc.
    Emphasized,
    /// Something else is hovered.
    Dimmed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnItem {
    pub name: String,
    pub position: Point,
    pub elevation: f64,
    pub fill_color: Rgba,
    pub line_color: Rgba,
    pub line_width: f64,
    pub style: TowerStyle,
}

/// Dependency arcs between tower tops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcLayer {
    pub id: String,
    pub pickable: bool,
    pub data: Vec<ArcItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcItem {
    pub source: String,
    pub target: String,
    pub source_position: Position3,
    pub target_position: Position3,
    pub height: f64,
    pub width: f64,
    pub source_color: Rgba,
    pub target_color: Rgba,
    pub highlighted: bool,
}
