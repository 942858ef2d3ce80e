//! Derivation of the full layer list from sheet, graph and hover state.

use crate::color::{decode_color, Rgba};
use crate::highlight::HighlightState;
use crate::layer::{
    ArcItem, ArcLayer, ColumnItem, ColumnLayer, Layer, PathItem, PathLayer, TextItem, TextLayer,
    TowerStyle,
};
use citysheet_dag::DependencyGraph;
use citysheet_sheet::{GridLine, SheetSnapshot};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const ROW_LAYER_ID: &str = "RowPaths";
pub const COL_LAYER_ID: &str = "ColPaths";
pub const LABEL_LAYER_ID: &str = "CellLayer";
pub const TOWER_LAYER_ID: &str = "TowerLayer";
pub const ARC_LAYER_ID: &str = "ArcLayer";

const GRID_COLOR: Rgba = [160, 160, 160, 255];
const GRID_WIDTH: f64 = 1.0;

/// Tower height per unit of weight.
pub const ELEVATION_SCALE: f64 = 2.0;
const LABEL_LIFT: f64 = 1.0;
const LABEL_SIZE_SCALE: f64 = 0.25;
const DEFAULT_FONT_SIZE: f64 = 12.0;
const DEFAULT_TEXT_COLOR: Rgba = [0, 0, 0, 255];
const DEFAULT_BACKGROUND: Rgba = [255, 255, 255, 255];

const TOWER_RADIUS: f64 = 10.0;
const TOWER_BASE: [u8; 2] = [48, 128];
const TRANSPARENT: Rgba = [0, 0, 0, 0];

pub const ARC_HEIGHT_MIN: f64 = 0.1;
pub const ARC_HEIGHT_MAX: f64 = 1.0;
const ARC_WIDTH: f64 = 2.0;
const ARC_SOURCE_RGB: [u8; 3] = [0, 128, 200];
const ARC_TARGET_RGB: [u8; 3] = [200, 0, 80];
/// Arc alpha when highlighted.
pub const ARC_FULL_ALPHA: u8 = 255;
/// Arc alpha otherwise.
pub const ARC_DIM_ALPHA: u8 = 40;

/// Whether the towers have risen yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationPhase {
    #[default]
    PreAnimation,
    PostAnimation,
}

/// Build every layer for the current state.
///
/// Order: row paths, column paths, labels, towers, arcs.
pub fn compose(
    snapshot: &SheetSnapshot,
    graph: &DependencyGraph,
    highlight: &HighlightState,
    phase: AnimationPhase,
) -> Vec<Layer> {
    let mut layers = static_layers(snapshot);
    layers.push(tower_layer(snapshot, highlight, phase));
    layers.push(arc_layer(graph, highlight, phase));
    layers
}

/// Layers that depend only on the snapshot: grid lines and labels.
pub fn static_layers(snapshot: &SheetSnapshot) -> Vec<Layer> {
    vec![
        grid_layer(ROW_LAYER_ID, snapshot.rows()),
        grid_layer(COL_LAYER_ID, snapshot.cols()),
        label_layer(snapshot),
    ]
}

pub fn grid_layer(id: &str, lines: &[GridLine]) -> Layer {
    Layer::Path(PathLayer {
        id: id.to_string(),
        pickable: false,
        data: lines
            .iter()
            .map(|line| PathItem {
                path: line.path.clone(),
                color: GRID_COLOR,
                width: GRID_WIDTH,
            })
            .collect(),
    })
}

pub fn label_layer(snapshot: &SheetSnapshot) -> Layer {
    Layer::Text(TextLayer {
        id: LABEL_LAYER_ID.to_string(),
        pickable: false,
        size_scale: LABEL_SIZE_SCALE,
        data: snapshot
            .cells()
            .map(|cell| TextItem {
                name: cell.name.clone(),
                position: [
                    cell.position[0],
                    cell.position[1],
                    cell.weight * ELEVATION_SCALE + LABEL_LIFT,
                ],
                text: cell.display_value.clone(),
                font: cell.font.clone(),
                size: if cell.font_size > 0.0 {
                    cell.font_size
                } else {
                    DEFAULT_FONT_SIZE
                },
                color: decode_color(&cell.color).unwrap_or(DEFAULT_TEXT_COLOR),
                background_color: decode_color(&cell.background_color)
                    .unwrap_or(DEFAULT_BACKGROUND),
            })
            .collect(),
    })
}

pub fn tower_layer(
    snapshot: &SheetSnapshot,
    highlight: &HighlightState,
    phase: AnimationPhase,
) -> Layer {
    let max_weight = snapshot.max_weight();
    Layer::Column(ColumnLayer {
        id: TOWER_LAYER_ID.to_string(),
        pickable: true,
        radius: TOWER_RADIUS,
        disk_resolution: 4,
        angle: 45.0,
        extruded: true,
        data: snapshot
            .cells()
            .map(|cell| {
                let style = if highlight.is_emphasized(&cell.name) {
                    TowerStyle::Emphasized
                } else if highlight.is_idle() {
                    TowerStyle::Normal
                } else {
                    TowerStyle::Dimmed
                };
                let (line_color, line_width) = match style {
                    TowerStyle::Emphasized => ([255, 255, 255, 255], 3.0),
                    TowerStyle::Normal => ([255, 255, 255, 160], 1.0),
                    TowerStyle::Dimmed => ([255, 255, 255, 60], 1.0),
                };
                ColumnItem {
                    name: cell.name.clone(),
                    position: cell.center(),
                    elevation: elevation(cell.weight, phase),
                    fill_color: tower_fill(cell.weight, max_weight),
                    line_color,
                    line_width,
                    style,
                }
            })
            .collect(),
    })
}

pub fn arc_layer(
    graph: &DependencyGraph,
    highlight: &HighlightState,
    phase: AnimationPhase,
) -> Layer {
    let max_distance = graph.max_span();
    Layer::Arc(ArcLayer {
        id: ARC_LAYER_ID.to_string(),
        pickable: true,
        data: graph
            .connections
            .iter()
            .map(|conn| {
                let highlighted = highlight.is_highlighted(&conn.key());
                let alpha = if highlighted {
                    ARC_FULL_ALPHA
                } else {
                    ARC_DIM_ALPHA
                };
                let [sx, sy] = conn.source.position;
                let [tx, ty] = conn.target.position;
                ArcItem {
                    source: conn.source.name.clone(),
                    target: conn.target.name.clone(),
                    source_position: [sx, sy, elevation(conn.source.weight, phase)],
                    target_position: [tx, ty, elevation(conn.target.weight, phase)],
                    height: arc_height(conn.distance(), max_distance),
                    width: ARC_WIDTH,
                    source_color: with_alpha(ARC_SOURCE_RGB, alpha),
                    target_color: with_alpha(ARC_TARGET_RGB, alpha),
                    highlighted,
                }
            })
            .collect(),
    })
}

/// Tower height: flat until the rise animation has fired.
pub fn elevation(weight: f64, phase: AnimationPhase) -> f64 {
    match phase {
        AnimationPhase::PreAnimation => 0.0,
        AnimationPhase::PostAnimation => weight * ELEVATION_SCALE,
    }
}

/// Tower fill. The blue channel follows `sqrt(weight / max_weight)`;
/// weightless cells are fully transparent.
pub fn tower_fill(weight: f64, max_weight: f64) -> Rgba {
    if weight <= 0.0 || max_weight <= 0.0 {
        return TRANSPARENT;
    }
    let intensity = (weight / max_weight).sqrt().clamp(0.0, 1.0);
    [TOWER_BASE[0], TOWER_BASE[1], (intensity * 255.0).round() as u8, 255]
}

/// Arc height; closer pairs arc higher.
pub fn arc_height(distance: f64, max_distance: f64) -> f64 {
    if max_distance <= 0.0 {
        return ARC_HEIGHT_MAX;
    }
    let closeness = 1.0 - distance / max_distance;
    let height = ARC_HEIGHT_MIN + closeness * (ARC_HEIGHT_MAX - ARC_HEIGHT_MIN);
    height.clamp(ARC_HEIGHT_MIN, ARC_HEIGHT_MAX)
}

fn with_alpha(rgb: [u8; 3], alpha: u8) -> Rgba {
    [rgb[0], rgb[1], rgb[2], alpha]
}

/// [`compose`] with the snapshot-only layers memoized per snapshot.
///
/// A cached entry is reused while the same `Arc` is passed in; any other
/// snapshot rebuilds it.
#[derive(Debug, Default)]
pub struct Composer {
    statics: Option<(Arc<SheetSnapshot>, Vec<Layer>)>,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compose(
        &mut self,
        snapshot: &Arc<SheetSnapshot>,
        graph: &DependencyGraph,
        highlight: &HighlightState,
        phase: AnimationPhase,
    ) -> Vec<Layer> {
        let mut layers = self.static_layers(snapshot).to_vec();
        layers.push(tower_layer(snapshot, highlight, phase));
        layers.push(arc_layer(graph, highlight, phase));
        layers
    }

    fn static_layers(&mut self, snapshot: &Arc<SheetSnapshot>) -> &[Layer] {
        let cached = matches!(&self.statics, Some((seen, _)) if Arc::ptr_eq(seen, snapshot));
        if !cached {
            self.statics = Some((Arc::clone(snapshot), static_layers(snapshot)));
        }
        self.statics
            .as_ref()
            .map(|(_, layers)| layers.as_slice())
            .unwrap_or_default()
    }
}
