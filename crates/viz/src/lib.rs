//! # citysheet-viz
//!
//! Turns a sheet snapshot, its dependency graph and the current hover state
//! into layer descriptors for a 3D renderer:
//! - ground grid paths for rows and columns
//! - cell labels
//! - one tower per cell, raised by weight once the rise animation fires
//! - one arc per dependency, highlighted along the hovered tower's ancestry

mod color;
mod compose;
mod highlight;
mod layer;

pub use color::{decode_color, ColorError, Rgba};
pub use compose::{
    arc_height, arc_layer, compose, elevation, grid_layer, label_layer, static_layers,
    tower_fill, tower_layer, AnimationPhase, Composer, ARC_DIM_ALPHA, ARC_FULL_ALPHA,
    ARC_HEIGHT_MAX, ARC_HEIGHT_MIN, ARC_LAYER_ID, COL_LAYER_ID, ELEVATION_SCALE, LABEL_LAYER_ID,
    ROW_LAYER_ID, TOWER_LAYER_ID,
};
pub use highlight::{HighlightState, Hover, HoverEvent};
pub use layer::{
    ArcItem, ArcLayer, ColumnItem, ColumnLayer, Layer, PathItem, PathLayer, Position3, TextItem,
    TextLayer, TowerStyle,
};
