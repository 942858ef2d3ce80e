//! Hover tracking and the set of edges it highlights.

use citysheet_dag::{DependencyGraph, EdgeKey};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// What the pointer is currently over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Hover {
    #[default]
    Idle,
    TowerHovered { name: String },
    ArcHovered { source: String, target: String },
}

/// Hover input reported by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HoverEvent {
    /// Pointer entered a tower.
    Tower { name: String },
    /// Pointer entered an arc.
    Arc { source: String, target: String },
    /// Pointer left all interactive geometry.
    Leave,
}

/// Current hover target and the edges it highlights.
///
/// The highlighted set is always drawn from the graph passed to the last
/// transition, in the order the path finder produced it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighlightState {
    hover: Hover,
    highlighted: IndexSet<EdgeKey>,
}

impl HighlightState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hover(&self) -> &Hover {
        &self.hover
    }

    pub fn is_idle(&self) -> bool {
        self.hover == Hover::Idle
    }

    /// Apply a renderer event. Returns `false` when the state did not change.
    pub fn apply(&mut self, event: HoverEvent, graph: &DependencyGraph) -> bool {
        match event {
            HoverEvent::Tower { name } => self.hover_tower(name, graph),
            HoverEvent::Arc { source, target } => self.hover_arc(source, target, graph),
            HoverEvent::Leave => self.clear(),
        }
    }

    /// Hover a tower: highlight every edge feeding it.
    pub fn hover_tower(&mut self, name: impl Into<String>, graph: &DependencyGraph) -> bool {
        let next = Hover::TowerHovered { name: name.into() };
        if self.hover == next {
            return false;
        }
        self.hover = next;
        self.rederive(graph);
        true
    }

    /// Hover an arc: highlight exactly that edge.
    pub fn hover_arc(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        graph: &DependencyGraph,
    ) -> bool {
        let next = Hover::ArcHovered {
            source: source.into(),
            target: target.into(),
        };
        if self.hover == next {
            return false;
        }
        self.hover = next;
        self.rederive(graph);
        true
    }

    /// Pointer left everything.
    pub fn clear(&mut self) -> bool {
        if self.is_idle() {
            return false;
        }
        self.hover = Hover::Idle;
        self.highlighted.clear();
        tracing::debug!("highlight cleared");
        true
    }

    /// Recompute the highlighted edges for the current target against `graph`.
    pub fn rederive(&mut self, graph: &DependencyGraph) {
        self.highlighted = match &self.hover {
            Hover::Idle => IndexSet::new(),
            Hover::TowerHovered { name } => {
                graph.ancestors_of(name).into_iter().map(|c| c.key()).collect()
            }
            Hover::ArcHovered { source, target } => graph
                .find(source, target)
                .map(|c| c.key())
                .into_iter()
                .collect(),
        };
        tracing::debug!(
            hover = ?self.hover,
            highlighted = self.highlighted.len(),
            "highlight updated"
        );
    }

    /// Highlighted edges, nearest to the hovered tower first.
    pub fn highlighted(&self) -> impl ExactSizeIterator<Item = &EdgeKey> {
        self.highlighted.iter()
    }

    pub fn is_highlighted(&self, key: &EdgeKey) -> bool {
        self.highlighted.contains(key)
    }

    /// Whether the tower for `name` is the hover target or an endpoint of the hovered arc.
    pub fn is_emphasized(&self, name: &str) -> bool {
        match &self.hover {
            Hover::Idle => false,
            Hover::TowerHovered { name: hovered } => hovered == name,
            Hover::ArcHovered { source, target } => source == name || target == name,
        }
    }
}
