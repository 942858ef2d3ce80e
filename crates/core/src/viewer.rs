//! The application state behind one city view.

use citysheet_dag::{DependencyGraph, EdgeKey};
use citysheet_sheet::SheetSnapshot;
use citysheet_viz::{AnimationPhase, Composer, HighlightState, Hover, HoverEvent, Layer};
use std::sync::Arc;

/// Snapshot, derived graph, hover state and the layers composed from them.
///
/// Every mutation recomposes the layer list before returning, so `layers()`
/// always reflects the current state.
#[derive(Debug)]
pub struct Viewer {
    snapshot: Arc<SheetSnapshot>,
    graph: DependencyGraph,
    highlight: HighlightState,
    phase: AnimationPhase,
    composer: Composer,
    layers: Arc<Vec<Layer>>,
}

impl Viewer {
    /// Build the graph for `snapshot` and compose the first frame.
    pub fn new(snapshot: SheetSnapshot) -> Self {
        let snapshot = Arc::new(snapshot);
        let graph = DependencyGraph::build(&snapshot);
        let mut viewer = Self {
            snapshot,
            graph,
            highlight: HighlightState::new(),
            phase: AnimationPhase::PreAnimation,
            composer: Composer::new(),
            layers: Arc::new(Vec::new()),
        };
        viewer.recompose();
        viewer
    }

    /// Apply a hover event. Returns `false` (and keeps the current layers)
    /// when the event targets what is already hovered.
    pub fn handle_hover(&mut self, event: HoverEvent) -> bool {
        if !self.highlight.apply(event, &self.graph) {
            return false;
        }
        self.recompose();
        true
    }

    /// Raise the towers. Only the first call has an effect.
    pub fn finish_animation(&mut self) -> bool {
        if self.phase == AnimationPhase::PostAnimation {
            return false;
        }
        self.phase = AnimationPhase::PostAnimation;
        tracing::debug!("tower animation finished");
        self.recompose();
        true
    }

    /// Replace the snapshot wholesale. The hover target is kept and its
    /// highlighted edges are recomputed against the new graph.
    pub fn reload(&mut self, snapshot: SheetSnapshot) {
        self.snapshot = Arc::new(snapshot);
        self.graph = DependencyGraph::build(&self.snapshot);
        self.highlight.rederive(&self.graph);
        self.recompose();
    }

    fn recompose(&mut self) {
        self.layers = Arc::new(self.composer.compose(
            &self.snapshot,
            &self.graph,
            &self.highlight,
            self.phase,
        ));
    }

    pub fn layers(&self) -> Arc<Vec<Layer>> {
        Arc::clone(&self.layers)
    }

    pub fn snapshot(&self) -> &SheetSnapshot {
        &self.snapshot
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn hover(&self) -> &Hover {
        self.highlight.hover()
    }

    pub fn highlighted(&self) -> Vec<EdgeKey> {
        self.highlight.highlighted().cloned().collect()
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }
}
