//! Dependency graph between the cells of a sheet snapshot.
//!
//! Edges follow the `used_by` relation: a connection runs from the cell that
//! provides a value to the cell that consumes it.

mod path;

pub use path::find_ancestor_edges;

use citysheet_sheet::{Point, SheetSnapshot};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Identity of a directed edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey {
    pub source: String,
    pub target: String,
}

impl EdgeKey {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// One end of a connection, resolved against the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub name: String,
    pub position: Point,
    pub weight: f64,
}

/// A resolved dependency edge from `source` to the cell that uses it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub source: Endpoint,
    pub target: Endpoint,
}

impl Connection {
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.source.name.clone(), self.target.name.clone())
    }

    pub fn matches(&self, source: &str, target: &str) -> bool {
        self.source.name == source && self.target.name == target
    }

    /// Planar distance between the two endpoint centers.
    pub fn distance(&self) -> f64 {
        let dx = self.target.position[0] - self.source.position[0];
        let dy = self.target.position[1] - self.source.position[1];
        dx.hypot(dy)
    }
}

/// All resolvable connections of a snapshot plus the extents used to
/// normalize arc heights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DependencyGraph {
    pub connections: Vec<Connection>,
    pub max_horizontal_span: f64,
    pub max_vertical_span: f64,
}

impl DependencyGraph {
    /// Derive the connections of a snapshot.
    ///
    /// Names in `used_by` that do not resolve to a cell are dropped. Repeated
    /// names produce a single connection.
    pub fn build(snapshot: &SheetSnapshot) -> Self {
        let mut graph = Self::default();
        let mut seen: HashSet<(&str, &str)> = HashSet::new();
        let mut dropped = 0usize;

        for cell in snapshot.cells() {
            for name in &cell.used_by {
                let Some(consumer) = snapshot.cell(name) else {
                    tracing::trace!(
                        source = %cell.name,
                        target = %name,
                        "dropping unresolved reference"
                    );
                    dropped += 1;
                    continue;
                };
                if !seen.insert((cell.name.as_str(), consumer.name.as_str())) {
                    continue;
                }

                let from = cell.center();
                let to = consumer.center();
                let (dx, dy) = ((to[0] - from[0]).abs(), (to[1] - from[1]).abs());
                graph.max_horizontal_span = graph.max_horizontal_span.max(dx);
                graph.max_vertical_span = graph.max_vertical_span.max(dy);

                graph.connections.push(Connection {
                    source: Endpoint {
                        name: cell.name.clone(),
                        position: from,
                        weight: cell.weight,
                    },
                    target: Endpoint {
                        name: consumer.name.clone(),
                        position: to,
                        weight: consumer.weight,
                    },
                });
            }
        }

        tracing::debug!(
            connections = graph.connections.len(),
            dropped,
            "built dependency graph"
        );
        graph
    }

    /// Diagonal of the largest horizontal and vertical spans.
    pub fn max_span(&self) -> f64 {
        self.max_horizontal_span.hypot(self.max_vertical_span)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn contains(&self, source: &str, target: &str) -> bool {
        self.find(source, target).is_some()
    }

    pub fn find(&self, source: &str, target: &str) -> Option<&Connection> {
        self.connections.iter().find(|c| c.matches(source, target))
    }

    /// Edges feeding `target`, directly or transitively.
    pub fn ancestors_of(&self, target: &str) -> Vec<&Connection> {
        find_ancestor_edges(&self.connections, target)
    }

    pub fn keys(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.connections.iter().map(Connection::key)
    }
}
