use crate::Connection;
use std::collections::{HashMap, HashSet};

/// Return every edge on a chain of dependencies that reaches `target`.
///
/// Edges into the target come first, then the edges into each of their
/// sources, depth first in connection order. Each node is expanded at most
/// once, so cyclic `used_by` relations terminate and no edge is repeated.
pub fn find_ancestor_edges<'a>(
    connections: &'a [Connection],
    target: &str,
) -> Vec<&'a Connection> {
    let mut incoming: HashMap<&str, Vec<&'a Connection>> = HashMap::new();
    for conn in connections {
        incoming
            .entry(conn.target.name.as_str())
            .or_default()
            .push(conn);
    }

    let mut found = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack: Vec<&str> = vec![target];

    while let Some(node) = stack.pop() {
        if !visited.insert(node) {
            continue;
        }
        let Some(edges) = incoming.get(node) else {
            continue;
        };
        found.extend(edges.iter().copied());

        // Reversed so the first source is expanded first.
        for edge in edges.iter().rev() {
            let source = edge.source.name.as_str();
            if !visited.contains(source) {
                stack.push(source);
            }
        }
    }

    found
}
