//! Structural invariants of a declared forest.

use std::collections::{HashMap, HashSet};

use crate::core::node::FlowNode;

/// Check the arena produced by the builder:
/// - No empty or duplicate ids (re-entry detection compares ids)
/// - Every child was created before its parent (no foreign handles, no cycles)
/// - Every node has at most one parent
pub fn validate_invariants(nodes: &[FlowNode]) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    let mut parents: HashMap<usize, &str> = HashMap::new();

    for (index, node) in nodes.iter().enumerate() {
        if node.id.trim().is_empty() {
            errors.push(format!("node #{index}: id must not be empty"));
        } else if !seen.insert(node.id.as_str()) {
            errors.push(format!("duplicate id '{}'", node.id));
        }

        for child in &node.children {
            let child_index = child.index();
            if child_index >= index {
                errors.push(format!(
                    "{}: child handle #{} was not created before its parent",
                    node.id, child_index
                ));
                continue;
            }
            if let Some(previous) = parents.insert(child_index, node.id.as_str()) {
                errors.push(format!(
                    "'{}' is a child of both '{}' and '{}'",
                    nodes[child_index].id, previous, node.id
                ));
            }
        }
    }

    errors
}
