//! Helpers for rendering deterministic node paths and outlines.

use std::collections::HashSet;

use crate::core::node::{FlowNode, NodeHandle};
use crate::core::stack::TraversalStack;

/// Return the `/`-separated ids of the entered nodes on the stack.
///
/// Pending siblings sit on the stack too but have not been entered yet, so
/// only visited entries belong to the path.
pub fn active_path(nodes: &[FlowNode], stack: &TraversalStack, visited: &HashSet<String>) -> String {
    stack
        .iter()
        .map(|handle| nodes[handle.index()].id.as_str())
        .filter(|id| visited.contains(*id))
        .collect::<Vec<_>>()
        .join("/")
}

/// Render the forest one node per line, children indented under parents.
pub fn render_tree(nodes: &[FlowNode], roots: &[NodeHandle]) -> String {
    let mut lines = Vec::new();
    for root in roots {
        render_inner(nodes, *root, 0, &mut lines);
    }
    lines.join("\n")
}

fn render_inner(nodes: &[FlowNode], handle: NodeHandle, depth: usize, lines: &mut Vec<String>) {
    let node = &nodes[handle.index()];
    let mut line = format!("{}{}", "  ".repeat(depth), node.id);
    if let Some(player_id) = &node.player_id {
        line.push_str(&format!(" [player={player_id}]"));
    }
    if !node.actions.is_empty() {
        let actions: Vec<&str> = node.actions.iter().map(|id| id.as_str()).collect();
        line.push_str(&format!(" actions={}", actions.join(",")));
    }
    if !node.cleanups.is_empty() {
        let cleanups: Vec<&str> = node.cleanups.iter().map(|id| id.as_str()).collect();
        line.push_str(&format!(" cleanups={}", cleanups.join(",")));
    }
    lines.push(line);
    for child in &node.children {
        render_inner(nodes, *child, depth + 1, lines);
    }
}
