//! Traversal stack: the current root-to-node path plus pending siblings.

use crate::core::node::NodeHandle;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TraversalStack {
    items: Vec<NodeHandle>,
}

impl TraversalStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `handles` so that the first one ends up on top.
    pub fn push_in_order(&mut self, handles: &[NodeHandle]) {
        self.items.extend(handles.iter().rev().copied());
    }

    pub fn peek(&self) -> Option<NodeHandle> {
        self.items.last().copied()
    }

    pub fn pop(&mut self) -> Option<NodeHandle> {
        self.items.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Bottom-to-top iteration.
    pub fn iter(&self) -> impl Iterator<Item = NodeHandle> + '_ {
        self.items.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_in_order_leaves_first_handle_on_top() {
        let mut stack = TraversalStack::new();
        stack.push_in_order(&[NodeHandle(0), NodeHandle(1), NodeHandle(2)]);
        assert_eq!(stack.pop(), Some(NodeHandle(0)));
        assert_eq!(stack.pop(), Some(NodeHandle(1)));
        assert_eq!(stack.pop(), Some(NodeHandle(2)));
        assert_eq!(stack.pop(), None);
        assert!(stack.is_empty());
    }
}
