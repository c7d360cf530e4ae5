//! Flow node types.

use crate::core::ids::{ActionId, CleanupId};

/// Index of a node in the builder's arena.
///
/// Handles are only produced by [`FlowBuilder::node`](crate::core::builder::FlowBuilder::node),
/// so a child handle always refers to a node created before its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(pub(crate) usize);

impl NodeHandle {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// One step of the flow: a round, a turn, a phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowNode {
    pub id: String,
    pub player_id: Option<String>,
    /// Run in order on entry, one per advance.
    pub actions: Vec<ActionId>,
    /// Run in order when the node is permanently exited.
    pub cleanups: Vec<CleanupId>,
    pub children: Vec<NodeHandle>,
}

impl FlowNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Declarative description of a node passed to the builder.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeConfig {
    /// Generated when `None`.
    pub id: Option<String>,
    pub player_id: Option<String>,
    pub actions: Vec<ActionId>,
    pub cleanups: Vec<CleanupId>,
}

impl NodeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn player(mut self, player_id: impl Into<String>) -> Self {
        self.player_id = Some(player_id.into());
        self
    }

    pub fn action(mut self, action: ActionId) -> Self {
        self.actions.push(action);
        self
    }

    pub fn cleanup(mut self, cleanup: CleanupId) -> Self {
        self.cleanups.push(cleanup);
        self
    }
}
