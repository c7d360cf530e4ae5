//! Incremental construction of a flow forest.
//!
//! Nodes are declared children first: `node` returns a handle that is then
//! passed into the parent's `node` call. Any node that never ends up as
//! someone's child becomes a root, in declaration order.

use std::collections::HashSet;

use anyhow::Result;
use tracing::debug;

use crate::core::context::Context;
use crate::core::error::FlowError;
use crate::core::flow::Flow;
use crate::core::ids::{ActionId, CallbackId, CleanupId, generate_node_id};
use crate::core::invariants::validate_invariants;
use crate::core::node::{FlowNode, NodeConfig, NodeHandle};
use crate::core::player::Player;
use crate::core::registry::Registry;

pub struct FlowBuilder<S, A = ()> {
    nodes: Vec<FlowNode>,
    registry: Registry<S, A>,
    players: Vec<Player<A>>,
}

impl<S, A> Default for FlowBuilder<S, A> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            registry: Registry::new(),
            players: Vec::new(),
        }
    }
}

impl<S, A> FlowBuilder<S, A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder aware of the roster, for [`FlowBuilder::for_each_player`].
    pub fn with_players(players: Vec<Player<A>>) -> Self {
        Self {
            players,
            ..Self::default()
        }
    }

    pub fn players(&self) -> &[Player<A>] {
        &self.players
    }

    /// Declare a node owning `children`.
    pub fn node(&mut self, config: NodeConfig, children: Vec<NodeHandle>) -> NodeHandle {
        let handle = NodeHandle(self.nodes.len());
        let node = FlowNode {
            id: config.id.unwrap_or_else(generate_node_id),
            player_id: config.player_id,
            actions: config.actions,
            cleanups: config.cleanups,
            children,
        };
        debug!(node = %node.id, children = node.children.len(), "declared node");
        self.nodes.push(node);
        handle
    }

    /// Declare a leaf without children.
    pub fn leaf(&mut self, config: NodeConfig) -> NodeHandle {
        self.node(config, Vec::new())
    }

    /// Declare one leaf per player, in roster order. `config_for` receives
    /// each player; the resulting config is owned by that player.
    pub fn for_each_player<F>(&mut self, mut config_for: F) -> Vec<NodeHandle>
    where
        F: FnMut(&Player<A>) -> NodeConfig,
    {
        let configs: Vec<NodeConfig> = self
            .players
            .iter()
            .map(|player| {
                let mut config = config_for(player);
                config.player_id = Some(player.id.clone());
                config
            })
            .collect();
        configs.into_iter().map(|config| self.leaf(config)).collect()
    }

    /// Register an action under a stable name.
    pub fn action<F>(&mut self, name: &str, action: F) -> ActionId
    where
        F: Fn(&mut Context<'_, S, A>) -> Result<()> + 'static,
    {
        self.registry.insert_action(CallbackId::named(name), action)
    }

    /// Register an action under an id derived from `source`; identical
    /// source text shares one registry entry.
    pub fn action_from_source<F>(&mut self, source: &str, action: F) -> ActionId
    where
        F: Fn(&mut Context<'_, S, A>) -> Result<()> + 'static,
    {
        self.registry
            .insert_action(CallbackId::from_source(source), action)
    }

    pub fn cleanup<F>(&mut self, name: &str, cleanup: F) -> CleanupId
    where
        F: Fn(&mut Context<'_, S, A>) -> Result<()> + 'static,
    {
        self.registry.insert_cleanup(CallbackId::named(name), cleanup)
    }

    pub fn cleanup_from_source<F>(&mut self, source: &str, cleanup: F) -> CleanupId
    where
        F: Fn(&mut Context<'_, S, A>) -> Result<()> + 'static,
    {
        self.registry
            .insert_cleanup(CallbackId::from_source(source), cleanup)
    }

    /// Validate the declared nodes and resolve roots.
    ///
    /// A forest without roots builds fine; `Flow::start` rejects it.
    pub fn build(self) -> Result<Flow<S, A>> {
        let errors = validate_invariants(&self.nodes);
        if !errors.is_empty() {
            return Err(FlowError::InvalidFlow(errors).into());
        }
        let roots = resolve_roots(&self.nodes);
        debug!(nodes = self.nodes.len(), roots = roots.len(), "built flow");
        Ok(Flow::new(self.nodes, roots, self.registry))
    }
}

/// Nodes never reachable as a descendant of another node, in declaration order.
fn resolve_roots(nodes: &[FlowNode]) -> Vec<NodeHandle> {
    let mut descendants = HashSet::new();
    for node in nodes {
        collect_descendants(nodes, &node.children, &mut descendants);
    }
    (0..nodes.len())
        .map(NodeHandle)
        .filter(|handle| !descendants.contains(handle))
        .collect()
}

fn collect_descendants(nodes: &[FlowNode], children: &[NodeHandle], out: &mut HashSet<NodeHandle>) {
    for child in children {
        if out.insert(*child) {
            collect_descendants(nodes, &nodes[child.index()].children, out);
        }
    }
}
