//! Depth-first traversal of the flow forest.
//!
//! One call to [`Flow::start`] or [`Flow::next`] performs exactly one step:
//! run the next queued action of the current node, descend into its
//! children, or exit it and move to the next unvisited sibling. Exhausting
//! the forest restarts it from the first root, so a flow never ends on its
//! own; ending the game is a signal raised by callbacks.
//!
//! The visited-id ledger tells an ancestor resurfacing on the stack (already
//! entered this pass, so it must be closed as well) apart from a fresh
//! sibling (not yet entered, so it is entered now).

use std::collections::{HashSet, VecDeque};

use anyhow::{Context as _, Result};
use tracing::debug;

use crate::core::context::{Context, Signals};
use crate::core::error::FlowError;
use crate::core::ids::ActionId;
use crate::core::node::{FlowNode, NodeHandle};
use crate::core::path;
use crate::core::player::Player;
use crate::core::registry::Registry;
use crate::core::stack::TraversalStack;

/// Traversal state, see [`Flow::phase`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowPhase {
    /// Never started.
    Idle,
    /// A node is current and all of its actions have run.
    Active,
    /// A node is current and still has queued actions.
    BetweenActions,
}

pub struct Flow<S, A = ()> {
    nodes: Vec<FlowNode>,
    roots: Vec<NodeHandle>,
    registry: Registry<S, A>,
    stack: TraversalStack,
    visited: HashSet<String>,
    pending: VecDeque<ActionId>,
    /// Node whose cleanups failed part-way, and the index of the cleanup to
    /// resume at.
    exiting: Option<(NodeHandle, usize)>,
    cycles: u64,
}

impl<S, A> Flow<S, A> {
    pub(crate) fn new(nodes: Vec<FlowNode>, roots: Vec<NodeHandle>, registry: Registry<S, A>) -> Self {
        Self {
            nodes,
            roots,
            registry,
            stack: TraversalStack::new(),
            visited: HashSet::new(),
            pending: VecDeque::new(),
            exiting: None,
            cycles: 0,
        }
    }

    /// Begin a traversal pass at the first root.
    ///
    /// Clears the stack and the visited ledger, so calling it on a running
    /// flow starts over without running cleanups of the abandoned path.
    pub fn start(&mut self, state: &mut S, players: &[Player<A>]) -> Result<Signals> {
        let mut signals = Signals::default();
        self.restart(state, players, &mut signals)?;
        Ok(signals)
    }

    /// Advance by one step.
    pub fn next(&mut self, state: &mut S, players: &[Player<A>]) -> Result<Signals> {
        let mut signals = Signals::default();

        if let Some((handle, _)) = self.exiting {
            debug!(node = %self.nodes[handle.index()].id, "resuming interrupted exit");
            self.exit(handle, state, players, &mut signals)?;
            self.close_finished_and_enter(state, players, &mut signals)?;
            return Ok(signals);
        }

        let Some(current) = self.stack.peek() else {
            debug!("traversal exhausted, restarting");
            self.restart(state, players, &mut signals)?;
            return Ok(signals);
        };

        if !self.pending.is_empty() {
            self.run_pending(state, players, &mut signals)?;
            return Ok(signals);
        }

        if !self.nodes[current.index()].children.is_empty() {
            self.stack
                .push_in_order(&self.nodes[current.index()].children);
            debug!(node = %self.nodes[current.index()].id, "descending");
            self.enter_top(state, players, &mut signals)?;
            return Ok(signals);
        }

        self.exit(current, state, players, &mut signals)?;
        self.close_finished_and_enter(state, players, &mut signals)?;
        Ok(signals)
    }

    /// The node at the top of the traversal stack.
    pub fn current_node(&self) -> Result<&FlowNode> {
        let handle = self.stack.peek().ok_or(FlowError::NotStarted)?;
        Ok(&self.nodes[handle.index()])
    }

    /// `player_id` of the current node, `None` before `start` or for
    /// nodes without a player.
    pub fn current_player_id(&self) -> Option<&str> {
        let handle = self.stack.peek()?;
        self.nodes[handle.index()].player_id.as_deref()
    }

    pub fn phase(&self) -> FlowPhase {
        if self.stack.is_empty() {
            FlowPhase::Idle
        } else if self.pending.is_empty() {
            FlowPhase::Active
        } else {
            FlowPhase::BetweenActions
        }
    }

    /// Number of traversal passes begun, counting the initial `start`.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// `/`-joined ids from the current root down to the current node.
    pub fn active_path(&self) -> String {
        path::active_path(&self.nodes, &self.stack, &self.visited)
    }

    /// Indented outline of the forest.
    pub fn render_tree(&self) -> String {
        path::render_tree(&self.nodes, &self.roots)
    }

    pub fn roots(&self) -> impl Iterator<Item = &FlowNode> + '_ {
        self.roots.iter().map(|handle| &self.nodes[handle.index()])
    }

    pub fn node(&self, handle: NodeHandle) -> Option<&FlowNode> {
        self.nodes.get(handle.index())
    }

    pub fn find(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn registry(&self) -> &Registry<S, A> {
        &self.registry
    }

    fn restart(&mut self, state: &mut S, players: &[Player<A>], signals: &mut Signals) -> Result<()> {
        if self.roots.is_empty() {
            return Err(FlowError::EmptyFlow.into());
        }
        self.stack.clear();
        self.visited.clear();
        self.pending.clear();
        self.exiting = None;
        self.cycles += 1;
        debug!(cycle = self.cycles, roots = self.roots.len(), "starting traversal");
        self.stack.push_in_order(&self.roots);
        self.enter_top(state, players, signals)
    }

    /// Mark the top node visited, queue its actions and run the first one.
    fn enter_top(&mut self, state: &mut S, players: &[Player<A>], signals: &mut Signals) -> Result<()> {
        let handle = self.stack.peek().ok_or(FlowError::NotStarted)?;
        let node = &self.nodes[handle.index()];
        self.visited.insert(node.id.clone());
        self.pending = node.actions.iter().cloned().collect();
        debug!(
            node = %node.id,
            player = node.player_id.as_deref().unwrap_or("-"),
            actions = node.actions.len(),
            "entered node"
        );
        self.run_pending(state, players, signals)
    }

    fn run_pending(&mut self, state: &mut S, players: &[Player<A>], signals: &mut Signals) -> Result<()> {
        let Some(action_id) = self.pending.pop_front() else {
            return Ok(());
        };
        let handle = self.stack.peek().ok_or(FlowError::NotStarted)?;
        let node = &self.nodes[handle.index()];
        let action = self.registry.action(&action_id)?;
        debug!(node = %node.id, action = %action_id, "running action");

        let mut raised = Signals::default();
        let mut ctx = Context::new(state, players, node, &mut raised);
        action(&mut ctx).with_context(|| format!("action '{action_id}' on node '{}'", node.id))?;
        signals.merge(raised);
        Ok(())
    }

    /// After an exit: close every visited node now on top (all of its
    /// children are done), then enter the next sibling or restart.
    fn close_finished_and_enter(
        &mut self,
        state: &mut S,
        players: &[Player<A>],
        signals: &mut Signals,
    ) -> Result<()> {
        loop {
            let Some(top) = self.stack.peek() else {
                debug!("traversal exhausted, restarting");
                return self.restart(state, players, signals);
            };
            if !self.visited.contains(&self.nodes[top.index()].id) {
                break;
            }
            self.exit(top, state, players, signals)?;
        }
        self.enter_top(state, players, signals)
    }

    /// Run the node's cleanups in order, then pop it.
    ///
    /// A failing cleanup leaves the node on the stack and records where to
    /// resume; cleanups that already succeeded are not run again.
    fn exit(
        &mut self,
        handle: NodeHandle,
        state: &mut S,
        players: &[Player<A>],
        signals: &mut Signals,
    ) -> Result<()> {
        let resume_at = match self.exiting {
            Some((exiting, index)) if exiting == handle => index,
            _ => 0,
        };
        let node = &self.nodes[handle.index()];
        for (index, cleanup_id) in node.cleanups.iter().enumerate().skip(resume_at) {
            self.exiting = Some((handle, index));
            let cleanup = self.registry.cleanup(cleanup_id)?;
            let mut raised = Signals::default();
            let mut ctx = Context::new(&mut *state, players, node, &mut raised);
            cleanup(&mut ctx)
                .with_context(|| format!("cleanup '{cleanup_id}' on node '{}'", node.id))?;
            signals.merge(raised);
        }
        self.exiting = None;
        debug!(node = %node.id, "exited node");
        self.stack.pop();
        Ok(())
    }
}
