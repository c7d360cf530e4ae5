//! Orchestration of a flow against a player roster and game state.
//!
//! The engine owns the mutable game state and forwards it into every
//! callback. Callbacks request advancement through their [`Context`]
//! instead of calling back into the engine; after each flow step the engine
//! keeps stepping while an advance is pending (a trampoline), so chains of
//! auto-advancing nodes never grow the call stack.
//!
//! [`Context`]: crate::core::context::Context

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::core::builder::FlowBuilder;
use crate::core::context::Signals;
use crate::core::error::FlowError;
use crate::core::flow::Flow;
use crate::core::node::FlowNode;
use crate::core::player::{Player, find_player};
use crate::io::config::EngineConfig;

/// Where the game stands after an external `start`/`next`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// The flow stopped on a node and waits for the next external advance.
    Waiting,
    /// A callback (or the host) declared the game over.
    GameOver,
}

type StepFn<S, A> = fn(&mut Flow<S, A>, &mut S, &[Player<A>]) -> Result<Signals>;

pub struct Engine<S, A = ()> {
    config: EngineConfig,
    players: Vec<Player<A>>,
    state: S,
    flow: Option<Flow<S, A>>,
    over: bool,
}

impl<S, A> Engine<S, A> {
    pub fn new(players: Vec<Player<A>>, state: S) -> Self {
        Self {
            config: EngineConfig::default(),
            players,
            state,
            flow: None,
            over: false,
        }
    }

    pub fn with_config(config: EngineConfig, players: Vec<Player<A>>, state: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(players, state)
        })
    }

    /// Build the flow. Replaces any previously defined flow.
    pub fn define_flow<F>(&mut self, define: F) -> Result<()>
    where
        A: Clone,
        F: FnOnce(&mut FlowBuilder<S, A>) -> Result<()>,
    {
        let mut builder = FlowBuilder::with_players(self.players.clone());
        define(&mut builder)?;
        let flow = builder.build()?;
        debug!(tree = %flow.render_tree(), "flow defined");
        self.flow = Some(flow);
        self.over = false;
        Ok(())
    }

    /// Start a new game at the first root.
    pub fn start(&mut self) -> Result<Status> {
        self.over = false;
        self.drive(Flow::start)
    }

    /// Advance the game by one external step.
    ///
    /// After game over this is a no-op; call `start` to play again.
    pub fn next(&mut self) -> Result<Status> {
        if self.flow.is_none() {
            return Err(FlowError::NotDefined.into());
        }
        if self.over {
            warn!("next called after game over, ignoring");
            return Ok(Status::GameOver);
        }
        self.drive(Flow::next)
    }

    /// Declare the game over from outside a callback.
    pub fn game_over(&mut self) {
        if !self.over {
            info!("game over");
        }
        self.over = true;
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    /// The player owning the current node; `None` before `start` or when the
    /// node has no player.
    pub fn current_player(&self) -> Result<Option<&Player<A>>> {
        let flow = self.flow()?;
        Ok(flow
            .current_player_id()
            .and_then(|player_id| find_player(&self.players, player_id)))
    }

    pub fn current_node(&self) -> Result<&FlowNode> {
        self.flow()?.current_node()
    }

    pub fn flow(&self) -> Result<&Flow<S, A>> {
        self.flow
            .as_ref()
            .ok_or_else(|| FlowError::NotDefined.into())
    }

    pub fn players(&self) -> &[Player<A>] {
        &self.players
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    pub fn into_state(self) -> S {
        self.state
    }

    fn drive(&mut self, step: StepFn<S, A>) -> Result<Status> {
        let flow = self.flow.as_mut().ok_or(FlowError::NotDefined)?;
        let mut signals = step(flow, &mut self.state, &self.players)?;

        let mut auto_steps = 0u32;
        while signals.advance && !signals.game_over {
            if auto_steps >= self.config.max_auto_advance {
                return Err(FlowError::AutoAdvanceLimit {
                    limit: self.config.max_auto_advance,
                }
                .into());
            }
            auto_steps += 1;
            debug!(auto_steps, "auto-advancing");
            signals = flow.next(&mut self.state, &self.players)?;
        }

        if signals.game_over {
            self.game_over();
            return Ok(Status::GameOver);
        }
        Ok(Status::Waiting)
    }
}
