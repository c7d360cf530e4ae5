//! Turn-flow engine for turn-based games.
//!
//! A game describes "what happens in what order" as a forest of flow nodes
//! (rounds, turns, per-player steps). The engine walks that forest depth
//! first, one step per advance, running each node's actions on entry and
//! its cleanups on exit, and starts over when the forest is exhausted.
//!
//! - **[`core`]**: Pure, deterministic logic (nodes, builder, traversal,
//!   callback registry). No I/O, fully testable in isolation.
//! - **[`io`]**: Loading and storing configuration and flow definitions.
//!
//! [`engine`] ties a built flow to a player roster and the game state and
//! drives auto-advancing nodes.

pub mod core;
pub mod engine;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use crate::core::builder::FlowBuilder;
pub use crate::core::context::{Context, Signals};
pub use crate::core::definition::{FlowDefinition, NodeDefinition};
pub use crate::core::error::FlowError;
pub use crate::core::flow::{Flow, FlowPhase};
pub use crate::core::ids::{ActionId, CallbackId, CleanupId};
pub use crate::core::node::{FlowNode, NodeConfig, NodeHandle};
pub use crate::core::player::Player;
pub use crate::engine::{Engine, Status};
pub use crate::io::config::EngineConfig;
