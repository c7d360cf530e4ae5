//! Deterministic, pure logic of the turn flow.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and only reach game code through registered callbacks.

pub mod builder;
pub mod context;
pub mod definition;
pub mod error;
pub mod flow;
pub mod ids;
pub mod invariants;
pub mod node;
pub mod path;
pub mod player;
pub mod registry;
pub mod stack;
