//! Tic-tac-toe played through the `turnflow` engine.
//!
//! Rounds and turns come from a flow definition (see `flow.toml`); the board
//! rules and move input live here.

pub mod board;
pub mod config;
pub mod exit_codes;
pub mod game;
pub mod moves;
