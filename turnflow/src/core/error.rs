//! Typed failures raised by the flow and the engine.
//!
//! Operations return `anyhow::Result`; callers that need to react to a
//! specific condition use `err.downcast_ref::<FlowError>()`.

use std::error::Error;
use std::fmt;

use crate::core::ids::CallbackId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// The engine was used before `define_flow`.
    NotDefined,
    /// `start` on a forest without roots.
    EmptyFlow,
    /// `current_node` before `start`.
    NotStarted,
    UnknownAction(CallbackId),
    UnknownCleanup(CallbackId),
    /// Builder invariant violations, one message per violation.
    InvalidFlow(Vec<String>),
    /// Consecutive auto-advance steps exceeded the configured bound.
    AutoAdvanceLimit { limit: u32 },
}

impl fmt::Display for FlowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowError::NotDefined => {
                write!(f, "define_flow must be called before using the engine")
            }
            FlowError::EmptyFlow => write!(f, "cannot start a flow without nodes"),
            FlowError::NotStarted => write!(f, "flow has not been started"),
            FlowError::UnknownAction(id) => write!(f, "no action registered for id '{id}'"),
            FlowError::UnknownCleanup(id) => write!(f, "no cleanup registered for id '{id}'"),
            FlowError::InvalidFlow(errors) => {
                write!(f, "invalid flow:\n- {}", errors.join("\n- "))
            }
            FlowError::AutoAdvanceLimit { limit } => {
                write!(f, "auto-advance exceeded {limit} consecutive steps")
            }
        }
    }
}

impl Error for FlowError {}
