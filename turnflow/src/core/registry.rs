//! Side table mapping callback ids to executable callbacks.

use std::collections::HashMap;

use anyhow::Result;
use tracing::debug;

use crate::core::context::Context;
use crate::core::error::FlowError;
use crate::core::ids::{ActionId, CleanupId};

pub type Action<S, A> = Box<dyn Fn(&mut Context<'_, S, A>) -> Result<()>>;
pub type Cleanup<S, A> = Box<dyn Fn(&mut Context<'_, S, A>) -> Result<()>>;

pub struct Registry<S, A = ()> {
    actions: HashMap<ActionId, Action<S, A>>,
    cleanups: HashMap<CleanupId, Cleanup<S, A>>,
}

impl<S, A> Default for Registry<S, A> {
    fn default() -> Self {
        Self {
            actions: HashMap::new(),
            cleanups: HashMap::new(),
        }
    }
}

impl<S, A> Registry<S, A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `action` under `id`. A later registration under the same id
    /// replaces the earlier one.
    pub fn insert_action<F>(&mut self, id: ActionId, action: F) -> ActionId
    where
        F: Fn(&mut Context<'_, S, A>) -> Result<()> + 'static,
    {
        if self.actions.insert(id.clone(), Box::new(action)).is_some() {
            debug!(action = %id, "replaced registered action");
        }
        id
    }

    pub fn insert_cleanup<F>(&mut self, id: CleanupId, cleanup: F) -> CleanupId
    where
        F: Fn(&mut Context<'_, S, A>) -> Result<()> + 'static,
    {
        if self.cleanups.insert(id.clone(), Box::new(cleanup)).is_some() {
            debug!(cleanup = %id, "replaced registered cleanup");
        }
        id
    }

    pub fn action(&self, id: &ActionId) -> Result<&Action<S, A>, FlowError> {
        self.actions
            .get(id)
            .ok_or_else(|| FlowError::UnknownAction(id.clone()))
    }

    pub fn cleanup(&self, id: &CleanupId) -> Result<&Cleanup<S, A>, FlowError> {
        self.cleanups
            .get(id)
            .ok_or_else(|| FlowError::UnknownCleanup(id.clone()))
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    pub fn cleanup_count(&self) -> usize {
        self.cleanups.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::CallbackId;

    #[test]
    fn same_source_registers_one_entry() {
        let mut registry: Registry<u32> = Registry::new();
        let first = registry.insert_action(CallbackId::from_source("bump"), |_| Ok(()));
        let second = registry.insert_action(CallbackId::from_source("bump"), |_| Ok(()));
        assert_eq!(first, second);
        assert_eq!(registry.action_count(), 1);
    }

    #[test]
    fn missing_ids_fail_loudly() {
        let registry: Registry<u32> = Registry::new();
        let err = registry
            .action(&CallbackId::named("ghost"))
            .err()
            .expect("lookup should fail");
        assert_eq!(err, FlowError::UnknownAction(CallbackId::named("ghost")));

        let err = registry
            .cleanup(&CallbackId::named("ghost"))
            .err()
            .expect("lookup should fail");
        assert_eq!(err, FlowError::UnknownCleanup(CallbackId::named("ghost")));
    }
}
