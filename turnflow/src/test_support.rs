//! Test-only helpers: a string log as game state and actions that append to it.

use anyhow::Result;

use crate::core::context::Context;
use crate::core::player::Player;

/// Game state used by tests: every callback appends a line.
pub type Log = Vec<String>;

/// Players with the given ids and no attributes.
pub fn players(ids: &[&str]) -> Vec<Player> {
    ids.iter().map(|id| Player::new(*id, ())).collect()
}

/// Action or cleanup that appends `label`.
pub fn record(label: &str) -> impl Fn(&mut Context<'_, Log>) -> Result<()> + 'static {
    let label = label.to_string();
    move |ctx: &mut Context<'_, Log>| {
        ctx.state_mut().push(label.clone());
        Ok(())
    }
}

/// Like [`record`], then requests the next step (auto-advance).
pub fn record_and_advance(label: &str) -> impl Fn(&mut Context<'_, Log>) -> Result<()> + 'static {
    let label = label.to_string();
    move |ctx: &mut Context<'_, Log>| {
        ctx.state_mut().push(label.clone());
        ctx.next();
        Ok(())
    }
}

/// Appends `label` followed by the current player's id, or `-`.
pub fn record_player(label: &str) -> impl Fn(&mut Context<'_, Log>) -> Result<()> + 'static {
    let label = label.to_string();
    move |ctx: &mut Context<'_, Log>| {
        let player = ctx
            .current_player()
            .map(|p| p.id.clone())
            .unwrap_or_else(|| "-".to_string());
        ctx.state_mut().push(format!("{label}:{player}"));
        Ok(())
    }
}
