//! The value handed to every action and cleanup.

use crate::core::node::FlowNode;
use crate::core::player::{Player, find_player};

/// Requests recorded by callbacks during one flow step.
///
/// Callbacks never re-enter the flow; the engine reads these after the step
/// returns and keeps stepping while `advance` is set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Signals {
    pub advance: bool,
    pub game_over: bool,
}

impl Signals {
    pub(crate) fn merge(&mut self, other: Signals) {
        self.advance |= other.advance;
        self.game_over |= other.game_over;
    }
}

pub struct Context<'a, S, A = ()> {
    state: &'a mut S,
    players: &'a [Player<A>],
    node: &'a FlowNode,
    signals: &'a mut Signals,
}

impl<'a, S, A> Context<'a, S, A> {
    pub(crate) fn new(
        state: &'a mut S,
        players: &'a [Player<A>],
        node: &'a FlowNode,
        signals: &'a mut Signals,
    ) -> Self {
        Self {
            state,
            players,
            node,
            signals,
        }
    }

    pub fn state(&self) -> &S {
        &*self.state
    }

    pub fn state_mut(&mut self) -> &mut S {
        &mut *self.state
    }

    /// Request the next step. Repeated calls within one callback collapse
    /// into a single advance.
    pub fn next(&mut self) {
        self.signals.advance = true;
    }

    pub fn game_over(&mut self) {
        self.signals.game_over = true;
    }

    /// The player owning the node being run, if any.
    pub fn current_player(&self) -> Option<&Player<A>> {
        let player_id = self.node.player_id.as_deref()?;
        find_player(self.players, player_id)
    }

    pub fn node_id(&self) -> &str {
        &self.node.id
    }

    pub fn players(&self) -> &[Player<A>] {
        self.players
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn_node(player_id: Option<&str>) -> FlowNode {
        FlowNode {
            id: "turn".to_string(),
            player_id: player_id.map(str::to_string),
            actions: Vec::new(),
            cleanups: Vec::new(),
            children: Vec::new(),
        }
    }

    #[test]
    fn current_player_resolves_against_roster() {
        let players = vec![Player::new("x", ()), Player::new("o", ())];
        let node = turn_node(Some("o"));
        let mut state = 0u32;
        let mut signals = Signals::default();
        let ctx = Context::new(&mut state, &players, &node, &mut signals);
        assert_eq!(ctx.current_player().map(|p| p.id.as_str()), Some("o"));
    }

    #[test]
    fn current_player_is_none_for_unowned_or_unknown_player() {
        let players = vec![Player::new("x", ())];
        let mut state = 0u32;
        let mut signals = Signals::default();

        let node = turn_node(None);
        let ctx = Context::new(&mut state, &players, &node, &mut signals);
        assert!(ctx.current_player().is_none());

        let node = turn_node(Some("ghost"));
        let ctx = Context::new(&mut state, &players, &node, &mut signals);
        assert!(ctx.current_player().is_none());
    }

    #[test]
    fn next_and_game_over_only_record_signals() {
        let players: Vec<Player> = Vec::new();
        let node = turn_node(None);
        let mut state = 0u32;
        let mut signals = Signals::default();
        {
            let mut ctx = Context::new(&mut state, &players, &node, &mut signals);
            ctx.next();
            ctx.next();
            *ctx.state_mut() += 1;
            ctx.game_over();
        }
        assert_eq!(
            signals,
            Signals {
                advance: true,
                game_over: true
            }
        );
        assert_eq!(state, 1);
    }
}
