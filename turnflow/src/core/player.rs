/// A participant in the game. Nodes reference players by `id` only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player<A = ()> {
    pub id: String,
    pub attributes: A,
}

impl<A> Player<A> {
    pub fn new(id: impl Into<String>, attributes: A) -> Self {
        Self {
            id: id.into(),
            attributes,
        }
    }
}

/// Resolve `player_id` against a roster.
pub fn find_player<'a, A>(players: &'a [Player<A>], player_id: &str) -> Option<&'a Player<A>> {
    players.iter().find(|player| player.id == player_id)
}
