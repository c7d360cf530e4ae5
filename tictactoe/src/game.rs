//! Tic-tac-toe rules wired into a turn flow.
//!
//! The flow itself is data (`flow.toml` by default); this module supplies the
//! callbacks it names:
//!
//! - `announce-round`: prints the board and moves straight on to the first turn.
//! - `take-turn`: asks the current player for a move until one is legal, then
//!   hands over to the next turn unless the move ended the game.
//! - `end-round`: runs when every turn of a round is done.

use std::fmt;
use std::io::Write;

use anyhow::{Context as _, Result, anyhow, bail};
use tracing::{debug, info};
use turnflow::{Context, Engine, FlowBuilder, FlowDefinition, Status};

use crate::board::Board;
use crate::config::GameConfig;
use crate::moves::MoveSource;

pub const DEFAULT_FLOW: &str = include_str!("../flow.toml");

/// External steps allowed per game before giving up on a flow that never
/// asks for a move.
const MAX_STEPS: usize = 256;

/// Per-player attributes carried on the roster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerInfo {
    pub mark: char,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Winner(String),
    Draw,
    Abandoned,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Winner(id) => write!(f, "{id} wins"),
            Self::Draw => f.write_str("draw"),
            Self::Abandoned => f.write_str("abandoned"),
        }
    }
}

pub struct Game {
    pub board: Board,
    pub rounds: u32,
    pub outcome: Option<Outcome>,
    moves: Box<dyn MoveSource>,
    out: Box<dyn Write>,
}

impl Game {
    pub fn new(moves: Box<dyn MoveSource>, out: Box<dyn Write>) -> Self {
        Self {
            board: Board::new(),
            rounds: 0,
            outcome: None,
            moves,
            out,
        }
    }
}

type GameContext<'a> = Context<'a, Game, PlayerInfo>;

fn announce_round(ctx: &mut GameContext<'_>) -> Result<()> {
    let game = ctx.state_mut();
    game.rounds += 1;
    writeln!(game.out, "\nRound {}\n{}\n", game.rounds, game.board)?;
    ctx.next();
    Ok(())
}

fn take_turn(ctx: &mut GameContext<'_>) -> Result<()> {
    let player = ctx
        .current_player()
        .cloned()
        .ok_or_else(|| anyhow!("node '{}' has no player", ctx.node_id()))?;

    let game = ctx.state_mut();
    loop {
        let Some(mv) = game.moves.next_move(&player, &game.board)? else {
            writeln!(game.out, "\n{} left the game", player.id)?;
            game.outcome = Some(Outcome::Abandoned);
            ctx.game_over();
            return Ok(());
        };
        match game.board.place(player.attributes.mark, mv) {
            Ok(()) => {
                debug!(player = %player.id, %mv, "move placed");
                break;
            }
            Err(err) => writeln!(game.out, "{err}, try again")?,
        }
    }

    if game.board.winner().is_some() {
        game.outcome = Some(Outcome::Winner(player.id.clone()));
    } else if game.board.is_full() {
        game.outcome = Some(Outcome::Draw);
    }
    match &game.outcome {
        Some(outcome) => {
            writeln!(game.out, "\n{}\n\n{outcome}", game.board)?;
            ctx.game_over();
        }
        None => ctx.next(),
    }
    Ok(())
}

fn end_round(ctx: &mut GameContext<'_>) -> Result<()> {
    debug!(round = ctx.state().rounds, "round complete");
    Ok(())
}

/// Register every callback `flow.toml` may reference.
pub fn register(f: &mut FlowBuilder<Game, PlayerInfo>) {
    f.action("announce-round", announce_round);
    f.action("take-turn", take_turn);
    f.cleanup("end-round", end_round);
}

/// Engine for `game`, with the roster from `config` and the forest from
/// `definition`.
pub fn new_engine(
    config: &GameConfig,
    definition: &FlowDefinition,
    game: Game,
) -> Result<Engine<Game, PlayerInfo>> {
    let mut engine = Engine::with_config(config.engine.clone(), config.roster(), game)?;
    engine
        .define_flow(|f| {
            register(f);
            definition.declare(f)?;
            Ok(())
        })
        .context("define game flow")?;
    Ok(engine)
}

/// Play one game to its end.
///
/// With the built-in flow every callback advances on its own, so `start`
/// alone runs the game; flows that stop on a node are advanced from here.
pub fn play(engine: &mut Engine<Game, PlayerInfo>) -> Result<Outcome> {
    let mut status = engine.start().context("start game")?;
    let mut steps = 0;
    while status == Status::Waiting {
        if steps >= MAX_STEPS {
            bail!("game did not finish within {MAX_STEPS} steps");
        }
        steps += 1;
        status = engine.next().context("advance game")?;
    }
    let outcome = engine
        .state()
        .outcome
        .clone()
        .ok_or_else(|| anyhow!("game ended without an outcome"))?;
    info!(%outcome, rounds = engine.state().rounds, "game finished");
    Ok(outcome)
}
