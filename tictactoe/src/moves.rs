//! Where moves come from: a line-based reader for humans, a script for tests.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use anyhow::{Context, Result, anyhow};
use tracing::debug;
use turnflow::Player;

use crate::board::{Board, Move};
use crate::game::PlayerInfo;

pub trait MoveSource {
    /// Next move proposed by `player`, or `None` once input is exhausted.
    ///
    /// The proposed move may still be rejected by the board.
    fn next_move(&mut self, player: &Player<PlayerInfo>, board: &Board) -> Result<Option<Move>>;
}

/// Prompts on `output` and reads `x y` (or `x,y`) lines from `input`.
pub struct LineMoves<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineMoves<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> MoveSource for LineMoves<R, W> {
    fn next_move(&mut self, player: &Player<PlayerInfo>, _board: &Board) -> Result<Option<Move>> {
        loop {
            write!(self.output, "{} to move (x y): ", player.attributes.mark).context("write prompt")?;
            self.output.flush().context("flush prompt")?;

            let mut line = String::new();
            let read = self.input.read_line(&mut line).context("read move")?;
            if read == 0 {
                debug!(player = %player.id, "input closed");
                return Ok(None);
            }
            match parse_move(&line) {
                Ok(mv) => return Ok(Some(mv)),
                Err(err) => writeln!(self.output, "{err}").context("write parse error")?,
            }
        }
    }
}

/// Parse `"x y"` or `"x,y"`.
pub fn parse_move(line: &str) -> Result<Move> {
    let parts: Vec<&str> = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();
    let [x, y] = parts.as_slice() else {
        return Err(anyhow!("expected two coordinates, got '{}'", line.trim()));
    };
    let x = x
        .parse()
        .with_context(|| format!("invalid x coordinate '{x}'"))?;
    let y = y
        .parse()
        .with_context(|| format!("invalid y coordinate '{y}'"))?;
    Ok(Move { x, y })
}

/// Replays a fixed list of moves regardless of player.
pub struct ScriptedMoves {
    moves: VecDeque<Move>,
}

impl ScriptedMoves {
    pub fn new(moves: impl IntoIterator<Item = (usize, usize)>) -> Self {
        Self {
            moves: moves.into_iter().map(|(x, y)| Move { x, y }).collect(),
        }
    }
}

impl MoveSource for ScriptedMoves {
    fn next_move(&mut self, _player: &Player<PlayerInfo>, _board: &Board) -> Result<Option<Move>> {
        Ok(self.moves.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player<PlayerInfo> {
        Player::new("x", PlayerInfo { mark: 'X' })
    }

    #[test]
    fn parses_space_and_comma_separated_moves() {
        assert_eq!(parse_move("1 2\n").expect("space"), Move { x: 1, y: 2 });
        assert_eq!(parse_move(" 0,2 ").expect("comma"), Move { x: 0, y: 2 });
        assert!(parse_move("1").is_err());
        assert!(parse_move("a b").is_err());
    }

    #[test]
    fn line_moves_reprompts_after_garbage_and_ends_at_eof() {
        let input = b"nope\n2 1\n".as_slice();
        let mut output = Vec::new();
        let mut source = LineMoves::new(input, &mut output);

        let mv = source.next_move(&player(), &Board::new()).expect("read");
        assert_eq!(mv, Some(Move { x: 2, y: 1 }));
        let mv = source.next_move(&player(), &Board::new()).expect("read");
        assert_eq!(mv, None);

        let printed = String::from_utf8(output).expect("utf8");
        assert_eq!(printed.matches("X to move").count(), 3);
        assert!(printed.contains("expected two coordinates"));
    }
}
