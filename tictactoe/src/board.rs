//! 3x3 board rules.

use std::fmt;

use anyhow::{Result, bail};

pub const SIZE: usize = 3;

const LINES: [[(usize, usize); 3]; 8] = [
    // Rows
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    // Columns
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    // Diagonals
    [(0, 0), (1, 1), (2, 2)],
    [(2, 0), (1, 1), (0, 2)],
];

/// A cell coordinate: `x` is the column, `y` the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub x: usize,
    pub y: usize,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<char>; SIZE]; SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid_move(&self, mv: Move) -> bool {
        mv.x < SIZE && mv.y < SIZE && self.cells[mv.y][mv.x].is_none()
    }

    pub fn place(&mut self, mark: char, mv: Move) -> Result<()> {
        if !self.is_valid_move(mv) {
            bail!("invalid move {mv}");
        }
        self.cells[mv.y][mv.x] = Some(mark);
        Ok(())
    }

    pub fn get(&self, mv: Move) -> Option<char> {
        self.cells.get(mv.y)?.get(mv.x).copied().flatten()
    }

    /// The mark completing a row, column or diagonal, if any.
    pub fn winner(&self) -> Option<char> {
        LINES.iter().find_map(|line| {
            let [a, b, c] = line.map(|(x, y)| self.cells[y][x]);
            match a {
                Some(mark) if a == b && b == c => Some(mark),
                _ => None,
            }
        })
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = self
            .cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.unwrap_or(' ').to_string())
                    .collect::<Vec<_>>()
                    .join("|")
            })
            .collect();
        write!(f, "{}", rows.join("\n-+-+-\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(board: &mut Board, moves: &[(char, usize, usize)]) {
        for (mark, x, y) in moves {
            board
                .place(*mark, Move { x: *x, y: *y })
                .expect("valid move");
        }
    }

    #[test]
    fn occupied_and_out_of_range_cells_are_invalid() {
        let mut board = Board::new();
        play(&mut board, &[('X', 1, 1)]);
        assert!(!board.is_valid_move(Move { x: 1, y: 1 }));
        assert!(!board.is_valid_move(Move { x: 3, y: 0 }));
        assert!(board.place('O', Move { x: 1, y: 1 }).is_err());
        assert_eq!(board.get(Move { x: 1, y: 1 }), Some('X'));
    }

    #[test]
    fn detects_column_and_diagonal_wins() {
        let mut column = Board::new();
        play(&mut column, &[('O', 2, 0), ('O', 2, 1), ('O', 2, 2)]);
        assert_eq!(column.winner(), Some('O'));

        let mut diagonal = Board::new();
        play(&mut diagonal, &[('X', 2, 0), ('X', 1, 1), ('X', 0, 2)]);
        assert_eq!(diagonal.winner(), Some('X'));
    }

    #[test]
    fn full_board_without_line_is_a_draw() {
        let mut board = Board::new();
        play(
            &mut board,
            &[
                ('X', 0, 0),
                ('O', 1, 0),
                ('X', 2, 0),
                ('X', 0, 1),
                ('O', 1, 1),
                ('X', 2, 1),
                ('O', 0, 2),
                ('X', 1, 2),
                ('O', 2, 2),
            ],
        );
        assert!(board.is_full());
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn renders_rows_with_separators() {
        let mut board = Board::new();
        play(&mut board, &[('X', 0, 0), ('O', 2, 2)]);
        assert_eq!(board.to_string(), "X| | \n-+-+-\n | | \n-+-+-\n | |O");
    }
}
