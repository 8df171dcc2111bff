//! Board geometry and the 6x7 grid value

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::rules::apply_move;

/// Number of rows (row 0 is the top)
pub const ROWS: usize = 6;
/// Number of columns
pub const COLS: usize = 7;
/// Pieces in a line needed to win
pub const WIN_LENGTH: usize = 4;
/// Column preferred by the evaluator and used as the selector fallback
pub const CENTER_COL: usize = COLS / 2;

/// Line directions as (row step, column step): horizontal, vertical, and the two diagonals
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// One of the two sides. `One` always moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Character used by the text notation
    pub fn symbol(self) -> char {
        match self {
            Player::One => 'X',
            Player::Two => 'O',
        }
    }
}

/// A 6x7 Connect-Four grid. Small and `Copy`: applying a move yields a new board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Player>; COLS]; ROWS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from six row strings, top row first.
    ///
    /// `.` is empty, `X` is [`Player::One`], `O` is [`Player::Two`].
    /// Pieces must rest on the bottom or on another piece.
    pub fn from_rows(rows: &[&str]) -> Result<Self, BoardError> {
        if rows.len() != ROWS {
            return Err(BoardError::RowCount(rows.len()));
        }

        let mut board = Board::new();
        for (row, line) in rows.iter().enumerate() {
            let chars: Vec<char> = line.trim().chars().collect();
            if chars.len() != COLS {
                return Err(BoardError::RowWidth { row, width: chars.len() });
            }
            for (col, ch) in chars.into_iter().enumerate() {
                board.cells[row][col] = match ch {
                    '.' => None,
                    'X' | 'x' => Some(Player::One),
                    'O' | 'o' => Some(Player::Two),
                    _ => return Err(BoardError::UnknownCell { row, col, ch }),
                };
            }
        }

        for row in 0..ROWS - 1 {
            for col in 0..COLS {
                if board.cells[row][col].is_some() && board.cells[row + 1][col].is_none() {
                    return Err(BoardError::FloatingPiece { row, col });
                }
            }
        }

        Ok(board)
    }

    /// Replay a sequence of 0-based columns, alternating players from `One`.
    pub fn from_moves(columns: &[usize]) -> Result<Self, BoardError> {
        let mut board = Board::new();
        let mut player = Player::One;
        for (index, &column) in columns.iter().enumerate() {
            board = apply_move(&board, column, player)
                .map_err(|source| BoardError::IllegalMove { index, source })?
                .board;
            player = player.opponent();
        }
        Ok(board)
    }

    /// Parse a move string of 1-based column digits, e.g. `"4453"`.
    pub fn from_move_string(moves: &str) -> Result<Self, BoardError> {
        let columns = moves
            .chars()
            .filter(|c| !c.is_whitespace())
            .enumerate()
            .map(|(index, ch)| match ch.to_digit(10) {
                Some(d @ 1..=7) => Ok(d as usize - 1),
                _ => Err(BoardError::BadMoveDigit { index, ch }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_moves(&columns)
    }

    /// Cell contents. Panics if out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<Player> {
        self.cells[row][col]
    }

    /// Bounds-checked lookup with signed coordinates, used by line walks
    pub fn get_signed(&self, row: isize, col: isize) -> Option<Player> {
        if row < 0 || col < 0 || row >= ROWS as isize || col >= COLS as isize {
            return None;
        }
        self.cells[row as usize][col as usize]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, player: Player) {
        self.cells[row][col] = Some(player);
    }

    /// Lowest empty row in `col`, or `None` if the column is full or out of range
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col].is_none())
    }

    pub fn is_column_full(&self, col: usize) -> bool {
        self.landing_row(col).is_none()
    }

    /// Playable columns, left to right
    pub fn legal_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..COLS).filter(move |&col| !self.is_column_full(col))
    }

    pub fn is_full(&self) -> bool {
        self.cells[0].iter().all(Option::is_some)
    }

    pub fn piece_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&c| c == Some(player))
            .count()
    }

    /// Side to move, derived from piece counts (`One` moves first)
    pub fn side_to_move(&self) -> Player {
        if self.count(Player::One) > self.count(Player::Two) {
            Player::Two
        } else {
            Player::One
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                let ch = cell.map(Player::symbol).unwrap_or('.');
                write!(f, "{}", ch)?;
            }
        }
        Ok(())
    }
}
