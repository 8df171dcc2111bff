//! Error types for the engine and session layers

use crate::board::Player;

/// Why a column could not accept a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is out of range (0-6)")]
    ColumnOutOfRange { column: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },
}

/// Errors from parsing the text board notation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("expected 6 rows, found {0}")]
    RowCount(usize),

    #[error("row {row} has width {width}, expected 7")]
    RowWidth { row: usize, width: usize },

    #[error("unknown cell '{ch}' at row {row}, column {col}")]
    UnknownCell { row: usize, col: usize, ch: char },

    #[error("piece at row {row}, column {col} is floating above an empty cell")]
    FloatingPiece { row: usize, col: usize },

    #[error("move {index} is not a column digit 1-7: '{ch}'")]
    BadMoveDigit { index: usize, ch: char },

    #[error("move {index} is illegal: {source}")]
    IllegalMove {
        index: usize,
        #[source]
        source: MoveError,
    },
}

/// Errors returned by [`crate::session::Session`] operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("the game is over; start a new game first")]
    GameOver,

    #[error("it is not {0:?}'s turn to be played by hand")]
    NotYourTurn(Player),

    #[error(transparent)]
    InvalidMove(#[from] MoveError),
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty '{0}' (expected easy, medium or hard)")]
pub struct ParseDifficultyError(pub String);
