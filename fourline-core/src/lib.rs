//! FOURLINE Core - Connect-Four engine and AI
//!
//! This crate provides the game logic:
//! - Board model (6x7 grid, gravity drops, text notation)
//! - Move application, win and draw detection
//! - Window-based heuristic evaluation
//! - Depth-limited minimax AI with alpha-beta pruning
//! - Game sessions with scoring and stale-AI-reply handling

pub mod board;
pub mod error;
pub mod rules;
pub mod eval;
pub mod ai;
pub mod config;
pub mod session;

// Re-exports for convenient access
pub use board::{Board, Player, CENTER_COL, COLS, ROWS, WIN_LENGTH};
pub use error::{BoardError, MoveError, ParseDifficultyError, SessionError};
pub use rules::{apply_move, detect_draw, detect_win, has_four, outcome_after, Outcome, Placement};
pub use eval::{evaluate, evaluate_with, Heuristics, WIN_SCORE};
pub use ai::{select_move, AlphaBetaAI, SearchReport, SearchStats};
pub use config::{Difficulty, GameConfig};
pub use session::{AiReply, AiRequest, Scoreboard, Session};
