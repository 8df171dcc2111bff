//! Minimax AI with alpha-beta pruning

use serde::Serialize;

use crate::board::{Board, Player, CENTER_COL, COLS};
use crate::config::Difficulty;
use crate::eval::{evaluate_with, Heuristics, WIN_SCORE};
use crate::rules::{apply_move, detect_draw, detect_win, has_four};

// ============================================================================
// TYPES
// ============================================================================

/// The move that produced a search node: (row, column, mover)
type LastMove = (usize, usize, Player);

/// Counters collected during one search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Nodes entered, including leaves
    pub nodes: u64,
    /// Depth-limited leaves handed to the evaluator
    pub leaves: u64,
    /// Sibling loops stopped by `beta <= alpha`
    pub cutoffs: u64,
}

/// Result of a root search
#[derive(Clone, Debug, Serialize)]
pub struct SearchReport {
    pub player: Player,
    pub depth: u32,
    /// Selected column (center if nothing was legal)
    pub column: usize,
    /// Score of the selected column, `None` on a full board
    pub score: Option<i32>,
    /// Score of every legal root column
    pub column_scores: [Option<i32>; COLS],
    pub stats: SearchStats,
}

// ============================================================================
// ALPHA-BETA AI
// ============================================================================

/// Depth-limited minimax player. `player` is the maximizing side.
#[derive(Clone, Debug)]
pub struct AlphaBetaAI {
    pub player: Player,
    pub depth: u32,
    pub heuristics: Heuristics,
    stats: SearchStats,
}

impl AlphaBetaAI {
    pub fn new(player: Player, depth: u32) -> Self {
        Self {
            player,
            depth,
            heuristics: Heuristics::default(),
            stats: SearchStats::default(),
        }
    }

    pub fn for_difficulty(player: Player, difficulty: Difficulty) -> Self {
        Self::new(player, difficulty.depth())
    }

    pub fn with_heuristics(mut self, heuristics: Heuristics) -> Self {
        self.heuristics = heuristics;
        self
    }

    /// Statistics of the most recent search
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Column to play on `board`
    pub fn best_move(&mut self, board: &Board) -> usize {
        self.analyze(board).column
    }

    /// Score every legal column and pick the strictly best one (lowest column on ties).
    ///
    /// Callers should not ask for a move on a full or already decided board;
    /// the center column is returned with no scores in that case.
    pub fn analyze(&mut self, board: &Board) -> SearchReport {
        self.stats = SearchStats::default();

        if has_four(board, Player::One) || has_four(board, Player::Two) {
            tracing::warn!(
                "move requested on a decided board, falling back to column {}",
                CENTER_COL
            );
            return SearchReport {
                player: self.player,
                depth: self.depth,
                column: CENTER_COL,
                score: None,
                column_scores: [None; COLS],
                stats: self.stats,
            };
        }

        let mut column_scores = [None; COLS];
        let mut best_column = CENTER_COL;
        let mut best_score: Option<i32> = None;

        for col in 0..COLS {
            let Ok(child) = apply_move(board, col, self.player) else {
                continue;
            };
            let score = self.search(
                &child.board,
                Some((child.row, col, self.player)),
                self.depth,
                1,
                i32::MIN,
                i32::MAX,
                false,
            );
            column_scores[col] = Some(score);

            if best_score.map_or(true, |best| score > best) {
                best_score = Some(score);
                best_column = col;
            }
        }

        if best_score.is_none() {
            tracing::warn!(
                "move requested on a full board, falling back to column {}",
                CENTER_COL
            );
        }

        tracing::debug!(
            "{:?} depth {}: column {} score {:?} ({} nodes, {} cutoffs)",
            self.player,
            self.depth,
            best_column,
            best_score,
            self.stats.nodes,
            self.stats.cutoffs
        );

        SearchReport {
            player: self.player,
            depth: self.depth,
            column: best_column,
            score: best_score,
            column_scores,
            stats: self.stats,
        }
    }

    /// Minimax value of `board` with `depth` plies left.
    ///
    /// A line already on the board is detected with one full scan here; below
    /// this point only the lines through the last placed piece are checked.
    pub fn minimax(
        &mut self,
        board: &Board,
        depth: u32,
        alpha: i32,
        beta: i32,
        maximizing: bool,
    ) -> i32 {
        if has_four(board, self.player) {
            return WIN_SCORE;
        }
        if has_four(board, self.player.opponent()) {
            return -WIN_SCORE;
        }
        self.search(board, None, depth, 0, alpha, beta, maximizing)
    }

    #[allow(clippy::too_many_arguments)]
    fn search(
        &mut self,
        board: &Board,
        last: Option<LastMove>,
        depth: u32,
        ply: i32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.stats.nodes += 1;

        // Terminal checks, faster wins and slower losses score better
        if let Some((row, col, mover)) = last {
            if detect_win(board, row, col, mover) {
                return if mover == self.player {
                    WIN_SCORE - ply
                } else {
                    -WIN_SCORE + ply
                };
            }
        }
        if detect_draw(board) {
            return 0;
        }

        if depth == 0 {
            self.stats.leaves += 1;
            return evaluate_with(board, self.player, &self.heuristics);
        }

        let mover = if maximizing {
            self.player
        } else {
            self.player.opponent()
        };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for col in 0..COLS {
            let Ok(child) = apply_move(board, col, mover) else {
                continue;
            };
            let score = self.search(
                &child.board,
                Some((child.row, col, mover)),
                depth - 1,
                ply + 1,
                alpha,
                beta,
                !maximizing,
            );

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }

            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        best
    }
}

/// Pick a column for the side to move on `board` at the given difficulty.
///
/// The board must not be full; check [`crate::rules::detect_draw`] first.
pub fn select_move(board: &Board, difficulty: Difficulty) -> usize {
    AlphaBetaAI::for_difficulty(board.side_to_move(), difficulty).best_move(board)
}

// ============================================================================
// TESTS
// ============================================================================
