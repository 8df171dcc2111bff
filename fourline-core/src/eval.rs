//! Static position evaluation

use serde::{Deserialize, Serialize};

use crate::board::{Board, Player, CENTER_COL, COLS, DIRECTIONS, ROWS, WIN_LENGTH};
use crate::rules::detect_win;

/// Score of a decided position
pub const WIN_SCORE: i32 = 10_000;

/// Number of length-4 windows on a 6x7 board
pub const WINDOW_COUNT: usize = 69;

/// Deepest ply a game can reach; win scores are offset by ply
const MAX_PLY: i32 = (ROWS * COLS) as i32;

/// Heuristic weights for window scoring
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Heuristics {
    /// Three pieces and one empty cell in a window
    pub three_weight: i32,
    /// Two pieces and two empty cells
    pub two_weight: i32,
    /// One piece and three empty cells
    pub one_weight: i32,
    /// Bonus per own piece in the center column
    pub center_weight: i32,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            three_weight: 100,
            two_weight: 10,
            one_weight: 1,
            center_weight: 3,
        }
    }
}

impl Heuristics {
    /// Reject weights that could overflow the window sum or let a heuristic
    /// score reach the range reserved for forced wins.
    pub fn validate(&self) -> anyhow::Result<()> {
        let weights = [
            ("three_weight", self.three_weight),
            ("two_weight", self.two_weight),
            ("one_weight", self.one_weight),
            ("center_weight", self.center_weight),
        ];
        for (name, weight) in weights {
            anyhow::ensure!(weight >= 0, "{} must not be negative (got {})", name, weight);
        }

        let window = self.three_weight.max(self.two_weight).max(self.one_weight) as i64;
        let bound = WINDOW_COUNT as i64 * window + ROWS as i64 * self.center_weight as i64;
        let limit = (WIN_SCORE - MAX_PLY) as i64;
        anyhow::ensure!(
            bound < limit,
            "heuristic weights can reach {} but must stay below {}",
            bound,
            limit
        );
        Ok(())
    }

    /// Score of a single window from the evaluating side's perspective
    pub fn score_window(&self, own: usize, opp: usize, empty: usize) -> i32 {
        match (own, opp, empty) {
            (3, _, 1) => self.three_weight,
            (_, 3, 1) => -self.three_weight,
            (2, _, 2) => self.two_weight,
            (_, 2, 2) => -self.two_weight,
            (1, _, 3) => self.one_weight,
            (_, 1, 3) => -self.one_weight,
            _ => 0,
        }
    }
}

/// Evaluate `board` for `for_player` with the default weights
pub fn evaluate(board: &Board, for_player: Player) -> i32 {
    evaluate_with(board, for_player, &Heuristics::default())
}

/// Evaluate `board` for `for_player`. Positive favours `for_player`.
pub fn evaluate_with(board: &Board, for_player: Player, heuristics: &Heuristics) -> i32 {
    let opponent = for_player.opponent();

    // Completed lines dominate everything else
    for row in 0..ROWS {
        for col in 0..COLS {
            if detect_win(board, row, col, for_player) {
                return WIN_SCORE;
            }
            if detect_win(board, row, col, opponent) {
                return -WIN_SCORE;
            }
        }
    }

    let mut score = 0;
    for_each_window(|cells| {
        let mut own = 0;
        let mut opp = 0;
        let mut empty = 0;
        for (r, c) in cells {
            match board.get(r, c) {
                Some(p) if p == for_player => own += 1,
                Some(_) => opp += 1,
                None => empty += 1,
            }
        }
        score += heuristics.score_window(own, opp, empty);
    });

    let center = (0..ROWS)
        .filter(|&row| board.get(row, CENTER_COL) == Some(for_player))
        .count() as i32;
    score + center * heuristics.center_weight
}

/// Call `f` with the cells of every horizontal, vertical and diagonal run of four
fn for_each_window<F: FnMut([(usize, usize); WIN_LENGTH])>(mut f: F) {
    let span = WIN_LENGTH as isize - 1;
    for &(dr, dc) in DIRECTIONS.iter() {
        for row in 0..ROWS as isize {
            for col in 0..COLS as isize {
                let end_r = row + dr * span;
                let end_c = col + dc * span;
                if end_r < 0 || end_r >= ROWS as isize || end_c < 0 || end_c >= COLS as isize {
                    continue;
                }
                let mut cells = [(0, 0); WIN_LENGTH];
                for (i, cell) in cells.iter_mut().enumerate() {
                    let i = i as isize;
                    *cell = ((row + dr * i) as usize, (col + dc * i) as usize);
                }
                f(cells);
            }
        }
    }
}
