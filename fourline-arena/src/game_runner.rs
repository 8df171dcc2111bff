//! Game runner - plays one AI-vs-AI game
//!
//! Level 3 - Step-level implementation

use fourline_core::{
    apply_move, outcome_after, AlphaBetaAI, Board, Difficulty, Outcome, Player,
};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// Everything needed to replay and score a finished game
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub game_index: usize,
    /// Tier playing the first seat
    pub player_one: Difficulty,
    /// Tier playing the second seat
    pub player_two: Difficulty,
    /// Random opening columns
    pub opening: Vec<usize>,
    /// All columns played, opening included
    pub moves: Vec<usize>,
    pub outcome: Outcome,
}

impl GameRecord {
    /// Tier that won, if any
    pub fn winner(&self) -> Option<Difficulty> {
        match self.outcome.winner()? {
            Player::One => Some(self.player_one),
            Player::Two => Some(self.player_two),
        }
    }

    pub fn is_draw(&self) -> bool {
        self.outcome == Outcome::Draw
    }
}

/// Play a game from a seeded random opening to the end
pub fn play_game(
    game_index: usize,
    player_one: Difficulty,
    player_two: Difficulty,
    opening_plies: usize,
    seed: u64,
) -> GameRecord {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut ai_one = AlphaBetaAI::for_difficulty(Player::One, player_one);
    let mut ai_two = AlphaBetaAI::for_difficulty(Player::Two, player_two);

    let mut board = Board::new();
    let mut player = Player::One;
    let mut opening = Vec::with_capacity(opening_plies);
    let mut moves = Vec::new();
    let mut outcome = Outcome::Ongoing;

    while outcome == Outcome::Ongoing {
        let column = if opening.len() < opening_plies {
            let legal: Vec<usize> = board.legal_columns().collect();
            let Some(&column) = legal.choose(&mut rng) else {
                break;
            };
            opening.push(column);
            column
        } else {
            match player {
                Player::One => ai_one.best_move(&board),
                Player::Two => ai_two.best_move(&board),
            }
        };

        let placement = match apply_move(&board, column, player) {
            Ok(placement) => placement,
            Err(err) => {
                // Only reachable on a full board, which ends the game as a draw first
                tracing::warn!("Game {}: {} by {:?}", game_index, err, player);
                outcome = Outcome::Draw;
                break;
            }
        };

        moves.push(column);
        outcome = outcome_after(&placement);
        board = placement.board;
        player = player.opponent();
    }

    tracing::debug!(
        "Game {}: {} vs {} -> {:?} in {} moves",
        game_index,
        player_one,
        player_two,
        outcome,
        moves.len()
    );

    GameRecord {
        game_index,
        player_one,
        player_two,
        opening,
        moves,
        outcome,
    }
}
