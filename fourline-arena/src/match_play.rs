//! Match play - multiple games between two difficulty tiers
//!
//! Level 2 - Phase-level implementation

use fourline_core::{Difficulty, Player};
use rayon::prelude::*;
use serde::Serialize;

use crate::config::ArenaConfig;
use crate::game_runner::{play_game, GameRecord};

/// Result of a match, from the perspective of the two tiers
#[derive(Clone, Debug, Serialize)]
pub struct MatchResult {
    pub first: Difficulty,
    pub second: Difficulty,
    pub first_wins: u32,
    pub second_wins: u32,
    pub draws: u32,
    pub games_played: u32,
    /// Average game length in moves
    pub avg_moves: f32,
    pub games: Vec<GameRecord>,
}

impl MatchResult {
    pub fn empty(first: Difficulty, second: Difficulty) -> Self {
        Self {
            first,
            second,
            first_wins: 0,
            second_wins: 0,
            draws: 0,
            games_played: 0,
            avg_moves: 0.0,
            games: Vec::new(),
        }
    }

    pub fn first_win_rate(&self) -> f32 {
        rate(self.first_wins, self.games_played)
    }

    pub fn second_win_rate(&self) -> f32 {
        rate(self.second_wins, self.games_played)
    }

    pub fn draw_rate(&self) -> f32 {
        rate(self.draws, self.games_played)
    }

    /// Wins = 1.0, Draws = 0.5
    pub fn score_for_first(&self) -> f32 {
        self.first_wins as f32 + 0.5 * self.draws as f32
    }

    pub fn score_for_second(&self) -> f32 {
        self.second_wins as f32 + 0.5 * self.draws as f32
    }
}

fn rate(count: u32, total: u32) -> f32 {
    if total == 0 {
        0.0
    } else {
        count as f32 / total as f32
    }
}

/// Play a match between two tiers (Level 2 phase)
///
/// Seats alternate every game; each pair of games shares one random opening.
pub fn play_match(first: Difficulty, second: Difficulty, config: &ArenaConfig) -> MatchResult {
    if config.games == 0 {
        return MatchResult::empty(first, second);
    }

    tracing::info!(
        "Match {} vs {}: {} games, {} opening plies{}",
        first,
        second,
        config.games,
        config.opening_plies,
        if config.parallel { " (parallel)" } else { "" }
    );

    let slots = prepare_slots(first, second, config);
    let records: Vec<GameRecord> = if config.parallel {
        slots.par_iter().map(|slot| slot.play(config)).collect()
    } else {
        slots.iter().map(|slot| slot.play(config)).collect()
    };

    aggregate(first, second, records)
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Seating and seed for one game of a match
#[derive(Clone, Copy, Debug)]
struct GameSlot {
    game_index: usize,
    player_one: Difficulty,
    player_two: Difficulty,
    seed: u64,
}

impl GameSlot {
    fn play(&self, config: &ArenaConfig) -> GameRecord {
        play_game(
            self.game_index,
            self.player_one,
            self.player_two,
            config.opening_plies,
            self.seed,
        )
    }
}

fn prepare_slots(first: Difficulty, second: Difficulty, config: &ArenaConfig) -> Vec<GameSlot> {
    let base_seed = config.base_seed();
    (0..config.games)
        .map(|i| {
            let (player_one, player_two) = if i % 2 == 0 {
                (first, second)
            } else {
                (second, first)
            };
            GameSlot {
                game_index: i,
                player_one,
                player_two,
                seed: base_seed.wrapping_add((i / 2) as u64),
            }
        })
        .collect()
}

/// Attribute wins to tiers. Games are in slot order, so odd games have seats swapped.
fn aggregate(first: Difficulty, second: Difficulty, games: Vec<GameRecord>) -> MatchResult {
    let mut result = MatchResult::empty(first, second);
    let mut total_moves = 0usize;

    for game in &games {
        total_moves += game.moves.len();
        let first_sat_one = game.game_index % 2 == 0;

        match game.outcome.winner() {
            None => result.draws += 1,
            Some(Player::One) if first_sat_one => result.first_wins += 1,
            Some(Player::Two) if !first_sat_one => result.first_wins += 1,
            Some(_) => result.second_wins += 1,
        }
    }

    result.games_played = games.len() as u32;
    result.avg_moves = total_moves as f32 / games.len() as f32;
    result.games = games;

    tracing::info!(
        "{}: {} wins, {}: {} wins, {} draws",
        first,
        result.first_wins,
        second,
        result.second_wins,
        result.draws
    );

    result
}
