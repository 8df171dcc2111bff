//! Match command - AI-vs-AI games between two difficulty tiers
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match() (arena crate), report_results()
//! - Level 4: formatting utilities

use anyhow::{Context, Result};
use clap::Args;

use fourline_arena::{play_match, ArenaConfig, MatchResult};
use fourline_core::Difficulty;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// First tier (plays Player 1 in even-numbered games)
    #[arg(long, default_value = "easy")]
    pub first: Difficulty,

    /// Second tier
    #[arg(long, default_value = "hard")]
    pub second: Difficulty,

    /// Number of games to play (will alternate seats)
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Random opening plies before the AIs take over
    #[arg(long, default_value = "2")]
    pub openings: usize,

    /// Base seed for the random openings
    #[arg(long)]
    pub seed: Option<u64>,

    /// Play games in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(args: MatchArgs) -> Result<()> {
    let config = arena_config(&args);
    let results = play_match(args.first, args.second, &config);
    report_results(&results, args.json)
}

fn arena_config(args: &MatchArgs) -> ArenaConfig {
    let mut config = ArenaConfig::default()
        .with_games(args.games)
        .with_openings(args.openings)
        .with_parallel(args.parallel);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    config
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn report_results(results: &MatchResult, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(results).context("Failed to serialize results")?;
        println!("{}", text);
    } else {
        print_text_results(results);
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - FORMATTING
// ============================================================================

fn print_text_results(results: &MatchResult) {
    println!("\n=== Match Results ===");
    println!("Total games: {}", results.games_played);
    println!(
        "{:<7} wins: {} ({:.1}%)",
        results.first.name(),
        results.first_wins,
        results.first_win_rate() * 100.0
    );
    println!(
        "{:<7} wins: {} ({:.1}%)",
        results.second.name(),
        results.second_wins,
        results.second_win_rate() * 100.0
    );
    println!(
        "Draws:        {} ({:.1}%)",
        results.draws,
        results.draw_rate() * 100.0
    );
    println!("Avg moves:    {:.1}", results.avg_moves);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: {} (X) vs {} (O): {} in {} moves [{}]",
            game.game_index + 1,
            game.player_one,
            game.player_two,
            describe_winner(game.winner(), game.is_draw()),
            game.moves.len(),
            format_moves(&game.moves)
        );
    }
}

fn describe_winner(winner: Option<Difficulty>, draw: bool) -> String {
    match winner {
        Some(tier) => format!("{} wins", tier),
        None if draw => "draw".to_string(),
        None => "unfinished".to_string(),
    }
}

/// 1-based move string, replayable with `analyze --moves`
fn format_moves(moves: &[usize]) -> String {
    moves.iter().map(|c| char::from(b'1' + *c as u8)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_moves() {
        assert_eq!(format_moves(&[3, 3, 4, 2, 6, 0]), "445371");
        assert_eq!(format_moves(&[]), "");
    }

    #[test]
    fn test_describe_winner() {
        assert_eq!(describe_winner(Some(Difficulty::Hard), false), "hard wins");
        assert_eq!(describe_winner(None, true), "draw");
    }

    #[test]
    fn test_arena_config_from_args() {
        let args = MatchArgs {
            first: Difficulty::Easy,
            second: Difficulty::Medium,
            games: 6,
            openings: 3,
            seed: Some(9),
            parallel: true,
            json: false,
        };
        let config = arena_config(&args);
        assert_eq!(config.games, 6);
        assert_eq!(config.opening_plies, 3);
        assert_eq!(config.seed, Some(9));
        assert!(config.parallel);
    }
}
