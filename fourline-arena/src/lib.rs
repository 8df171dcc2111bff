//! FOURLINE Arena - AI-vs-AI matches between difficulty tiers
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 2: play_match (phases)
//! - Level 3: play_game (steps)
//! - Level 4: configuration

mod config;
mod game_runner;
mod match_play;

pub use config::ArenaConfig;
pub use game_runner::{play_game, GameRecord};
pub use match_play::{play_match, MatchResult};
