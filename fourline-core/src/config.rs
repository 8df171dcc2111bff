//! Difficulty tiers and game configuration

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::ParseDifficultyError;
use crate::eval::Heuristics;

/// Named search depth for the AI
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Search depth below the AI's own candidate move
    pub fn depth(self) -> u32 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 4,
            Difficulty::Hard => 6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

/// Settings for a game session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Player Two is controlled by the AI
    pub ai_enabled: bool,
    /// AI strength
    pub difficulty: Difficulty,
    /// Pause before the AI replies, in milliseconds
    pub think_delay_ms: u64,
    /// Evaluator weights used by the AI
    pub heuristics: Heuristics,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            ai_enabled: true,
            difficulty: Difficulty::Medium,
            think_delay_ms: 500,
            heuristics: Heuristics::default(),
        }
    }
}

impl GameConfig {
    /// Config for a game against the AI at `difficulty`
    pub fn vs_ai(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Default::default()
        }
    }

    /// Config for two humans sharing the board
    pub fn two_player() -> Self {
        Self {
            ai_enabled: false,
            ..Default::default()
        }
    }

    pub fn with_think_delay(mut self, millis: u64) -> Self {
        self.think_delay_ms = millis;
        self
    }

    pub fn with_heuristics(mut self, heuristics: Heuristics) -> Self {
        self.heuristics = heuristics;
        self
    }

    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config
            .heuristics
            .validate()
            .with_context(|| format!("Invalid heuristics in config: {}", path.display()))?;
        Ok(config)
    }

    /// Save as pretty-printed JSON
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}
