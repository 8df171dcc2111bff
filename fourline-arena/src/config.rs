//! Configuration for arena matches
//!
//! Level 4 - Utilities and configuration

/// How a match between two difficulty tiers is played
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Number of games (even counts give each side the first move equally often)
    pub games: usize,
    /// Random plies played before the AIs take over
    pub opening_plies: usize,
    /// Base seed for openings (None = 42)
    pub seed: Option<u64>,
    /// Run games on the rayon thread pool
    pub parallel: bool,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            games: 10,
            opening_plies: 2,
            seed: None,
            parallel: false,
        }
    }
}

impl ArenaConfig {
    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    pub fn with_openings(mut self, plies: usize) -> Self {
        self.opening_plies = plies;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub(crate) fn base_seed(&self) -> u64 {
        self.seed.unwrap_or(42)
    }
}
