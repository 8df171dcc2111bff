//! Game session: turn order, outcome, scoreboard and AI hand-off
//!
//! The session owns the current board snapshot. AI moves go through an
//! [`AiRequest`] / [`AiReply`] pair tagged with a generation number, so a
//! reply computed for a game that has since been reset is dropped.

use std::time::Duration;

use serde::Serialize;

use crate::ai::AlphaBetaAI;
use crate::board::{Board, Player};
use crate::config::{Difficulty, GameConfig};
use crate::error::SessionError;
use crate::eval::Heuristics;
use crate::rules::{apply_move, outcome_after, Outcome, Placement};

/// Games won by each side since the last score reset
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Scoreboard {
    pub player_one: u32,
    pub player_two: u32,
}

/// Snapshot handed to whoever computes the AI's move
#[derive(Clone, Debug)]
pub struct AiRequest {
    pub generation: u64,
    pub board: Board,
    pub player: Player,
    pub difficulty: Difficulty,
    pub heuristics: Heuristics,
    pub think_delay: Duration,
}

impl AiRequest {
    /// Run the search. Does not sleep; `think_delay` is left to the caller.
    pub fn compute(&self) -> AiReply {
        let mut ai = AlphaBetaAI::for_difficulty(self.player, self.difficulty)
            .with_heuristics(self.heuristics.clone());
        AiReply {
            generation: self.generation,
            column: ai.best_move(&self.board),
        }
    }
}

/// The AI's chosen column for a given request generation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AiReply {
    pub generation: u64,
    pub column: usize,
}

/// One game at a time, with scores carried across games
#[derive(Clone, Debug)]
pub struct Session {
    config: GameConfig,
    board: Board,
    current: Player,
    outcome: Outcome,
    scores: Scoreboard,
    generation: u64,
    history: Vec<usize>,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            board: Board::new(),
            current: Player::One,
            outcome: Outcome::Ongoing,
            scores: Scoreboard::default(),
            generation: 0,
            history: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn scores(&self) -> Scoreboard {
        self.scores
    }

    /// Bumped on every reset; replies from older generations are ignored
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Columns played this game, in order
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    /// The AI always plays the second seat when enabled
    pub fn ai_player(&self) -> Option<Player> {
        self.config.ai_enabled.then_some(Player::Two)
    }

    pub fn is_ai_turn(&self) -> bool {
        !self.outcome.is_over() && self.ai_player() == Some(self.current)
    }

    /// Human move for the current player
    pub fn play(&mut self, column: usize) -> Result<Outcome, SessionError> {
        if self.outcome.is_over() {
            return Err(SessionError::GameOver);
        }
        if self.is_ai_turn() {
            return Err(SessionError::NotYourTurn(self.current));
        }

        let placement = apply_move(&self.board, column, self.current)?;
        Ok(self.commit(placement))
    }

    /// Snapshot for the AI, or `None` when it is not the AI's turn
    pub fn request_ai_move(&self) -> Option<AiRequest> {
        if !self.is_ai_turn() {
            return None;
        }
        Some(AiRequest {
            generation: self.generation,
            board: self.board,
            player: self.current,
            difficulty: self.config.difficulty,
            heuristics: self.config.heuristics.clone(),
            think_delay: Duration::from_millis(self.config.think_delay_ms),
        })
    }

    /// Apply a computed AI move.
    ///
    /// Returns `Ok(None)` when the reply is stale (the game was reset or
    /// reconfigured) or it is no longer the AI's turn. An unplayable column
    /// falls back to the leftmost legal one.
    pub fn apply_ai_reply(&mut self, reply: AiReply) -> Result<Option<Outcome>, SessionError> {
        if reply.generation != self.generation {
            tracing::debug!(
                "Discarding AI reply for generation {} (current {})",
                reply.generation,
                self.generation
            );
            return Ok(None);
        }
        if !self.is_ai_turn() {
            tracing::debug!("Discarding AI reply: not the AI's turn");
            return Ok(None);
        }

        let player = self.current;
        let placement = match apply_move(&self.board, reply.column, player) {
            Ok(placement) => placement,
            Err(err) => {
                tracing::warn!("AI picked an unplayable column: {}", err);
                match self.board.legal_columns().next() {
                    Some(column) => apply_move(&self.board, column, player)?,
                    None => {
                        self.outcome = Outcome::Draw;
                        return Ok(Some(Outcome::Draw));
                    }
                }
            }
        };

        Ok(Some(self.commit(placement)))
    }

    /// Start a new game, keeping the scores
    pub fn reset_game(&mut self) {
        self.board = Board::new();
        self.current = Player::One;
        self.outcome = Outcome::Ongoing;
        self.history.clear();
        self.generation += 1;
    }

    pub fn reset_scores(&mut self) {
        self.scores = Scoreboard::default();
        self.reset_game();
    }

    /// Replace the settings; the current game is abandoned
    pub fn set_config(&mut self, config: GameConfig) {
        self.config = config;
        self.reset_game();
    }

    fn commit(&mut self, placement: Placement) -> Outcome {
        self.board = placement.board;
        self.history.push(placement.col);

        let outcome = outcome_after(&placement);
        match outcome {
            Outcome::PlayerOneWins => self.scores.player_one += 1,
            Outcome::PlayerTwoWins => self.scores.player_two += 1,
            Outcome::Draw => {}
            Outcome::Ongoing => self.current = self.current.opponent(),
        }
        self.outcome = outcome;

        if outcome.is_over() {
            tracing::info!("Game over: {:?} after {} moves", outcome, self.history.len());
        }
        outcome
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
