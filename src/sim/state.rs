//! Score and run state
//!
//! Everything the controller tracks about the current run besides the world
//! itself lives here.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// RNG seed wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Score and game-over state of a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub score: u64,
    /// Best score seen, including previous sessions
    pub high_score: u64,
    /// Sticky until reset
    pub game_over: bool,
}

impl GameState {
    pub fn new(high_score: u64) -> Self {
        Self {
            score: 0,
            high_score,
            game_over: false,
        }
    }

    /// Add points. Returns true if this raised the high score.
    pub fn add_points(&mut self, points: u64) -> bool {
        self.score += points;
        self.refresh_high_score()
    }

    /// Lift the high score to the current score if it was beaten.
    /// Returns true if it changed.
    pub fn refresh_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }

    /// Start a new run, keeping the high score
    pub fn reset(&mut self) {
        self.score = 0;
        self.game_over = false;
    }
}
