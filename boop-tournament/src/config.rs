//! Configuration types for game and match play
//!
//! Level 4 - Utilities and configuration

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use boop_core::DEFAULT_DEPTH;
use serde::{Deserialize, Serialize};

/// Which policy drives a seat
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayerType {
    /// Alpha-beta search
    #[default]
    AlphaBeta,
    /// Plain minimax (no pruning)
    Minimax,
    /// One-ply board-change maximiser
    Greedy,
    /// Uniform random legal move
    Random,
}

impl FromStr for PlayerType {
    type Err = anyhow::Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.to_ascii_lowercase().as_str() {
            "alpha-beta" | "alphabeta" | "ab" => Ok(PlayerType::AlphaBeta),
            "minimax" => Ok(PlayerType::Minimax),
            "greedy" => Ok(PlayerType::Greedy),
            "random" => Ok(PlayerType::Random),
            other => anyhow::bail!("unknown player type `{other}` (expected alpha-beta, minimax, greedy or random)"),
        }
    }
}

impl fmt::Display for PlayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlayerType::AlphaBeta => "alpha-beta",
            PlayerType::Minimax => "minimax",
            PlayerType::Greedy => "greedy",
            PlayerType::Random => "random",
        };
        f.write_str(name)
    }
}

/// AI configuration for one seat
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Policy kind
    pub player_type: PlayerType,
    /// Search depth (alpha-beta and minimax only)
    pub depth: u32,
    /// Random seed for reproducibility (None = derived from the match seed)
    pub seed: Option<u64>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            player_type: PlayerType::AlphaBeta,
            depth: DEFAULT_DEPTH,
            seed: None,
        }
    }
}

impl AiConfig {
    /// Create config for alpha-beta at given depth
    pub fn alpha_beta(depth: u32) -> Self {
        Self {
            player_type: PlayerType::AlphaBeta,
            depth,
            ..Default::default()
        }
    }

    /// Create config for plain minimax at given depth
    pub fn minimax(depth: u32) -> Self {
        Self {
            player_type: PlayerType::Minimax,
            depth,
            ..Default::default()
        }
    }

    pub fn greedy() -> Self {
        Self {
            player_type: PlayerType::Greedy,
            ..Default::default()
        }
    }

    pub fn random() -> Self {
        Self {
            player_type: PlayerType::Random,
            ..Default::default()
        }
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Settings shared by every game in a match
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Number of games to play
    pub games: usize,
    /// Think-time budget per decision
    pub think_time_ms: u64,
    /// Half-moves before a game is called a tie
    pub turn_limit: u32,
    /// Run games on the rayon pool
    pub parallel: bool,
    /// Base seed; game `i` derives its policy seeds from it
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            games: 10,
            think_time_ms: 100,
            turn_limit: 1000,
            parallel: false,
            seed: None,
        }
    }
}

impl MatchConfig {
    /// Create config for a number of games
    pub fn new(games: usize) -> Self {
        Self {
            games,
            ..Default::default()
        }
    }

    pub fn with_think_time(mut self, think_time_ms: u64) -> Self {
        self.think_time_ms = think_time_ms;
        self
    }

    pub fn with_turn_limit(mut self, turn_limit: u32) -> Self {
        self.turn_limit = turn_limit;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read match config: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse match config: {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
