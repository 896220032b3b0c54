//! Boop Tournament - Driving games and matches between policies
//!
//! This crate provides the play infrastructure:
//! - AI and match configuration (JSON-loadable)
//! - A game driver with per-decision deadlines and timing
//! - Match play with aggregated statistics, optionally in parallel
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 2: play_match (phases)
//! - Level 3: play_game, play_from (steps)
//! - Level 4: utilities, configuration

mod config;
mod game_runner;
mod match_play;

pub use config::{AiConfig, MatchConfig, PlayerType};
pub use game_runner::{create_policy, describe_winner, play_from, play_game, GameRecord};
pub use match_play::{play_match, MatchResult};
