//! Match play - a batch of games between two fixed seats
//!
//! Level 2 - Phase-level implementation

use boop_core::Player;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{AiConfig, MatchConfig};
use crate::game_runner::{create_policy, play_game, GameRecord};

/// Aggregated result of a match
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Wins for the player-one seat
    pub one_wins: u32,
    /// Wins for the player-two seat
    pub two_wins: u32,
    /// Games stopped at the turn cap
    pub ties: u32,
    /// Average game length in half-moves
    pub avg_half_moves: f64,
    /// Mean per-decision latency across the match, per seat
    pub avg_think_ms_one: f64,
    pub avg_think_ms_two: f64,
    /// Total games played
    pub games_played: u32,
    /// Individual game records in play order
    pub games: Vec<GameRecord>,
}

impl MatchResult {
    /// Create empty result
    pub fn empty() -> Self {
        Self::from_records(Vec::new())
    }

    /// Aggregate finished games
    pub fn from_records(games: Vec<GameRecord>) -> Self {
        let count = |player| games.iter().filter(|g| g.winner == Some(player)).count() as u32;
        let one_wins = count(Player::One);
        let two_wins = count(Player::Two);
        let ties = games.iter().filter(|g| g.is_tie()).count() as u32;
        let games_played = games.len() as u32;

        MatchResult {
            one_wins,
            two_wins,
            ties,
            avg_half_moves: average(&games, |g| g.half_moves as f64),
            avg_think_ms_one: average(&games, |g| g.avg_think_ms_one),
            avg_think_ms_two: average(&games, |g| g.avg_think_ms_two),
            games_played,
            games,
        }
    }

    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::One => self.one_wins,
            Player::Two => self.two_wins,
        }
    }

    /// Fraction of games won by `player`'s seat
    pub fn win_rate(&self, player: Player) -> f64 {
        rate(self.wins(player), self.games_played)
    }

    pub fn tie_rate(&self) -> f64 {
        rate(self.ties, self.games_played)
    }
}

/// Play a match (Level 2 phase)
///
/// `one` always sits in the player-one seat. Each game gets fresh policies
/// seeded from the match seed and the game index.
pub fn play_match(one: &AiConfig, two: &AiConfig, config: &MatchConfig) -> anyhow::Result<MatchResult> {
    if config.games == 0 {
        return Ok(MatchResult::empty());
    }

    tracing::info!(
        "Starting match: {} vs {} ({} games, {} ms per move{})",
        one.player_type,
        two.player_type,
        config.games,
        config.think_time_ms,
        if config.parallel { ", parallel" } else { "" }
    );

    let base_seed = config.seed.unwrap_or(42);
    let run = |index: usize| play_single_game(one, two, config, base_seed, index);

    let records = if config.parallel {
        (0..config.games).into_par_iter().map(run).collect::<anyhow::Result<Vec<_>>>()?
    } else {
        (0..config.games).map(run).collect::<anyhow::Result<Vec<_>>>()?
    };

    let result = MatchResult::from_records(records);
    tracing::info!(
        "Match finished: {} - {} ({} ties)",
        result.one_wins,
        result.two_wins,
        result.ties
    );
    Ok(result)
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

fn play_single_game(
    one: &AiConfig,
    two: &AiConfig,
    config: &MatchConfig,
    base_seed: u64,
    index: usize,
) -> anyhow::Result<GameRecord> {
    let seed = game_seed(base_seed, index);
    let mut first = create_policy(one, seed);
    let mut second = create_policy(two, seed.wrapping_add(1));

    let record = play_game(first.as_mut(), second.as_mut(), config)?;
    tracing::info!("Game {}: {} half-moves, winner {:?}", index + 1, record.half_moves, record.winner);
    Ok(record)
}

/// Two seeds per game so the seats never share a stream
fn game_seed(base_seed: u64, index: usize) -> u64 {
    base_seed.wrapping_add(2 * index as u64)
}

// ============================================================================
// Level 4 - Utilities
// ============================================================================

fn average(games: &[GameRecord], value: impl Fn(&GameRecord) -> f64) -> f64 {
    if games.is_empty() {
        0.0
    } else {
        games.iter().map(value).sum::<f64>() / games.len() as f64
    }
}

fn rate(count: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}
