//! Game runner - drives a single game between two policies
//!
//! Level 3 - Step-level implementation

use std::time::Instant;

use anyhow::{bail, Context};
use boop_core::{
    evaluate, AlphaBetaAI, Deadline, GameState, GreedyAI, MinimaxAI, Player, Policy, RandomAI,
};
use serde::{Deserialize, Serialize};

use crate::config::{AiConfig, MatchConfig, PlayerType};

/// Outcome of a single game
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Winner by rule (None for a tie at the turn cap)
    pub winner: Option<Player>,
    /// Moves applied, removals included
    pub half_moves: u32,
    /// The game stopped at the turn cap rather than by rule
    pub hit_turn_cap: bool,
    /// Wall-clock time spent in `choose_move`, both sides
    pub total_think_ms: f64,
    /// Mean decision latency for player one
    pub avg_think_ms_one: f64,
    /// Mean decision latency for player two
    pub avg_think_ms_two: f64,
    /// Evaluation of the final position (positive favours player two)
    pub final_score: i32,
}

impl GameRecord {
    pub fn is_tie(&self) -> bool {
        self.winner.is_none()
    }

    pub fn avg_think_ms(&self, player: Player) -> f64 {
        match player {
            Player::One => self.avg_think_ms_one,
            Player::Two => self.avg_think_ms_two,
        }
    }
}

/// Build a policy from its configuration. `seed` is used when the config
/// carries none.
pub fn create_policy(config: &AiConfig, seed: u64) -> Box<dyn Policy + Send> {
    match config.player_type {
        PlayerType::AlphaBeta => Box::new(AlphaBetaAI::new(config.depth)),
        PlayerType::Minimax => Box::new(MinimaxAI::new(config.depth)),
        PlayerType::Greedy => Box::new(GreedyAI::new()),
        PlayerType::Random => Box::new(RandomAI::with_seed(config.seed.unwrap_or(seed))),
    }
}

/// Play one game from the opening position
pub fn play_game(
    one: &mut dyn Policy,
    two: &mut dyn Policy,
    config: &MatchConfig,
) -> anyhow::Result<GameRecord> {
    let (_, record) = play_from(GameState::new(), one, two, config)?;
    tracing::info!(
        "{} vs {}: {} after {} half-moves (score {})",
        one.name(),
        two.name(),
        describe_winner(record.winner),
        record.half_moves,
        record.final_score
    );
    Ok(record)
}

/// Play from an arbitrary position until it ends or the turn cap is hit,
/// returning the final position alongside the record
pub fn play_from(
    mut state: GameState,
    one: &mut dyn Policy,
    two: &mut dyn Policy,
    config: &MatchConfig,
) -> anyhow::Result<(GameState, GameRecord)> {
    let mut half_moves = 0u32;
    let mut think_ms = [0.0f64; 2];
    let mut decisions = [0u32; 2];

    while !state.is_game_over() && half_moves < config.turn_limit {
        let mover = state.next_mover();
        let moves = state.legal_moves();
        if moves.is_empty() {
            bail!(
                "no legal moves for {} in {} phase of a live game (move {})",
                mover,
                state.phase(),
                state.move_number()
            );
        }

        let policy: &mut dyn Policy = match mover {
            Player::One => &mut *one,
            Player::Two => &mut *two,
        };

        let deadline = Deadline::from_millis(config.think_time_ms);
        let started = Instant::now();
        let chosen = policy.choose_move(&state, &moves, &deadline);
        let elapsed = started.elapsed().as_secs_f64() * 1000.0;

        let mv = chosen.with_context(|| format!("{} ({}) returned no move", policy.name(), mover))?;
        if !moves.contains(&mv) {
            bail!("{} ({}) chose {} which is not a legal move", policy.name(), mover, mv);
        }

        tracing::debug!("{} plays {} ({:.1} ms)", mover, mv, elapsed);
        state.apply_move(mv);

        half_moves += 1;
        think_ms[mover.index()] += elapsed;
        decisions[mover.index()] += 1;
    }

    let hit_turn_cap = !state.is_game_over();
    let winner = if hit_turn_cap { None } else { state.result().winner() };

    let record = GameRecord {
        winner,
        half_moves,
        hit_turn_cap,
        total_think_ms: think_ms[0] + think_ms[1],
        avg_think_ms_one: mean(think_ms[0], decisions[0]),
        avg_think_ms_two: mean(think_ms[1], decisions[1]),
        final_score: evaluate(&state),
    };
    Ok((state, record))
}

// ============================================================================
// Level 4 - Utilities
// ============================================================================

fn mean(total: f64, count: u32) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

pub fn describe_winner(winner: Option<Player>) -> String {
    match winner {
        Some(player) => format!("{} wins", player),
        None => "tie".to_string(),
    }
}
