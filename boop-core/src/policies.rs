//! Baseline policies: plain minimax, one-ply greedy, uniform random

use crate::ai::Policy;
use crate::deadline::Deadline;
use crate::eval::score_for;
use crate::game::{GameState, Move};
use crate::pieces::Player;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// MINIMAX
// ============================================================================

/// Exhaustive minimax without pruning. Slow; mostly a reference for the
/// alpha-beta search and a weak sparring partner.
pub struct MinimaxAI {
    pub depth: u32,
    nodes: u64,
}

impl Default for MinimaxAI {
    fn default() -> Self {
        Self::new(2)
    }
}

impl MinimaxAI {
    pub fn new(depth: u32) -> Self {
        Self {
            depth: depth.max(1),
            nodes: 0,
        }
    }

    /// Positions visited below the root during the last decision
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    fn minimax(&mut self, state: &GameState, depth: u32, me: Player, deadline: &Deadline) -> i32 {
        self.nodes += 1;

        if depth == 0 || state.is_game_over() {
            return score_for(state, me);
        }
        let moves = state.legal_moves();
        if moves.is_empty() {
            return score_for(state, me);
        }

        let maximising = state.next_mover() == me;
        let mut best = if maximising { i32::MIN } else { i32::MAX };
        for mv in moves {
            let mut child = state.clone();
            child.apply_move(mv);
            let score = self.minimax(&child, depth - 1, me, deadline);
            best = if maximising { best.max(score) } else { best.min(score) };

            if deadline.expired() {
                break;
            }
        }
        best
    }
}

impl Policy for MinimaxAI {
    fn name(&self) -> &str {
        "minimax"
    }

    fn choose_move(&mut self, state: &GameState, moves: &[Move], deadline: &Deadline) -> Option<Move> {
        self.nodes = 0;
        let mut best_move = *moves.first()?;
        if deadline.expired() {
            return Some(best_move);
        }

        let me = state.next_mover();
        let mut best_score = i32::MIN;
        for &mv in moves {
            let mut child = state.clone();
            child.apply_move(mv);
            let score = self.minimax(&child, self.depth - 1, me, deadline);
            if score > best_score {
                best_score = score;
                best_move = mv;
            }
            if deadline.expired() {
                break;
            }
        }

        tracing::debug!("minimax depth={} move={} score={} nodes={}", self.depth, best_move, best_score, self.nodes);
        Some(best_move)
    }
}

// ============================================================================
// GREEDY
// ============================================================================

/// Picks whichever move changes the most cells, i.e. the one that boops the
/// most pieces. Ignores the evaluation entirely.
#[derive(Default)]
pub struct GreedyAI;

impl GreedyAI {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for GreedyAI {
    fn name(&self) -> &str {
        "greedy"
    }

    fn choose_move(&mut self, state: &GameState, moves: &[Move], deadline: &Deadline) -> Option<Move> {
        let mut best_move = *moves.first()?;
        let mut best_change = 0;

        for &mv in moves {
            if deadline.expired() {
                break;
            }
            let mut child = state.clone();
            child.apply_move(mv);
            let change = child.board_difference(state);
            if change > best_change {
                best_change = change;
                best_move = mv;
            }
        }
        Some(best_move)
    }
}

// ============================================================================
// RANDOM
// ============================================================================

/// Uniform choice among the legal moves. The generator is seeded once at
/// construction, so a seeded instance replays the same game.
pub struct RandomAI {
    rng: ChaCha8Rng,
}

impl Default for RandomAI {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomAI {
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomAI {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&mut self, _state: &GameState, moves: &[Move], _deadline: &Deadline) -> Option<Move> {
        moves.choose(&mut self.rng).copied()
    }
}
