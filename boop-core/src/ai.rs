//! Decision policies and the alpha-beta AI

use crate::deadline::Deadline;
use crate::eval::score_for;
use crate::game::{GameState, Move};
use crate::pieces::Player;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Default search depth in plies
pub const DEFAULT_DEPTH: u32 = 4;

// ============================================================================
// POLICY CONTRACT
// ============================================================================

/// Something that picks moves.
///
/// `choose_move` must return one of `moves` (or `None` only when `moves` is
/// empty), must return even if `deadline` has already expired, and must not
/// overrun the deadline by more than one leaf evaluation. The state is a
/// read-only view; explore futures by cloning it.
pub trait Policy {
    fn name(&self) -> &str;

    fn choose_move(&mut self, state: &GameState, moves: &[Move], deadline: &Deadline) -> Option<Move>;
}

// ============================================================================
// ALPHA-BETA AI
// ============================================================================

/// Counters from the most recent decision
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions entered below the root
    pub nodes: u64,
    /// Sibling lists abandoned by a bound
    pub cutoffs: u64,
    /// The deadline stopped the search early
    pub timed_out: bool,
    /// Score of the chosen move from the mover's side
    pub best_score: i32,
}

/// Depth-limited minimax with alpha-beta pruning
pub struct AlphaBetaAI {
    pub depth: u32,
    stats: SearchStats,
}

impl Default for AlphaBetaAI {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl AlphaBetaAI {
    pub fn new(depth: u32) -> Self {
        Self {
            depth: depth.max(1),
            stats: SearchStats::default(),
        }
    }

    /// Statistics for the last `choose_move` call
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Score `state` for `me`, looking `depth` more plies ahead.
    ///
    /// Maximises where `me` is to move (including `me`'s own removal
    /// phases) and minimises otherwise. Returns the running best when the
    /// deadline expires between siblings.
    fn alpha_beta(
        &mut self,
        state: &GameState,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        me: Player,
        deadline: &Deadline,
    ) -> i32 {
        self.stats.nodes += 1;

        if depth == 0 || state.is_game_over() {
            return score_for(state, me);
        }

        let moves = state.legal_moves();
        if moves.is_empty() {
            return score_for(state, me);
        }

        if state.next_mover() == me {
            let mut best = i32::MIN;
            for mv in moves {
                let mut child = state.clone();
                child.apply_move(mv);
                let score = self.alpha_beta(&child, depth - 1, alpha, beta, me, deadline);

                best = best.max(score);
                alpha = alpha.max(best);
                if beta <= best {
                    self.stats.cutoffs += 1;
                    break;
                }
                if deadline.expired() {
                    self.stats.timed_out = true;
                    break;
                }
            }
            best
        } else {
            let mut best = i32::MAX;
            for mv in moves {
                let mut child = state.clone();
                child.apply_move(mv);
                let score = self.alpha_beta(&child, depth - 1, alpha, beta, me, deadline);

                best = best.min(score);
                beta = beta.min(best);
                if best <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
                if deadline.expired() {
                    self.stats.timed_out = true;
                    break;
                }
            }
            best
        }
    }
}

impl Policy for AlphaBetaAI {
    fn name(&self) -> &str {
        "alpha-beta"
    }

    fn choose_move(&mut self, state: &GameState, moves: &[Move], deadline: &Deadline) -> Option<Move> {
        self.stats = SearchStats::default();
        let mut best_move = *moves.first()?;

        if deadline.expired() {
            self.stats.timed_out = true;
            return Some(best_move);
        }

        let me = state.next_mover();
        let mut best_score = i32::MIN;
        let mut alpha = i32::MIN;

        for &mv in moves {
            let mut child = state.clone();
            child.apply_move(mv);
            let score = self.alpha_beta(&child, self.depth - 1, alpha, i32::MAX, me, deadline);

            if score > best_score {
                best_score = score;
                best_move = mv;
            }
            alpha = alpha.max(score);

            if deadline.expired() {
                self.stats.timed_out = true;
                break;
            }
        }

        self.stats.best_score = best_score;
        tracing::debug!(
            "alpha-beta depth={} move={} score={} nodes={} cutoffs={} timed_out={} elapsed={:?}",
            self.depth,
            best_move,
            best_score,
            self.stats.nodes,
            self.stats.cutoffs,
            self.stats.timed_out,
            deadline.elapsed()
        );

        Some(best_move)
    }
}

// ============================================================================
// TESTS
// ============================================================================
