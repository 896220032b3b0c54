//! Boop Core - Game engine and AI
//!
//! This crate provides the core game logic for Boop:
//! - Board geometry (6x6 grid, algebraic cell names)
//! - Kittens, cats and per-player reserves
//! - Game state, booping, line removal and move generation
//! - Position evaluation with pattern and urgency terms
//! - Deadline-aware alpha-beta AI plus baseline policies

pub mod board;
pub mod pieces;
pub mod error;
pub mod game;
pub mod eval;
pub mod deadline;
pub mod ai;
pub mod policies;

// Re-exports for convenient access
pub use board::{Cell, BOARD_SIZE, DIRECTIONS, LINE_DIRECTIONS};
pub use pieces::{Piece, PieceKind, Player, Reserve, PIECES_PER_PLAYER, STARTING_KITTENS};
pub use error::MoveError;
pub use game::{is_three_in_line, GameResult, GameState, Move, Pattern, Phase};
pub use eval::{evaluate, score_for, WIN_SCORE};
pub use deadline::Deadline;
pub use ai::{AlphaBetaAI, Policy, SearchStats, DEFAULT_DEPTH};
pub use policies::{GreedyAI, MinimaxAI, RandomAI};
