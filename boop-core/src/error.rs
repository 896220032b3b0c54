//! Move rejection reasons

use crate::board::Cell;
use crate::game::Phase;
use crate::pieces::PieceKind;

/// Why a move was rejected. The engine never coerces a bad move; it reports
/// one of these and leaves the state untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("malformed move `{0}`")]
    Malformed(String),

    #[error("cell `{0}` is off the board")]
    OutOfBounds(String),

    #[error("move `{mv}` does not fit the {phase} phase")]
    WrongPhase { mv: String, phase: Phase },

    #[error("cell {0} is already occupied")]
    Occupied(Cell),

    #[error("no {0} left in reserve")]
    EmptyReserve(PieceKind),

    #[error("cell {0} does not hold one of your pieces")]
    NotFriendly(Cell),

    #[error("cells are not three in a line")]
    NotInLine,

    #[error("the game is already over")]
    GameOver,
}
