//! Players, piece kinds and reserves

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kittens each player starts with in reserve
pub const STARTING_KITTENS: u8 = 8;

/// Pieces each player owns in total (board + reserve)
pub const PIECES_PER_PLAYER: u8 = 8;

/// Player seat. `One` moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One = 0,
    Two = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "Player 1"),
            Player::Two => write!(f, "Player 2"),
        }
    }
}

/// Piece rank
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Kitten,
    Cat,
}

impl PieceKind {
    /// Placement letter: `b` (bunny) for kittens, `r` (rabbit) for cats
    pub fn letter(self) -> char {
        match self {
            PieceKind::Kitten => 'b',
            PieceKind::Cat => 'r',
        }
    }

    /// Case-insensitive inverse of [`PieceKind::letter`]
    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'b' => Some(PieceKind::Kitten),
            'r' => Some(PieceKind::Cat),
            _ => None,
        }
    }

    /// A cat boops anything; a kitten only boops kittens.
    pub fn can_boop(self, target: PieceKind) -> bool {
        self == PieceKind::Cat || target == PieceKind::Kitten
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceKind::Kitten => write!(f, "kitten"),
            PieceKind::Cat => write!(f, "cat"),
        }
    }
}

/// A piece on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub owner: Player,
}

impl Piece {
    pub const fn new(kind: PieceKind, owner: Player) -> Self {
        Self { kind, owner }
    }

    pub const fn kitten(owner: Player) -> Self {
        Self::new(PieceKind::Kitten, owner)
    }

    pub const fn cat(owner: Player) -> Self {
        Self::new(PieceKind::Cat, owner)
    }
}

/// Pieces a player holds off the board
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reserve {
    pub kittens: u8,
    pub cats: u8,
}

impl Reserve {
    pub const fn new(kittens: u8, cats: u8) -> Self {
        Self { kittens, cats }
    }

    pub fn count(&self, kind: PieceKind) -> u8 {
        match kind {
            PieceKind::Kitten => self.kittens,
            PieceKind::Cat => self.cats,
        }
    }

    pub fn total(&self) -> u8 {
        self.kittens + self.cats
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub(crate) fn add(&mut self, kind: PieceKind) {
        match kind {
            PieceKind::Kitten => self.kittens += 1,
            PieceKind::Cat => self.cats += 1,
        }
    }

    /// Take one piece of `kind`. Panics on underflow: callers only take
    /// pieces they have checked for.
    pub(crate) fn take(&mut self, kind: PieceKind) {
        let slot = match kind {
            PieceKind::Kitten => &mut self.kittens,
            PieceKind::Cat => &mut self.cats,
        };
        *slot = slot
            .checked_sub(1)
            .unwrap_or_else(|| panic!("reserve underflow taking a {kind}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters() {
        assert_eq!(PieceKind::from_letter('b'), Some(PieceKind::Kitten));
        assert_eq!(PieceKind::from_letter('R'), Some(PieceKind::Cat));
        assert_eq!(PieceKind::from_letter('x'), None);
        assert_eq!(PieceKind::Cat.letter(), 'r');
    }

    #[test]
    fn test_boop_strength() {
        assert!(PieceKind::Cat.can_boop(PieceKind::Cat));
        assert!(PieceKind::Cat.can_boop(PieceKind::Kitten));
        assert!(PieceKind::Kitten.can_boop(PieceKind::Kitten));
        assert!(!PieceKind::Kitten.can_boop(PieceKind::Cat));
    }

    #[test]
    fn test_reserve_accounting() {
        let mut reserve = Reserve::new(1, 0);
        reserve.take(PieceKind::Kitten);
        assert!(reserve.is_empty());
        reserve.add(PieceKind::Cat);
        assert_eq!(reserve.count(PieceKind::Cat), 1);
        assert_eq!(reserve.total(), 1);
    }

    #[test]
    #[should_panic(expected = "reserve underflow")]
    fn test_reserve_underflow_is_fatal() {
        let mut reserve = Reserve::default();
        reserve.take(PieceKind::Cat);
    }

    #[test]
    fn test_opponent() {
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.opponent().index(), 0);
    }
}
