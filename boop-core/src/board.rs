//! Square board geometry: cells, directions and the positional table

use serde::{Deserialize, Serialize};
use std::fmt;

/// Board width and height
pub const BOARD_SIZE: i8 = 6;

/// Number of cells on the board
pub const CELL_COUNT: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// A board cell. `col` 0-5 maps to letters A-F, `row` 0-5 to digits 1-6.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub col: i8,
    pub row: i8,
}

impl Cell {
    pub const fn new(col: i8, row: i8) -> Self {
        Self { col, row }
    }

    /// Check if this cell is on the board
    pub fn is_valid(&self) -> bool {
        (0..BOARD_SIZE).contains(&self.col) && (0..BOARD_SIZE).contains(&self.row)
    }

    /// Cell `steps` away in direction `(dc, dr)`. May fall off the board.
    pub fn offset(&self, (dc, dr): (i8, i8), steps: i8) -> Cell {
        Cell::new(self.col + dc * steps, self.row + dr * steps)
    }

    /// Squared euclidean distance between two cells
    pub fn distance_squared(&self, other: Cell) -> i32 {
        let dc = (self.col - other.col) as i32;
        let dr = (self.row - other.row) as i32;
        dc * dc + dr * dr
    }

    /// Parse a two-character reference such as `"c4"` (column letter is
    /// case-insensitive). Returns `None` for anything that is not
    /// letter-then-digit; the result may still be off the board (`"g7"`).
    pub fn from_notation(text: &str) -> Option<Cell> {
        let mut chars = text.chars();
        let (letter, digit) = (chars.next()?, chars.next()?);
        if chars.next().is_some() || !letter.is_ascii_alphabetic() || !digit.is_ascii_digit() {
            return None;
        }
        let col = (letter.to_ascii_lowercase() as u8 - b'a') as i8;
        let row = (digit as u8) as i8 - b'1' as i8;
        Some(Cell::new(col, row))
    }

    /// All board cells, column by column (`a1`, `a2`, ..., `f6`)
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..BOARD_SIZE).flat_map(|col| (0..BOARD_SIZE).map(move |row| Cell::new(col, row)))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' as i8 + self.col) as u8 as char, self.row + 1)
    }
}

/// The eight neighbour directions as (dcol, drow)
/// Index: 0=N, 1=NE, 2=E, 3=SE, 4=S, 5=SW, 6=W, 7=NW
pub const DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),   // N
    (1, 1),   // NE
    (1, 0),   // E
    (1, -1),  // SE
    (0, -1),  // S
    (-1, -1), // SW
    (-1, 0),  // W
    (-1, 1),  // NW
];

/// One direction per line orientation, so each run is walked only once
pub const LINE_DIRECTIONS: [(i8, i8); 4] = [
    (1, 0),  // horizontal
    (0, 1),  // vertical
    (1, 1),  // rising diagonal
    (1, -1), // falling diagonal
];

/// Positional bonus per cell, highest in the centre
pub const CENTER_INCENTIVE: [[i32; 6]; 6] = [
    [1, 2, 4, 4, 2, 1],
    [2, 5, 7, 7, 5, 2],
    [4, 7, 10, 10, 7, 4],
    [4, 7, 10, 10, 7, 4],
    [2, 5, 7, 7, 5, 2],
    [1, 2, 4, 4, 2, 1],
];

/// Positional bonus for a cell
pub fn center_incentive(cell: Cell) -> i32 {
    CENTER_INCENTIVE[cell.row as usize][cell.col as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_validity() {
        assert!(Cell::new(0, 0).is_valid());
        assert!(Cell::new(5, 5).is_valid());
        assert!(!Cell::new(6, 0).is_valid());
        assert!(!Cell::new(0, -1).is_valid());
    }

    #[test]
    fn test_notation() {
        assert_eq!(Cell::from_notation("a1"), Some(Cell::new(0, 0)));
        assert_eq!(Cell::from_notation("C4"), Some(Cell::new(2, 3)));
        assert_eq!(Cell::new(5, 5).to_string(), "f6");
        assert_eq!(Cell::from_notation("4c"), None);
        assert_eq!(Cell::from_notation("c"), None);
        assert_eq!(Cell::from_notation("c44"), None);
        // Well-formed but off the board
        assert!(!Cell::from_notation("g7").unwrap().is_valid());
    }

    #[test]
    fn test_all_cells_order() {
        let cells: Vec<_> = Cell::all().collect();
        assert_eq!(cells.len(), CELL_COUNT);
        assert_eq!(cells[0].to_string(), "a1");
        assert_eq!(cells[1].to_string(), "a2");
        assert_eq!(cells[6].to_string(), "b1");
        assert_eq!(cells[35].to_string(), "f6");
    }

    #[test]
    fn test_distance_squared() {
        let a = Cell::new(0, 0);
        assert_eq!(a.distance_squared(Cell::new(1, 0)), 1);
        assert_eq!(a.distance_squared(Cell::new(1, 1)), 2);
        assert_eq!(a.distance_squared(Cell::new(2, 2)), 8);
    }

    #[test]
    fn test_center_incentive_symmetric() {
        for cell in Cell::all() {
            let mirrored = Cell::new(BOARD_SIZE - 1 - cell.col, BOARD_SIZE - 1 - cell.row);
            assert_eq!(center_incentive(cell), center_incentive(mirrored));
        }
        assert_eq!(center_incentive(Cell::new(2, 2)), 10);
        assert_eq!(center_incentive(Cell::new(0, 0)), 1);
    }
}
