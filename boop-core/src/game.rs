//! Game state and move generation

use crate::board::{Cell, BOARD_SIZE, DIRECTIONS, LINE_DIRECTIONS};
use crate::error::MoveError;
use crate::eval::evaluate;
use crate::pieces::{Piece, PieceKind, Player, Reserve, STARTING_KITTENS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// CORE TYPES
// ============================================================================

/// What the player to move has to do next
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Normal turn: place a piece from reserve
    Place,
    /// The mover lined up three pieces and must take three of them back,
    /// each returning as a cat
    RemoveThree,
    /// The mover has nothing left in reserve and must take one piece back
    RemoveOne,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Place => write!(f, "place"),
            Phase::RemoveThree => write!(f, "remove-three"),
            Phase::RemoveOne => write!(f, "remove-one"),
        }
    }
}

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    PlayerOneWins,
    PlayerTwoWins,
}

impl GameResult {
    pub fn winner(self) -> Option<Player> {
        match self {
            GameResult::Ongoing => None,
            GameResult::PlayerOneWins => Some(Player::One),
            GameResult::PlayerTwoWins => Some(Player::Two),
        }
    }
}

/// What a line or tri-pattern count matches on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pattern {
    /// Exactly this piece (kind and owner)
    Exact(Piece),
    /// Any piece owned by the player to move
    Friendly,
}

/// A move. Text form: `bc4` / `rc4` (place), `a1 a2 a3` (remove three),
/// `a1` (remove one).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Place { kind: PieceKind, cell: Cell },
    /// Cells are kept sorted so the same triple compares equal whatever
    /// order it was written in.
    RemoveThree([Cell; 3]),
    RemoveOne(Cell),
}

impl Move {
    pub fn place(kind: PieceKind, cell: Cell) -> Self {
        Move::Place { kind, cell }
    }

    pub fn remove_three(mut cells: [Cell; 3]) -> Self {
        cells.sort_unstable();
        Move::RemoveThree(cells)
    }

    /// Phase in which this move shape is expected
    pub fn phase(&self) -> Phase {
        match self {
            Move::Place { .. } => Phase::Place,
            Move::RemoveThree(_) => Phase::RemoveThree,
            Move::RemoveOne(_) => Phase::RemoveOne,
        }
    }

    fn cells(&self) -> &[Cell] {
        match self {
            Move::Place { cell, .. } | Move::RemoveOne(cell) => std::slice::from_ref(cell),
            Move::RemoveThree(cells) => cells,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Place { kind, cell } => write!(f, "{}{}", kind.letter(), cell),
            Move::RemoveThree([a, b, c]) => write!(f, "{} {} {}", a, b, c),
            Move::RemoveOne(cell) => write!(f, "{}", cell),
        }
    }
}

fn parse_cell(text: &str, whole: &str) -> Result<Cell, MoveError> {
    let cell = Cell::from_notation(text).ok_or_else(|| MoveError::Malformed(whole.to_string()))?;
    if !cell.is_valid() {
        return Err(MoveError::OutOfBounds(text.to_string()));
    }
    Ok(cell)
}

impl FromStr for Move {
    type Err = MoveError;

    /// The shape is decided by length alone: 3 = place, 8 = remove three,
    /// 2 = remove one.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let malformed = || MoveError::Malformed(text.to_string());
        if !text.is_ascii() {
            return Err(malformed());
        }

        match text.len() {
            3 => {
                let kind = text
                    .chars()
                    .next()
                    .and_then(PieceKind::from_letter)
                    .ok_or_else(malformed)?;
                Ok(Move::place(kind, parse_cell(&text[1..], text)?))
            }
            8 => {
                let parts: Vec<&str> = text.split(' ').collect();
                if parts.len() != 3 || parts.iter().any(|p| p.len() != 2) {
                    return Err(malformed());
                }
                Ok(Move::remove_three([
                    parse_cell(parts[0], text)?,
                    parse_cell(parts[1], text)?,
                    parse_cell(parts[2], text)?,
                ]))
            }
            2 => Ok(Move::RemoveOne(parse_cell(text, text)?)),
            _ => Err(malformed()),
        }
    }
}

/// Three distinct cells are equally spaced on one line iff their pairwise
/// squared distances, sorted, are {1, 1, 4} (orthogonal) or {2, 2, 8}
/// (diagonal). Works on the unordered triple.
pub fn is_three_in_line(cells: &[Cell; 3]) -> bool {
    let [a, b, c] = *cells;
    let mut dists = [a.distance_squared(b), b.distance_squared(c), c.distance_squared(a)];
    dists.sort_unstable();
    dists == [1, 1, 4] || dists == [2, 2, 8]
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Game state (clone to explore)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    /// Board indexed `[row][col]`
    board: [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize],

    /// Reserves indexed by `Player::index`
    reserves: [Reserve; 2],

    /// What the player to move must do
    phase: Phase,

    /// Completed moves; parity gives the player to move
    move_number: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Empty board, eight kittens each, player one to move
    pub fn new() -> Self {
        Self {
            board: [[None; BOARD_SIZE as usize]; BOARD_SIZE as usize],
            reserves: [Reserve::new(STARTING_KITTENS, 0); 2],
            phase: Phase::Place,
            move_number: 0,
        }
    }

    /// Arbitrary position in the place phase. Callers are responsible for
    /// keeping board + reserve at eight pieces per player.
    pub fn from_position(pieces: &[(Cell, Piece)], reserves: [Reserve; 2], move_number: u32) -> Self {
        let mut state = Self {
            reserves,
            move_number,
            ..Self::new()
        };
        for &(cell, piece) in pieces {
            state.set(cell, Some(piece));
        }
        state
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of completed moves
    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    pub fn next_mover(&self) -> Player {
        if self.move_number % 2 == 0 {
            Player::One
        } else {
            Player::Two
        }
    }

    pub fn last_mover(&self) -> Player {
        self.next_mover().opponent()
    }

    pub fn reserve(&self, player: Player) -> Reserve {
        self.reserves[player.index()]
    }

    pub fn kittens(&self, player: Player) -> u8 {
        self.reserve(player).kittens
    }

    pub fn cats(&self, player: Player) -> u8 {
        self.reserve(player).cats
    }

    /// Piece at a cell (`None` when empty or off the board)
    pub fn piece_at(&self, cell: Cell) -> Option<Piece> {
        if !cell.is_valid() {
            return None;
        }
        self.board[cell.row as usize][cell.col as usize]
    }

    /// Iterate pieces on board
    pub fn pieces(&self) -> impl Iterator<Item = (Cell, Piece)> + '_ {
        Cell::all().filter_map(move |cell| self.piece_at(cell).map(|piece| (cell, piece)))
    }

    /// Number of `piece`s currently on the board
    pub fn count_on_board(&self, piece: Piece) -> usize {
        self.pieces().filter(|&(_, p)| p == piece).count()
    }

    /// Number of cells whose contents differ between two positions
    pub fn board_difference(&self, other: &GameState) -> usize {
        Cell::all()
            .filter(|&cell| self.piece_at(cell) != other.piece_at(cell))
            .count()
    }

    fn set(&mut self, cell: Cell, piece: Option<Piece>) {
        self.board[cell.row as usize][cell.col as usize] = piece;
    }

    fn is_friend(&self, cell: Cell) -> bool {
        self.piece_at(cell)
            .map_or(false, |piece| piece.owner == self.next_mover())
    }

    fn matches(&self, cell: Cell, pattern: Pattern) -> bool {
        match pattern {
            Pattern::Exact(wanted) => self.piece_at(cell) == Some(wanted),
            Pattern::Friendly => self.is_friend(cell),
        }
    }

    // ========================================================================
    // PATTERN COUNTING
    // ========================================================================

    /// Count runs of `len` matching cells. Every origin cell is tried in each
    /// line orientation, so runs overlap: a run of three also counts as two
    /// runs of two, and a run of four as two runs of three.
    pub fn count_in_row(&self, len: i8, pattern: Pattern) -> usize {
        Cell::all()
            .filter(|&origin| self.matches(origin, pattern))
            .map(|origin| {
                LINE_DIRECTIONS
                    .iter()
                    .filter(|&&dir| (1..len).all(|step| self.matches(origin.offset(dir, step), pattern)))
                    .count()
            })
            .sum()
    }

    /// Count 3x3 windows with at least three matching corners
    pub fn count_tri_pattern(&self, pattern: Pattern) -> usize {
        const CORNERS: [(i8, i8); 4] = [(0, 0), (2, 0), (0, 2), (2, 2)];
        let span = BOARD_SIZE - 2;

        (0..span)
            .flat_map(|col| (0..span).map(move |row| Cell::new(col, row)))
            .filter(|window| {
                CORNERS
                    .iter()
                    .filter(|&&(dc, dr)| self.matches(Cell::new(window.col + dc, window.row + dr), pattern))
                    .count()
                    >= 3
            })
            .count()
    }

    // ========================================================================
    // TERMINAL DETECTION
    // ========================================================================

    /// Three of `player`'s cats in an unbroken line
    pub fn has_cat_line(&self, player: Player) -> bool {
        self.count_in_row(3, Pattern::Exact(Piece::cat(player))) > 0
    }

    /// Every piece `player` owns is a cat on the board
    pub fn has_all_cats_down(&self, player: Player) -> bool {
        self.reserve(player).is_empty() && self.count_on_board(Piece::kitten(player)) == 0
    }

    pub fn is_game_over(&self) -> bool {
        [Player::One, Player::Two]
            .into_iter()
            .any(|player| self.has_cat_line(player) || self.has_all_cats_down(player))
    }

    /// Result by rule; the evaluation sign picks the winner once terminal
    pub fn result(&self) -> GameResult {
        if !self.is_game_over() {
            return GameResult::Ongoing;
        }
        match self.winning() {
            Some(Player::One) => GameResult::PlayerOneWins,
            Some(Player::Two) => GameResult::PlayerTwoWins,
            None => GameResult::Ongoing,
        }
    }

    /// Who the evaluation currently favours (`None` when level)
    pub fn winning(&self) -> Option<Player> {
        match evaluate(self) {
            score if score > 0 => Some(Player::Two),
            score if score < 0 => Some(Player::One),
            _ => None,
        }
    }

    // ========================================================================
    // LEGALITY
    // ========================================================================

    /// Check a move against this state, reporting why it is rejected
    pub fn validate(&self, mv: &Move) -> Result<(), MoveError> {
        if mv.phase() != self.phase {
            return Err(MoveError::WrongPhase {
                mv: mv.to_string(),
                phase: self.phase,
            });
        }
        if let Some(cell) = mv.cells().iter().find(|cell| !cell.is_valid()) {
            return Err(MoveError::OutOfBounds(cell.to_string()));
        }

        match *mv {
            Move::Place { kind, cell } => {
                if self.reserve(self.next_mover()).count(kind) == 0 {
                    return Err(MoveError::EmptyReserve(kind));
                }
                if self.piece_at(cell).is_some() {
                    return Err(MoveError::Occupied(cell));
                }
            }
            Move::RemoveThree(cells) => {
                if let Some(&cell) = cells.iter().find(|&&cell| !self.is_friend(cell)) {
                    return Err(MoveError::NotFriendly(cell));
                }
                if !is_three_in_line(&cells) {
                    return Err(MoveError::NotInLine);
                }
            }
            Move::RemoveOne(cell) => {
                if !self.is_friend(cell) {
                    return Err(MoveError::NotFriendly(cell));
                }
            }
        }
        Ok(())
    }

    pub fn is_legal(&self, mv: &Move) -> bool {
        self.validate(mv).is_ok()
    }

    /// Parse move text and check it against this state
    pub fn parse_move(&self, text: &str) -> Result<Move, MoveError> {
        let mv: Move = text.trim().parse()?;
        self.validate(&mv)?;
        Ok(mv)
    }

    // ========================================================================
    // MOVE GENERATION
    // ========================================================================

    /// Generate all legal moves for the current phase (none once the game
    /// is over)
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_game_over() {
            return vec![];
        }

        let mut moves = Vec::new();
        match self.phase {
            Phase::Place => self.generate_placements(&mut moves),
            Phase::RemoveThree => self.generate_triples(&mut moves),
            Phase::RemoveOne => self.generate_singles(&mut moves),
        }
        moves
    }

    fn generate_placements(&self, moves: &mut Vec<Move>) {
        let reserve = self.reserve(self.next_mover());
        for kind in [PieceKind::Kitten, PieceKind::Cat] {
            if reserve.count(kind) == 0 {
                continue;
            }
            moves.extend(
                Cell::all()
                    .filter(|&cell| self.piece_at(cell).is_none())
                    .map(|cell| Move::place(kind, cell)),
            );
        }
    }

    /// One triple per friendly anchor per line orientation. Longer runs
    /// yield several overlapping triples.
    fn generate_triples(&self, moves: &mut Vec<Move>) {
        for anchor in Cell::all().filter(|&cell| self.is_friend(cell)) {
            for dir in LINE_DIRECTIONS {
                let (second, third) = (anchor.offset(dir, 1), anchor.offset(dir, 2));
                if self.is_friend(second) && self.is_friend(third) {
                    moves.push(Move::remove_three([anchor, second, third]));
                }
            }
        }
    }

    fn generate_singles(&self, moves: &mut Vec<Move>) {
        moves.extend(
            Cell::all()
                .filter(|&cell| self.is_friend(cell))
                .map(Move::RemoveOne),
        );
    }

    // ========================================================================
    // MOVE APPLICATION
    // ========================================================================

    /// Apply a legal move. The caller guarantees legality (moves come from
    /// `legal_moves` or passed `validate`).
    pub fn apply_move(&mut self, mv: Move) {
        debug_assert!(self.is_legal(&mv), "illegal move {mv} in {} phase", self.phase);
        let mover = self.next_mover();

        match mv {
            Move::Place { kind, cell } => {
                self.reserves[mover.index()].take(kind);
                self.set(cell, Some(Piece::new(kind, mover)));
                self.boop_neighbours(cell, kind);

                // Only the mover's own lines count; a line built for the
                // opponent waits for their turn.
                if self.count_in_row(3, Pattern::Friendly) > 0 {
                    self.phase = Phase::RemoveThree;
                    return;
                }
                if self.reserves[mover.index()].is_empty() {
                    self.phase = Phase::RemoveOne;
                    return;
                }
            }
            Move::RemoveThree(cells) => {
                for cell in cells {
                    self.return_piece(cell, true);
                }
            }
            Move::RemoveOne(cell) => self.return_piece(cell, false),
        }

        self.phase = Phase::Place;
        self.move_number += 1;
    }

    /// Validate, then apply
    pub fn try_apply_move(&mut self, mv: Move) -> Result<(), MoveError> {
        if self.is_game_over() {
            return Err(MoveError::GameOver);
        }
        self.validate(&mv)?;
        self.apply_move(mv);
        Ok(())
    }

    /// Push every boopable neighbour one cell away from `origin`. A piece
    /// pushed off the board goes back to its owner's reserve; a piece whose
    /// landing cell is occupied stays put.
    fn boop_neighbours(&mut self, origin: Cell, kind: PieceKind) {
        for dir in DIRECTIONS {
            let neighbour = origin.offset(dir, 1);
            let Some(piece) = self.piece_at(neighbour) else {
                continue;
            };
            if !kind.can_boop(piece.kind) {
                continue;
            }

            let target = origin.offset(dir, 2);
            if !target.is_valid() {
                self.return_piece(neighbour, false);
            } else if self.piece_at(target).is_none() {
                self.set(target, Some(piece));
                self.set(neighbour, None);
            }
        }
    }

    /// Lift the piece at `cell` back into its owner's reserve, as a cat when
    /// promoting
    fn return_piece(&mut self, cell: Cell, promote: bool) {
        if let Some(piece) = self.piece_at(cell) {
            let kind = if promote { PieceKind::Cat } else { piece.kind };
            self.reserves[piece.owner.index()].add(kind);
            self.set(cell, None);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
