//! Position evaluation
//!
//! Scores are from a fixed viewpoint: positive favours player two, negative
//! player one. Search orients them with [`score_for`].

use crate::board::center_incentive;
use crate::game::{GameState, Pattern};
use crate::pieces::{Piece, PieceKind, Player};

/// Saturated score for a decided game
pub const WIN_SCORE: i32 = 9999;

// Material
const RESERVE_KITTEN: i32 = 2;
const RESERVE_CAT: i32 = 40;
const BOARD_KITTEN: i32 = 3;
const BOARD_CAT: i32 = 45;

// Tri-patterns
const TRI_CAT: i32 = 10;
const TRI_KITTEN: i32 = 15;
const TRI_FRIENDLY: i32 = 5;

// Lines
const TWO_KITTENS: i32 = 5;
const THREE_KITTENS: i32 = 10;
const TWO_CATS: i32 = 15;

/// Urgency multipliers for the side that just moved
const URGENT: i32 = 8;
const URGENT_MIXED: i32 = 4;

/// Evaluate a position (positive = player two ahead)
pub fn evaluate(state: &GameState) -> i32 {
    let one = side_score(state, Player::One);
    let two = side_score(state, Player::Two);
    let mut score = two - one;

    // Friendly tri-patterns are counted for the player to move but weighted
    // on both sides.
    let friendly_tris = state.count_tri_pattern(Pattern::Friendly) as i32 * TRI_FRIENDLY;
    score -= friendly_tris * urgency(state, Player::One, URGENT_MIXED);
    score += friendly_tris * urgency(state, Player::Two, URGENT_MIXED);

    // Decided games override everything; later checks win ties.
    for (player, sign) in [(Player::One, -1), (Player::Two, 1)] {
        if state.has_cat_line(player) {
            score = sign * WIN_SCORE;
        }
    }
    for (player, sign) in [(Player::One, -1), (Player::Two, 1)] {
        if state.has_all_cats_down(player) {
            score = sign * WIN_SCORE;
        }
    }

    score
}

/// Evaluation from `player`'s point of view (higher is better for them)
pub fn score_for(state: &GameState, player: Player) -> i32 {
    match player {
        Player::One => -evaluate(state),
        Player::Two => evaluate(state),
    }
}

/// Unsigned contribution of everything one player owns
fn side_score(state: &GameState, player: Player) -> i32 {
    let kitten = Piece::kitten(player);
    let cat = Piece::cat(player);
    let reserve = state.reserve(player);

    // Centre control and on-board material
    let board: i32 = state
        .pieces()
        .filter(|(_, piece)| piece.owner == player)
        .map(|(cell, piece)| {
            center_incentive(cell)
                + match piece.kind {
                    PieceKind::Kitten => BOARD_KITTEN,
                    PieceKind::Cat => BOARD_CAT,
                }
        })
        .sum();

    let material = reserve.kittens as i32 * RESERVE_KITTEN + reserve.cats as i32 * RESERVE_CAT;

    let tris = state.count_tri_pattern(Pattern::Exact(cat)) as i32 * TRI_CAT
        + state.count_tri_pattern(Pattern::Exact(kitten)) as i32 * TRI_KITTEN;

    let kitten_lines = state.count_in_row(2, Pattern::Exact(kitten)) as i32 * TWO_KITTENS
        + state.count_in_row(3, Pattern::Exact(kitten)) as i32 * THREE_KITTENS;

    let cat_lines = state.count_in_row(2, Pattern::Exact(cat)) as i32 * TWO_CATS;

    board
        + material
        + (tris + kitten_lines) * urgency(state, player, URGENT)
        + cat_lines * cat_pair_urgency(state, player)
}

/// `factor` when `player` made the last move, else 1
fn urgency(state: &GameState, player: Player, factor: i32) -> i32 {
    if state.last_mover() == player {
        factor
    } else {
        1
    }
}

/// Cat pairs only get urgent when the side that just moved still holds a cat
/// to complete them, and twice as urgent if the opponent has none to answer.
fn cat_pair_urgency(state: &GameState, player: Player) -> i32 {
    if state.last_mover() != player || state.cats(player) == 0 {
        return 1;
    }
    if state.cats(player.opponent()) > 0 {
        1
    } else {
        2
    }
}
