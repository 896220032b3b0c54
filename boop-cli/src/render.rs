//! Text rendering of a position

use boop_core::{Cell, GameState, Piece, Player, BOARD_SIZE};

/// Player one's pieces print in upper case, player two's in lower case
fn piece_char(piece: Option<Piece>) -> char {
    match piece {
        None => '.',
        Some(p) => {
            let letter = p.kind.letter();
            match p.owner {
                Player::One => letter.to_ascii_uppercase(),
                Player::Two => letter,
            }
        }
    }
}

/// Board with row 6 at the top, followed by reserves and the phase line
pub fn render(state: &GameState) -> String {
    let mut out = String::new();

    for row in (0..BOARD_SIZE).rev() {
        out.push_str(&format!("{} ", row + 1));
        for col in 0..BOARD_SIZE {
            out.push(' ');
            out.push(piece_char(state.piece_at(Cell::new(col, row))));
        }
        out.push('\n');
    }

    out.push_str("  ");
    for col in 0..BOARD_SIZE {
        out.push(' ');
        out.push((b'a' + col as u8) as char);
    }
    out.push('\n');

    for player in [Player::One, Player::Two] {
        let reserve = state.reserve(player);
        out.push_str(&format!(
            "{}: {} kittens, {} cats in reserve\n",
            player, reserve.kittens, reserve.cats
        ));
    }
    out.push_str(&format!(
        "Move {}: {} to {}\n",
        state.move_number(),
        state.next_mover(),
        state.phase()
    ));
    out
}
