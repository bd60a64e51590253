//! Terminal-oriented board renderer.
//!
//! Creates a human-readable grid view from the stone bitboards for
//! debugging, tests, and console play. Rows are labelled with letters and
//! columns with numbers, matching the coordinate entry format of the
//! console binary.

use crate::board::bitboard::BOARD_EDGE;
use crate::board::state::BoardState;
use crate::board::types::Stone;

/// Render the board to a string for terminal output.
pub fn render_board(state: &BoardState) -> String {
    let mut out = String::new();

    out.push_str("  ");
    for col in 0..BOARD_EDGE {
        out.push_str(&format!("{} ", col + 1));
    }
    out.push('\n');

    for row in 0..BOARD_EDGE {
        out.push(char::from(b'A' + row as u8));
        out.push(' ');
        for col in 0..BOARD_EDGE {
            let stone = state.stone_at(row * BOARD_EDGE + col);
            out.push(match stone {
                Stone::Black => 'B',
                Stone::White => 'W',
                Stone::Empty => '.',
            });
            out.push(' ');
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::bitboard::cell_from_coord;
    use crate::board::types::Color;

    #[test]
    fn renders_stones_at_their_coordinates() {
        let state = BoardState::from_placements(&[
            (cell_from_coord(0, 0), Color::Black),
            (cell_from_coord(1, 2), Color::White),
        ])
        .unwrap();
        let rendered = render_board(&state);
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[1].starts_with("A B"));
        assert!(lines[2].starts_with("B . . W"));
    }
}
