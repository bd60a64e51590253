//! Single-line board text parsing and serialization.
//!
//! The alphabet is the one used across process boundaries by the original
//! web front end: one character per cell in row-major order, `b`/`B` for
//! Black, `w`/`W` for White, `.` for empty. Strings shorter than the cell
//! count leave the remaining cells empty; longer strings and unknown
//! characters are rejected.

use crate::board::bitboard::BOARD_CELLS;
use crate::board::state::BoardState;
use crate::board::types::{Color, Stone};
use crate::errors::{EngineError, EngineResult};

/// Parse a board line into a position. The turn counter ends up equal to
/// the stone count plus one, so the side to move falls out of parity.
pub fn parse_board(text: &str) -> EngineResult<BoardState> {
    let mut state = BoardState::new();
    for (index, token) in text.chars().enumerate() {
        if index >= BOARD_CELLS {
            return Err(EngineError::BoardTextTooLong(text.chars().count()));
        }
        match token.to_ascii_lowercase() {
            'b' => state.place(index, Color::Black)?,
            'w' => state.place(index, Color::White)?,
            '.' => {}
            _ => return Err(EngineError::InvalidBoardChar(index, token)),
        }
    }
    Ok(state)
}

/// Serialize a position back into one character per cell.
pub fn render_board_line(state: &BoardState) -> String {
    let mut out = String::with_capacity(BOARD_CELLS);
    for cell in 0..BOARD_CELLS {
        out.push(match state.stone_at(cell) {
            Stone::Black => 'B',
            Stone::White => 'W',
            Stone::Empty => '.',
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_mixed_position() {
        let mut text = String::new();
        text.push_str("B.W");
        text.push_str(&".".repeat(BOARD_CELLS - 4));
        text.push('B');
        let state = parse_board(&text).unwrap();
        assert_eq!(render_board_line(&state), text);
        assert_eq!(state.turn(), 4);
    }

    #[test]
    fn lowercase_stones_are_accepted() {
        let state = parse_board("bw").unwrap();
        assert_eq!(state.stone_at(0), Stone::Black);
        assert_eq!(state.stone_at(1), Stone::White);
        assert_eq!(state.stone_at(2), Stone::Empty);
    }

    #[test]
    fn unknown_characters_are_rejected() {
        let err = parse_board(".x").unwrap_err();
        assert_eq!(err, EngineError::InvalidBoardChar(1, 'x'));
    }

    #[test]
    fn overlong_text_is_rejected() {
        let text = ".".repeat(BOARD_CELLS + 1);
        let err = parse_board(&text).unwrap_err();
        assert_eq!(err, EngineError::BoardTextTooLong(BOARD_CELLS + 1));
    }
}
