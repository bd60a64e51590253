//! Read-only query for just-captured groups.
//!
//! Callers that report or animate stone removals need the exact cells of a
//! zero-liberty group after a capturing move. This is a derived query over
//! the position, independent of the search loop.

use crate::analysis::groups::{group_liberties, groups};
use crate::board::bitboard::{cells_of, BitBoard};
use crate::board::state::BoardState;
use crate::board::types::Color;

/// Cells of every zero-liberty group belonging to the losing color.
///
/// Returns an empty bitboard when no group has been captured. When both
/// colors hold zero-liberty groups at once, only the mover's groups are
/// reported: the mover loses a mutual capture, so theirs are the stones
/// that leave the board.
pub fn captured_cells(state: &BoardState) -> BitBoard {
    let occupied = state.occupied();
    let dead_for = |color: Color| -> BitBoard {
        groups(state.stones(color))
            .into_iter()
            .filter(|&group| group_liberties(group, occupied) == 0)
            .fold(0, |acc, group| acc | group)
    };

    let black_dead = dead_for(Color::Black);
    let white_dead = dead_for(Color::White);
    match (black_dead != 0, white_dead != 0) {
        (true, false) => black_dead,
        (false, true) => white_dead,
        (false, false) => 0,
        (true, true) => match state.last_mover() {
            Some(Color::Black) => black_dead,
            _ => white_dead,
        },
    }
}

/// Convenience form returning the captured cell indices in ascending order.
pub fn captured_cell_indices(state: &BoardState) -> Vec<usize> {
    cells_of(captured_cells(state))
}
