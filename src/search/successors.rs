//! Legal successor enumeration and pruning-friendly ordering.
//!
//! A legal placement is any empty cell orthogonally adjacent to at least one
//! occupied cell; the very first move on an empty board is special-cased to
//! the centre. Each child is evaluated on creation and the list is ordered
//! best-first for the mover, which is an efficiency aid for alpha-beta
//! pruning rather than a correctness requirement.

use crate::analysis::scoring::Evaluator;
use crate::board::bitboard::{neighbours, pop_lsb, BitBoard};
use crate::board::state::BoardState;
use crate::errors::EngineResult;
use crate::search::strong_points::centre_cell;

/// The set of cells where the side to move may place a stone.
///
/// `neighbours` of the occupancy already excludes occupied cells, so the
/// result is exactly the empty cells touching at least one stone.
#[inline]
pub fn legal_cells(state: &BoardState) -> BitBoard {
    neighbours(state.occupied())
}

/// Enumerate, evaluate, and order the children of `state`.
///
/// Returns an empty list when no legal placement exists; callers treat that
/// as a no-move condition and fall back to the parent state.
pub fn generate_successors(
    state: &BoardState,
    evaluator: &Evaluator,
) -> EngineResult<Vec<BoardState>> {
    // First stone of the game: the centre is the only move considered.
    if state.occupied() == 0 {
        let mut child = state.child_with(centre_cell())?;
        evaluator.evaluate(&mut child);
        return Ok(vec![child]);
    }

    let mut candidates = legal_cells(state);
    let mut scored: Vec<(i32, BoardState)> =
        Vec::with_capacity(candidates.count_ones() as usize);
    while candidates != 0 {
        let cell = pop_lsb(&mut candidates);
        let mut child = state.child_with(cell)?;
        let score = evaluator.evaluate(&mut child);
        scored.push((score, child));
    }

    // White maximizes the score, so its most promising children come first
    // in descending order; Black examines ascending.
    if state.to_move().is_maximizing() {
        scored.sort_by_key(|&(score, _)| std::cmp::Reverse(score));
    } else {
        scored.sort_by_key(|&(score, _)| score);
    }

    Ok(scored.into_iter().map(|(_, child)| child).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::bitboard::{cell_from_coord, cell_mask, BOARD_CELLS};
    use crate::board::types::Color;

    #[test]
    fn empty_board_produces_only_the_centre_move() {
        let state = BoardState::new();
        let successors = generate_successors(&state, &Evaluator::default()).unwrap();
        assert_eq!(successors.len(), 1);
        let centre = centre_cell();
        assert_ne!(successors[0].occupied() & cell_mask(centre), 0);
    }

    #[test]
    fn successors_cover_every_adjacent_empty_cell() {
        let cell = cell_from_coord(4, 4);
        let state = BoardState::from_placements(&[(cell, Color::Black)]).unwrap();
        let successors = generate_successors(&state, &Evaluator::default()).unwrap();
        assert_eq!(successors.len(), 4);
        for child in &successors {
            assert_eq!(child.occupied().count_ones(), 2);
            assert_eq!(child.to_move(), Color::Black);
        }
    }

    #[test]
    fn children_are_ordered_for_the_mover() {
        // Black to move after two placements; Black minimizes, so scores
        // must ascend.
        let state = BoardState::from_placements(&[
            (cell_from_coord(4, 4), Color::Black),
            (cell_from_coord(4, 5), Color::White),
        ])
        .unwrap();
        assert_eq!(state.to_move(), Color::Black);
        let successors = generate_successors(&state, &Evaluator::default()).unwrap();
        assert!(successors.len() > 1);
        let scores: Vec<i32> = successors.iter().map(|s| s.score()).collect();
        let mut ascending = scores.clone();
        ascending.sort_unstable();
        assert_eq!(scores, ascending);
    }

    #[test]
    fn full_board_yields_no_successors() {
        let mut state = BoardState::new();
        for cell in 0..BOARD_CELLS {
            state.play(cell).unwrap();
        }
        let successors = generate_successors(&state, &Evaluator::default()).unwrap();
        assert!(successors.is_empty());
    }
}
