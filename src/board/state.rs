//! Core board state representation.
//!
//! `BoardState` is the value snapshot the search copies at every node: two
//! disjoint stone bitboards, a turn counter, an incrementally maintained
//! Zobrist signature, and a lazily cached evaluation score. Every state in a
//! game or search tree is produced by copying a parent and adding exactly
//! one stone; states are never mutated in place once shared across search
//! branches.

use crate::board::bitboard::{cell_mask, BitBoard, BOARD_CELLS};
use crate::board::types::{Color, Stone};
use crate::board::zobrist::stone_key;
use crate::errors::{EngineError, EngineResult};

/// Compact board snapshot with incremental signature and cached score.
///
/// The two stone sets are disjoint by construction: placement checks the
/// union before setting a bit. The side to move is derived from the turn
/// counter, which starts at 1 and increments on every placement regardless
/// of color; an odd turn means Black to move.
#[derive(Debug, Clone, Copy)]
pub struct BoardState {
    black: BitBoard,
    white: BitBoard,
    turn: u16,
    signature: u64,
    score: Option<i32>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardState {
    pub fn new() -> Self {
        Self {
            black: 0,
            white: 0,
            turn: 1,
            signature: 0,
            score: None,
        }
    }

    /// Build a position from a list of (cell, color) placements, applied in
    /// order. The turn counter ends up at `placements.len() + 1`.
    pub fn from_placements(placements: &[(usize, Color)]) -> EngineResult<Self> {
        let mut state = Self::new();
        for &(cell, color) in placements {
            state.place(cell, color)?;
        }
        Ok(state)
    }

    #[inline]
    pub fn to_move(&self) -> Color {
        if self.turn % 2 == 1 {
            Color::Black
        } else {
            Color::White
        }
    }

    /// The color that placed the most recent stone, if any stone exists.
    #[inline]
    pub fn last_mover(&self) -> Option<Color> {
        if self.occupied() == 0 {
            None
        } else {
            Some(self.to_move().opponent())
        }
    }

    #[inline]
    pub fn turn(&self) -> u16 {
        self.turn
    }

    #[inline]
    pub fn signature(&self) -> u64 {
        self.signature
    }

    #[inline]
    pub fn black_stones(&self) -> BitBoard {
        self.black
    }

    #[inline]
    pub fn white_stones(&self) -> BitBoard {
        self.white
    }

    #[inline]
    pub fn stones(&self, color: Color) -> BitBoard {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    #[inline]
    pub fn occupied(&self) -> BitBoard {
        self.black | self.white
    }

    #[inline]
    pub fn is_empty_cell(&self, cell: usize) -> bool {
        cell < BOARD_CELLS && self.occupied() & cell_mask(cell) == 0
    }

    pub fn stone_at(&self, cell: usize) -> Stone {
        let mask = cell_mask(cell);
        if self.black & mask != 0 {
            Stone::Black
        } else if self.white & mask != 0 {
            Stone::White
        } else {
            Stone::Empty
        }
    }

    /// Place a stone of `color` on `cell`.
    ///
    /// Fails if the cell is occupied by either color or lies outside the
    /// board, leaving the state untouched. On success the stone bit is set,
    /// the signature is XOR-updated, the turn advances, and any cached score
    /// becomes stale.
    pub fn place(&mut self, cell: usize, color: Color) -> EngineResult<()> {
        if cell >= BOARD_CELLS {
            return Err(EngineError::CellOutOfBounds(cell));
        }
        let mask = cell_mask(cell);
        if self.occupied() & mask != 0 {
            return Err(EngineError::CellOccupied(cell));
        }
        match color {
            Color::Black => self.black |= mask,
            Color::White => self.white |= mask,
        }
        self.signature ^= stone_key(color, cell);
        self.turn += 1;
        self.score = None;
        Ok(())
    }

    /// Place a stone for the side to move.
    pub fn play(&mut self, cell: usize) -> EngineResult<()> {
        self.place(cell, self.to_move())
    }

    /// Copy this state and play one stone for the side to move.
    pub fn child_with(&self, cell: usize) -> EngineResult<BoardState> {
        let mut child = *self;
        child.play(cell)?;
        Ok(child)
    }

    #[inline]
    pub fn has_score(&self) -> bool {
        self.score.is_some()
    }

    #[inline]
    pub fn set_score(&mut self, score: i32) {
        self.score = Some(score);
    }

    /// Read the cached evaluation score.
    ///
    /// Reading a score that was never computed is a caller/core protocol
    /// mismatch, not an operational condition, so it fails fast.
    #[inline]
    pub fn score(&self) -> i32 {
        match self.score {
            Some(score) => score,
            None => panic!("score read before evaluation; run the evaluator on this state first"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::bitboard::cell_from_coord;
    use crate::board::zobrist::stone_key;

    #[test]
    fn stone_sets_stay_disjoint() {
        let state = BoardState::from_placements(&[
            (10, Color::Black),
            (11, Color::White),
            (12, Color::Black),
        ])
        .unwrap();
        assert_eq!(state.black_stones() & state.white_stones(), 0);
        assert_eq!(state.turn(), 4);
    }

    #[test]
    fn to_move_follows_turn_parity() {
        let mut state = BoardState::new();
        assert_eq!(state.to_move(), Color::Black);
        state.play(0).unwrap();
        assert_eq!(state.to_move(), Color::White);
        state.play(1).unwrap();
        assert_eq!(state.to_move(), Color::Black);
    }

    #[test]
    fn placing_on_occupied_cell_fails_and_leaves_state_unmodified() {
        let mut state = BoardState::new();
        state.place(20, Color::Black).unwrap();
        let before = state;

        let err = state.place(20, Color::White).unwrap_err();
        assert_eq!(err, EngineError::CellOccupied(20));
        assert_eq!(state.black_stones(), before.black_stones());
        assert_eq!(state.white_stones(), before.white_stones());
        assert_eq!(state.turn(), before.turn());
        assert_eq!(state.signature(), before.signature());
    }

    #[test]
    fn placing_out_of_bounds_fails() {
        let mut state = BoardState::new();
        let err = state.place(BOARD_CELLS, Color::Black).unwrap_err();
        assert_eq!(err, EngineError::CellOutOfBounds(BOARD_CELLS));
    }

    #[test]
    fn signature_is_incremental_xor_of_stone_keys() {
        let a = cell_from_coord(2, 3);
        let b = cell_from_coord(5, 5);
        let state =
            BoardState::from_placements(&[(a, Color::Black), (b, Color::White)]).unwrap();
        let expected = stone_key(Color::Black, a) ^ stone_key(Color::White, b);
        assert_eq!(state.signature(), expected);
    }

    #[test]
    fn placement_order_does_not_change_signature() {
        let first =
            BoardState::from_placements(&[(3, Color::Black), (40, Color::White)]).unwrap();
        let second =
            BoardState::from_placements(&[(40, Color::White), (3, Color::Black)]).unwrap();
        assert_eq!(first.signature(), second.signature());
    }

    #[test]
    fn child_with_copies_the_parent() {
        let parent = BoardState::from_placements(&[(40, Color::Black)]).unwrap();
        let child = parent.child_with(41).unwrap();
        assert_eq!(parent.turn(), 2);
        assert_eq!(child.turn(), 3);
        assert_eq!(child.stone_at(41), Stone::White);
        assert_eq!(parent.stone_at(41), Stone::Empty);
    }

    #[test]
    fn placement_invalidates_cached_score() {
        let mut state = BoardState::new();
        state.set_score(17);
        assert!(state.has_score());
        state.play(0).unwrap();
        assert!(!state.has_score());
    }

    #[test]
    #[should_panic(expected = "score read before evaluation")]
    fn reading_uncomputed_score_panics() {
        let state = BoardState::new();
        let _ = state.score();
    }
}
