//! Errors used throughout the capture-go engine.
//!
//! This module defines the canonical error type returned by board
//! manipulation, successor generation, and text parsing. Protocol mismatches
//! between a caller and the core (placing on an occupied cell, feeding a
//! malformed board string) are reported as typed `Err` values so callers can
//! match on them; internal invariant breaks fail fast with panics instead.

use std::error::Error;
use std::fmt;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// Attempted to place a stone on a cell already occupied by either color.
    CellOccupied(usize),
    /// A cell index outside the board was passed in.
    CellOutOfBounds(usize),
    /// A board string contained a character that is not `b`, `w`, or `.`.
    ///
    /// Payload: (string index, offending character).
    InvalidBoardChar(usize, char),
    /// A board string was longer than the number of cells on the board.
    BoardTextTooLong(usize),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::CellOccupied(cell) => {
                write!(f, "cell {cell} is already occupied")
            }
            EngineError::CellOutOfBounds(cell) => {
                write!(f, "cell {cell} is outside the board")
            }
            EngineError::InvalidBoardChar(index, token) => {
                write!(f, "invalid board character '{token}' at index {index}")
            }
            EngineError::BoardTextTooLong(len) => {
                write!(f, "board text of length {len} exceeds the cell count")
            }
        }
    }
}

impl Error for EngineError {}
