//! Zobrist hashing support for incremental position signatures.
//!
//! One independent 64-bit key exists per (color, cell) pair. The keys are
//! generated from a fixed seed so signatures are deterministic across runs,
//! which is useful for testing and debugging. Signatures combine keys by
//! XOR, so placing a stone updates a position signature in O(1).

use std::sync::OnceLock;

use crate::board::bitboard::BOARD_CELLS;
use crate::board::types::Color;

#[derive(Debug)]
struct ZobristTables {
    stone_cell: [[u64; BOARD_CELLS]; 2],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut seed: u64 = 0x9E37_79B9_7F4A_7C15;

    let mut stone_cell = [[0u64; BOARD_CELLS]; 2];
    for color in &mut stone_cell {
        for cell in color.iter_mut() {
            *cell = next_random_u64(&mut seed);
        }
    }

    ZobristTables { stone_cell }
}

#[inline]
fn next_random_u64(state: &mut u64) -> u64 {
    // splitmix64
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Return the signature key for a stone of `color` on `cell`.
#[inline]
pub fn stone_key(color: Color, cell: usize) -> u64 {
    tables().stone_cell[color.index()][cell]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_deterministic() {
        assert_eq!(stone_key(Color::Black, 0), stone_key(Color::Black, 0));
        assert_eq!(stone_key(Color::White, 40), stone_key(Color::White, 40));
    }

    #[test]
    fn keys_are_pairwise_distinct() {
        let mut seen = std::collections::HashSet::new();
        for color in [Color::Black, Color::White] {
            for cell in 0..BOARD_CELLS {
                assert!(seen.insert(stone_key(color, cell)), "duplicate key");
            }
        }
    }
}
