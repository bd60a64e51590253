//! Star-point opening table.
//!
//! A small set of symmetric, strategically strong cells used to widen the
//! root move list beyond plain adjacency generation. The table is generated
//! once from the board edge length rather than hard-coded per size: a ring
//! of four points offset 2 from the corners on any board of edge 7 or more,
//! plus an inner ring offset 3 on boards of edge 9 or more. On 9×9 this
//! reproduces c3, c7, g3, g7, d4, d6, f4, f6.

use std::sync::OnceLock;

use crate::board::bitboard::{cell_from_coord, BOARD_EDGE};

static STRONG_POINTS: OnceLock<Vec<usize>> = OnceLock::new();

/// The star-point cells for the compiled board size, ascending.
pub fn strong_points() -> &'static [usize] {
    STRONG_POINTS
        .get_or_init(|| build_strong_points(BOARD_EDGE))
        .as_slice()
}

/// The centre cell. Not part of the star-point ring; root augmentation
/// handles it separately.
#[inline]
pub const fn centre_cell() -> usize {
    cell_from_coord(BOARD_EDGE / 2, BOARD_EDGE / 2)
}

fn build_strong_points(edge: usize) -> Vec<usize> {
    let mut points = Vec::new();
    for offset in [2usize, 3] {
        if edge < 2 * offset + 3 {
            // Ring would collapse onto or past the centre on this board.
            continue;
        }
        let near = offset;
        let far = edge - 1 - offset;
        for row in [near, far] {
            for col in [near, far] {
                points.push(row * edge + col);
            }
        }
    }
    points.sort_unstable();
    points
}
