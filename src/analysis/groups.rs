//! Connected-component extraction and liberty accounting.
//!
//! A group is a maximal set of same-colored stones connected by orthogonal
//! adjacency; a liberty is an empty cell adjacent to any stone of the group.
//! The per-color summary is returned as one aggregate value rather than
//! through out-parameters, and distinct liberties are counted over the
//! *union* of liberty cells so a cell shared between two adjacent groups is
//! never double-counted.

use crate::board::bitboard::{cell_mask, neighbours, BitBoard};

/// Liberty summary for all groups of one color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibertyProfile {
    /// Per-group liberty counts, sorted ascending. Empty when the color has
    /// no stones on the board.
    pub group_liberties: Vec<u32>,
    /// Cardinality of the union of liberty cells across all groups.
    pub distinct_liberties: u32,
}

impl LibertyProfile {
    /// Smallest liberty count among the color's groups.
    #[inline]
    pub fn min_liberties(&self) -> Option<u32> {
        self.group_liberties.first().copied()
    }

    /// How many groups are tied at the minimum liberty count.
    pub fn groups_at_min(&self) -> u32 {
        match self.min_liberties() {
            Some(min) => self
                .group_liberties
                .iter()
                .take_while(|&&libs| libs == min)
                .count() as u32,
            None => 0,
        }
    }

    /// The `rank`-th smallest group liberty count, or `baseline` when the
    /// color has fewer groups than that.
    #[inline]
    pub fn ranked_min(&self, rank: usize, baseline: i32) -> i32 {
        self.group_liberties
            .get(rank)
            .map_or(baseline, |&libs| libs as i32)
    }
}

/// Grow `seed` to its full group by fixed-point same-color expansion.
pub fn flood_fill(stones: BitBoard, seed: BitBoard) -> BitBoard {
    debug_assert!(seed & stones == seed);
    let mut group = seed;
    loop {
        let grown = neighbours(group) & stones;
        if grown == 0 {
            break;
        }
        group |= grown;
    }
    group
}

/// Partition a color's stones into connected groups.
pub fn groups(stones: BitBoard) -> Vec<BitBoard> {
    let mut pool = stones;
    let mut parts = Vec::new();
    while pool != 0 {
        let seed = cell_mask(pool.trailing_zeros() as usize);
        let group = flood_fill(stones, seed);
        // A component is wholly inside or outside the pool, so this removes
        // exactly the stones just visited.
        pool &= !group;
        parts.push(group);
    }
    parts
}

/// The liberty cells of one group: empty cells adjacent to any of its stones.
#[inline]
pub fn group_liberties(group: BitBoard, occupied: BitBoard) -> BitBoard {
    neighbours(group) & !occupied
}

/// Compute the liberty summary for one color's stones in a single pass.
pub fn liberty_profile(stones: BitBoard, occupied: BitBoard) -> LibertyProfile {
    let mut counts = Vec::new();
    let mut union: BitBoard = 0;
    for group in groups(stones) {
        let libs = group_liberties(group, occupied);
        union |= libs;
        counts.push(libs.count_ones());
    }
    counts.sort_unstable();
    LibertyProfile {
        group_liberties: counts,
        distinct_liberties: union.count_ones(),
    }
}
