//! Per-search transposition table keyed by position signature.
//!
//! Entries are only meaningful within one top-level move-selection call:
//! decisive scores are distance-adjusted relative to that call's root, so
//! the table is cleared whenever a new selection starts. Signature
//! collisions are assumed negligible at these table sizes.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Debug, Clone, Copy)]
pub struct TTEntry {
    pub score: i32,
    pub depth: u8,
    pub bound: Bound,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TTStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
}

#[derive(Debug, Default)]
pub struct TranspositionTable {
    entries: HashMap<u64, TTEntry>,
    stats: TTStats,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn probe(&mut self, signature: u64) -> Option<TTEntry> {
        self.stats.probes += 1;
        let hit = self.entries.get(&signature).copied();
        if hit.is_some() {
            self.stats.hits += 1;
        }
        hit
    }

    /// Insert or overwrite the entry for `signature`. The search only stores
    /// fully computed subtrees, so a later write for the same position is
    /// always at least as informed as the one it replaces.
    pub fn store(&mut self, signature: u64, entry: TTEntry) {
        self.stats.stores += 1;
        self.entries.insert(signature, entry);
    }

    /// Drop every entry and reset statistics for a fresh selection call.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats = TTStats::default();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> TTStats {
        self.stats
    }
}
