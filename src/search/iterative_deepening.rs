//! Iterative-deepening alpha-beta search with transposition table and
//! wall-clock time control.
//!
//! White is the maximizing side and Black the minimizing side, matching the
//! evaluation sign convention. Depth passes run to completion before their
//! result is trusted: when the budget expires mid-depth, the partial pass is
//! discarded and the best move(s) from the last finished depth are kept. A
//! timeout is an expected, frequent condition, so it propagates as a plain
//! `None` value through every frame rather than by unwinding.
//!
//! All randomness (the strong-point widening pick, the discard knob, and
//! the final tie-break among equally good root moves) flows through one
//! seedable generator owned by the engine, so runs are reproducible.

use std::time::{Duration, Instant};

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::analysis::scoring::{
    is_decisive, winner_of, Evaluator, ScoreWeights, DECISIVE_THRESHOLD, SCORE_INFINITY,
};
use crate::board::bitboard::{cell_mask, neighbours};
use crate::board::state::BoardState;
use crate::board::types::Color;
use crate::errors::EngineResult;
use crate::search::strong_points::{centre_cell, strong_points};
use crate::search::successors::generate_successors;
use crate::search::transposition_table::{Bound, TTEntry, TranspositionTable};

/// Nodes between wall-clock samples. Checking every node costs more than it
/// saves; the budget is advisory and may be overshot by one interval.
const TIME_CHECK_INTERVAL: u64 = 1024;

/// Engine-level knobs fixed at construction time. The time budget and depth
/// ceiling are per-call arguments of [`SearchEngine::select_move`] instead.
#[derive(Debug, Clone, Copy)]
pub struct SearchSettings {
    pub weights: ScoreWeights,
    /// Fraction of root successors discarded at random, `0.0..=1.0`. Used to
    /// weaken the engine for lower difficulty settings; at least one
    /// successor always survives.
    pub discard_fraction: f64,
    /// Seed for all search randomness. `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            discard_fraction: 0.0,
            seed: None,
        }
    }
}

/// Result of one top-level move selection.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The selected child state, or a copy of the parent when no legal
    /// successor existed.
    pub chosen: BoardState,
    pub score: i32,
    /// The winning color when the score is decisive.
    pub winner: Option<Color>,
    /// Deepest fully completed iteration; 0 when none finished in budget.
    pub completed_depth: u8,
    pub nodes: u64,
    pub elapsed_ms: u64,
}

struct SearchContext {
    deadline: Instant,
    nodes: u64,
    aborted: bool,
}

impl SearchContext {
    /// Sample the clock at a bounded node interval. Once tripped, the flag
    /// stays set so every active frame abandons its work.
    #[inline]
    fn should_abort(&mut self) -> bool {
        if !self.aborted
            && self.nodes % TIME_CHECK_INTERVAL == 0
            && Instant::now() >= self.deadline
        {
            self.aborted = true;
        }
        self.aborted
    }
}

pub struct SearchEngine {
    evaluator: Evaluator,
    tt: TranspositionTable,
    rng: StdRng,
    settings: SearchSettings,
}

impl SearchEngine {
    pub fn new(settings: SearchSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            evaluator: Evaluator::new(settings.weights),
            tt: TranspositionTable::new(),
            rng,
            settings,
        }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Select the best move from `state` within `time_budget`, deepening
    /// iteratively up to `depth_ceiling` plies.
    ///
    /// Degrades gracefully: with no legal successor the parent state comes
    /// back unchanged, and when even depth 1 cannot finish in budget the
    /// best child by shallow ordering is returned.
    pub fn select_move(
        &mut self,
        state: &BoardState,
        time_budget: Duration,
        depth_ceiling: u8,
    ) -> EngineResult<SearchOutcome> {
        let started = Instant::now();
        // Entries from a previous call are meaningless here: their decisive
        // scores were distance-adjusted against a different root.
        self.tt.clear();

        let mut successors = generate_successors(state, &self.evaluator)?;
        self.augment_root(state, &mut successors)?;
        self.apply_weakening(&mut successors);

        if successors.is_empty() {
            warn!("no legal successor at the root; returning the parent state");
            let mut parent = *state;
            let score = self.evaluator.evaluate(&mut parent);
            return Ok(SearchOutcome {
                chosen: parent,
                score,
                winner: winner_of(score),
                completed_depth: 0,
                nodes: 0,
                elapsed_ms: started.elapsed().as_millis() as u64,
            });
        }

        let deadline = started + time_budget.max(Duration::from_millis(1));
        let mut ctx = SearchContext {
            deadline,
            nodes: 0,
            aborted: false,
        };

        let maximizing = state.to_move().is_maximizing();
        let mut best_score = 0;
        let mut best_indices: Vec<usize> = Vec::new();
        let mut completed_depth = 0u8;

        for depth in 1..=depth_ceiling.max(1) {
            if Instant::now() >= deadline {
                debug!("budget exhausted before depth {depth}");
                break;
            }
            let pass_started = Instant::now();

            let pass = self.root_pass(&successors, depth, maximizing, &mut ctx)?;
            let (pass_best, pass_indices) = match pass {
                Some(result) => result,
                None => {
                    debug!(
                        "budget expired during depth {depth}; keeping depth {completed_depth}"
                    );
                    break;
                }
            };

            best_score = pass_best;
            best_indices = pass_indices;
            completed_depth = depth;
            debug!(
                "completed depth {depth}: score {best_score}, {} candidate move(s), {} nodes, {} ms",
                best_indices.len(),
                ctx.nodes,
                pass_started.elapsed().as_millis()
            );

            if is_decisive(best_score) {
                debug!("decisive score at depth {depth}; stopping the deepening loop");
                break;
            }
        }

        if best_indices.is_empty() {
            // Interrupted before the first depth finished. The successor
            // list is ordered best-first for the mover, so index 0 is the
            // strongest unsearched legal move available.
            warn!("search interrupted before any depth completed; using shallow ordering");
            best_indices.push(0);
            best_score = successors[0].score();
        }

        let pick = best_indices[self.rng.random_range(0..best_indices.len())];
        let chosen = successors[pick];
        Ok(SearchOutcome {
            chosen,
            score: best_score,
            winner: winner_of(best_score),
            completed_depth,
            nodes: ctx.nodes,
            elapsed_ms: started.elapsed().as_millis() as u64,
        })
    }

    /// One full-window alpha-beta pass at exactly `depth` plies, without
    /// deepening or a deadline. Useful for deterministic strength levels and
    /// for validating the iterative loop against a direct search.
    pub fn select_move_fixed_depth(
        &mut self,
        state: &BoardState,
        depth: u8,
    ) -> EngineResult<SearchOutcome> {
        let started = Instant::now();
        self.tt.clear();

        let mut successors = generate_successors(state, &self.evaluator)?;
        self.augment_root(state, &mut successors)?;
        self.apply_weakening(&mut successors);

        if successors.is_empty() {
            warn!("no legal successor at the root; returning the parent state");
            let mut parent = *state;
            let score = self.evaluator.evaluate(&mut parent);
            return Ok(SearchOutcome {
                chosen: parent,
                score,
                winner: winner_of(score),
                completed_depth: 0,
                nodes: 0,
                elapsed_ms: started.elapsed().as_millis() as u64,
            });
        }

        // A far-future deadline keeps the pass complete.
        let mut ctx = SearchContext {
            deadline: started + Duration::from_secs(60 * 60 * 24),
            nodes: 0,
            aborted: false,
        };
        let maximizing = state.to_move().is_maximizing();
        let depth = depth.max(1);
        let (best_score, best_indices) = self
            .root_pass(&successors, depth, maximizing, &mut ctx)?
            .unwrap_or_else(|| (successors[0].score(), vec![0]));

        let pick = best_indices[self.rng.random_range(0..best_indices.len())];
        let chosen = successors[pick];
        Ok(SearchOutcome {
            chosen,
            score: best_score,
            winner: winner_of(best_score),
            completed_depth: depth,
            nodes: ctx.nodes,
            elapsed_ms: started.elapsed().as_millis() as u64,
        })
    }

    /// Score every root successor to `depth` plies under the full window.
    /// Returns `None` when the deadline tripped mid-pass, along with the
    /// indices of all successors tied at the best score otherwise.
    fn root_pass(
        &mut self,
        successors: &[BoardState],
        depth: u8,
        maximizing: bool,
        ctx: &mut SearchContext,
    ) -> EngineResult<Option<(i32, Vec<usize>)>> {
        let mut best = if maximizing {
            -SCORE_INFINITY
        } else {
            SCORE_INFINITY
        };
        let mut indices: Vec<usize> = Vec::new();

        for (index, child) in successors.iter().enumerate() {
            let value = match self.alpha_beta(
                child,
                depth - 1,
                -SCORE_INFINITY,
                SCORE_INFINITY,
                1,
                ctx,
            )? {
                Some(value) => value,
                None => return Ok(None),
            };

            let better = if maximizing { value > best } else { value < best };
            if better {
                best = value;
                indices.clear();
                indices.push(index);
            } else if value == best {
                indices.push(index);
            }
        }
        Ok(Some((best, indices)))
    }

    /// Alpha-beta with transposition-table tightening.
    ///
    /// Returns `Ok(None)` once the deadline trips; every caller must observe
    /// that before trusting a subsolution. Decisive leaf scores are adjusted
    /// by ply distance from the root so faster wins and slower losses are
    /// preferred.
    fn alpha_beta(
        &mut self,
        state: &BoardState,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        ply: u8,
        ctx: &mut SearchContext,
    ) -> EngineResult<Option<i32>> {
        ctx.nodes += 1;
        if ctx.should_abort() {
            return Ok(None);
        }

        // Children arrive pre-scored from the successor generator.
        let stand_score = state.score();
        if is_decisive(stand_score) || depth == 0 {
            return Ok(Some(distance_adjusted(stand_score, ply)));
        }

        let signature = state.signature();
        let entry_alpha = alpha;
        let entry_beta = beta;
        if let Some(entry) = self.tt.probe(signature) {
            if entry.depth >= depth {
                match entry.bound {
                    Bound::Exact => return Ok(Some(entry.score)),
                    Bound::Lower => alpha = alpha.max(entry.score),
                    Bound::Upper => beta = beta.min(entry.score),
                }
                if alpha >= beta {
                    return Ok(Some(entry.score));
                }
            }
        }

        let successors = generate_successors(state, &self.evaluator)?;
        if successors.is_empty() {
            return Ok(Some(distance_adjusted(stand_score, ply)));
        }

        let maximizing = state.to_move().is_maximizing();
        let mut best = if maximizing {
            -SCORE_INFINITY
        } else {
            SCORE_INFINITY
        };
        for child in &successors {
            let value = match self.alpha_beta(child, depth - 1, alpha, beta, ply + 1, ctx)? {
                Some(value) => value,
                None => return Ok(None),
            };
            if maximizing {
                best = best.max(value);
                alpha = alpha.max(best);
            } else {
                best = best.min(value);
                beta = beta.min(best);
            }
            if alpha >= beta {
                break;
            }
        }

        let bound = if best >= entry_beta {
            Bound::Lower
        } else if best <= entry_alpha {
            Bound::Upper
        } else {
            Bound::Exact
        };
        self.tt.store(
            signature,
            TTEntry {
                score: best,
                depth,
                bound,
            },
        );
        Ok(Some(best))
    }

    /// Widen the root move list with engineered openings that adjacency
    /// generation would not yet propose: one random pick from the star
    /// points that are empty with all four neighbours free, plus the centre
    /// if still empty. Candidates already reachable by adjacency are skipped
    /// rather than duplicated.
    fn augment_root(
        &mut self,
        state: &BoardState,
        successors: &mut Vec<BoardState>,
    ) -> EngineResult<()> {
        let occupied = state.occupied();
        if occupied == 0 {
            // The opening move is already fixed to the centre.
            return Ok(());
        }
        let adjacent = neighbours(occupied);

        let mut extras: Vec<usize> = Vec::new();
        let candidates: Vec<usize> = strong_points()
            .iter()
            .copied()
            .filter(|&cell| {
                let mask = cell_mask(cell);
                if occupied & mask != 0 {
                    return false;
                }
                let around = neighbours(mask);
                around.count_ones() == 4 && around & occupied == 0
            })
            .collect();
        if !candidates.is_empty() {
            extras.push(candidates[self.rng.random_range(0..candidates.len())]);
        }

        let centre = centre_cell();
        if occupied & cell_mask(centre) == 0 {
            extras.push(centre);
        }

        for cell in extras {
            if adjacent & cell_mask(cell) != 0 {
                continue; // already in the generated list
            }
            let mut child = state.child_with(cell)?;
            self.evaluator.evaluate(&mut child);
            successors.push(child);
        }
        Ok(())
    }

    /// Randomly discard the configured fraction of root successors, always
    /// keeping at least one. This deliberately weakens the engine; it is
    /// never an optimization.
    fn apply_weakening(&mut self, successors: &mut Vec<BoardState>) {
        let fraction = self.settings.discard_fraction.clamp(0.0, 1.0);
        if fraction <= 0.0 || successors.len() <= 1 {
            return;
        }
        let mut discard = (successors.len() as f64 * fraction) as usize;
        discard = discard.min(successors.len() - 1);
        for _ in 0..discard {
            let index = self.rng.random_range(0..successors.len());
            successors.remove(index);
        }
    }
}

/// Pull decisive scores toward the root by ply distance: wins shrink so
/// nearer wins rank higher, losses grow so farther losses rank higher.
/// Heuristic scores pass through unadjusted.
#[inline]
fn distance_adjusted(score: i32, ply: u8) -> i32 {
    if score >= DECISIVE_THRESHOLD {
        score - i32::from(ply)
    } else if score <= -DECISIVE_THRESHOLD {
        score + i32::from(ply)
    } else {
        score
    }
}
