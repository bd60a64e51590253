//! Liberty-based position evaluation.
//!
//! Sign convention, used consistently by the search: positive scores favor
//! White (the maximizing side), negative scores favor Black. Terminal
//! positions score exactly `±WIN_SCORE`; heuristic scores are clamped well
//! below the decisive band so no accumulation of bonuses can masquerade as
//! a win.
//!
//! Terminal policy: a color whose group reached zero liberties has lost. If
//! both colors sit at zero liberties simultaneously, the mover loses.
//! Self-capture costs the player who just placed the stone the game, even
//! when the placement also captured the opponent.

use crate::analysis::groups::{liberty_profile, LibertyProfile};
use crate::board::state::BoardState;
use crate::board::types::Color;

/// Score magnitude of a terminal win.
pub const WIN_SCORE: i32 = 1_000_000;

/// Search window bound, strictly larger than any reachable score.
pub const SCORE_INFINITY: i32 = 2 * WIN_SCORE;

/// Scores at or beyond this magnitude are treated as decisive. The gap below
/// `WIN_SCORE` leaves room for ply-distance adjustments made by the search.
pub const DECISIVE_THRESHOLD: i32 = WIN_SCORE - 1_000;

/// Ceiling for non-terminal heuristic scores.
const HEURISTIC_CAP: i32 = WIN_SCORE / 2;

/// Number of ranked liberty-difference terms.
pub const LIBERTY_RANKS: usize = 4;

/// Externally supplied evaluation weights. Defaults mirror the tournament
/// settings of the engine this one was tuned against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreWeights {
    /// Bonus per group in atari (exactly one liberty) on the threatened side.
    pub atari_multiplier: i32,
    /// Weights for the smallest, second-smallest, ... group liberty
    /// differences. Earlier ranks must dominate later ones.
    pub rank_multipliers: [i32; LIBERTY_RANKS],
    /// Weight for the difference in distinct liberty cells per color.
    pub distinct_liberty_multiplier: i32,
    /// Stand-in liberty count for ranks beyond a color's group count.
    pub baseline_liberties: i32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            atari_multiplier: 200_000,
            rank_multipliers: [1_000, 250, 60, 15],
            distinct_liberty_multiplier: 5,
            baseline_liberties: 8,
        }
    }
}

/// Stateless scorer; owns the weight configuration so repeated and
/// concurrent searches stay independent of each other.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    pub weights: ScoreWeights,
}

impl Evaluator {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    /// Score a state, caching the result on it. Returns the cached value on
    /// repeat calls, so evaluating an unmodified state twice is free and
    /// yields identical scores.
    pub fn evaluate(&self, state: &mut BoardState) -> i32 {
        if state.has_score() {
            return state.score();
        }
        let score = self.compute(state);
        state.set_score(score);
        score
    }

    fn compute(&self, state: &BoardState) -> i32 {
        let occupied = state.occupied();
        let black = liberty_profile(state.black_stones(), occupied);
        let white = liberty_profile(state.white_stones(), occupied);

        let black_captured = black.min_liberties() == Some(0);
        let white_captured = white.min_liberties() == Some(0);
        if black_captured || white_captured {
            return match (black_captured, white_captured) {
                (true, false) => WIN_SCORE,
                (false, true) => -WIN_SCORE,
                // Mutual capture: the mover loses. A freshly captured group
                // implies at least one stone on the board, so a mover exists.
                _ => match state.last_mover() {
                    Some(Color::Black) => WIN_SCORE,
                    _ => -WIN_SCORE,
                },
            };
        }

        let score = self.atari_term(&black, &white)
            + self.ranked_liberty_term(&black, &white)
            + self.distinct_liberty_term(&black, &white);
        score.clamp(-HEURISTIC_CAP, HEURISTIC_CAP)
    }

    /// Large bonus against the color whose minimum-liberty group sits at
    /// exactly one liberty, scaled by how many groups share that threat.
    /// Skipped when both colors are in atari at once; the ranked terms still
    /// see the symmetric pressure and whoever moves next resolves it.
    fn atari_term(&self, black: &LibertyProfile, white: &LibertyProfile) -> i32 {
        let black_min = black.min_liberties();
        let white_min = white.min_liberties();
        let black_in_atari = black_min == Some(1);
        let white_in_atari = white_min == Some(1);
        if black_in_atari && !white_in_atari {
            self.weights.atari_multiplier * black.groups_at_min() as i32
        } else if white_in_atari && !black_in_atari {
            -self.weights.atari_multiplier * white.groups_at_min() as i32
        } else {
            0
        }
    }

    /// Graduated comparison of the smallest, second-smallest, ... group
    /// liberty counts. Earlier ranks carry sharply more weight: the most
    /// threatened group matters far more than aggregate liberties.
    fn ranked_liberty_term(&self, black: &LibertyProfile, white: &LibertyProfile) -> i32 {
        let baseline = self.weights.baseline_liberties;
        let mut score = 0;
        for (rank, multiplier) in self.weights.rank_multipliers.iter().enumerate() {
            let black_libs = black.ranked_min(rank, baseline);
            let white_libs = white.ranked_min(rank, baseline);
            score += multiplier * (white_libs - black_libs);
        }
        score
    }

    /// Small term comparing each color's count of distinct liberty cells,
    /// not per-group sums.
    fn distinct_liberty_term(&self, black: &LibertyProfile, white: &LibertyProfile) -> i32 {
        self.weights.distinct_liberty_multiplier
            * (white.distinct_liberties as i32 - black.distinct_liberties as i32)
    }
}

/// Whether a score settles the game regardless of further play.
#[inline]
pub fn is_decisive(score: i32) -> bool {
    score.abs() >= DECISIVE_THRESHOLD
}

/// The winning color encoded by a decisive score, if any.
#[inline]
pub fn winner_of(score: i32) -> Option<Color> {
    if score >= DECISIVE_THRESHOLD {
        Some(Color::White)
    } else if score <= -DECISIVE_THRESHOLD {
        Some(Color::Black)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::bitboard::cell_from_coord;

    fn place_all(cells: &[(usize, usize, Color)]) -> BoardState {
        let placements: Vec<(usize, Color)> = cells
            .iter()
            .map(|&(r, c, color)| (cell_from_coord(r, c), color))
            .collect();
        BoardState::from_placements(&placements).unwrap()
    }

    #[test]
    fn evaluation_is_deterministic() {
        let evaluator = Evaluator::default();
        let mut a = place_all(&[
            (3, 3, Color::Black),
            (3, 4, Color::White),
            (4, 3, Color::Black),
        ]);
        let mut b = a;
        assert_eq!(evaluator.evaluate(&mut a), evaluator.evaluate(&mut b));
        // Second read comes from the cache and must not change.
        let first = a.score();
        assert_eq!(evaluator.evaluate(&mut a), first);
    }

    #[test]
    fn surrounded_stone_is_an_immediate_win_for_the_surrounding_color() {
        // Four white stones around a single black stone at the centre.
        let centre = BOARD_MID;
        let mut state = place_all(&[
            (centre, centre, Color::Black),
            (centre - 1, centre, Color::White),
            (centre + 1, centre, Color::White),
            (centre, centre - 1, Color::White),
            (centre, centre + 1, Color::White),
        ]);
        let score = Evaluator::default().evaluate(&mut state);
        assert_eq!(score, WIN_SCORE);
        assert_eq!(winner_of(score), Some(Color::White));
    }

    const BOARD_MID: usize = crate::board::bitboard::BOARD_EDGE / 2;

    #[test]
    fn zero_liberty_color_loses_regardless_of_turn() {
        // Black corner stone smothered by White; the position is decided no
        // matter who is to move next.
        let mut state = place_all(&[
            (0, 0, Color::Black),
            (0, 1, Color::White),
            (1, 0, Color::White),
        ]);
        let score = Evaluator::default().evaluate(&mut state);
        assert_eq!(score, WIN_SCORE);
        assert_eq!(winner_of(score), Some(Color::White));
    }

    #[test]
    fn mutual_capture_is_lost_by_the_mover() {
        // Corner: Black at (0,0) with a White stone at (0,1) whose only
        // other liberties are filled by Black. White just played the final
        // smothering stone at (1,0); both corner groups end at zero
        // liberties, and the mover (White) loses.
        let mut state = place_all(&[
            (0, 0, Color::Black),
            (0, 1, Color::White),
            (0, 2, Color::Black),
            (1, 1, Color::Black),
            (1, 0, Color::White),
        ]);
        assert_eq!(state.last_mover(), Some(Color::White));
        let score = Evaluator::default().evaluate(&mut state);
        assert_eq!(score, -WIN_SCORE);
        assert_eq!(winner_of(score), Some(Color::Black));
    }

    #[test]
    fn atari_scores_strictly_worse_than_two_liberties() {
        // Black edge stone reduced to one liberty (only (1,3) remains)...
        let atari = place_all(&[
            (0, 3, Color::Black),
            (0, 2, Color::White),
            (0, 4, Color::White),
        ]);
        // ...versus the same stone count with the right-hand White stone
        // stepped one cell away, leaving Black two liberties.
        let two_libs = place_all(&[
            (0, 3, Color::Black),
            (0, 2, Color::White),
            (0, 5, Color::White),
        ]);
        let evaluator = Evaluator::default();
        let mut atari = atari;
        let mut two_libs = two_libs;
        let atari_score = evaluator.evaluate(&mut atari);
        let relaxed_score = evaluator.evaluate(&mut two_libs);
        // Positive favors White, so Black prefers the strictly smaller score.
        assert!(
            atari_score > relaxed_score,
            "atari {atari_score} should be worse for Black than {relaxed_score}"
        );
    }

    #[test]
    fn heuristic_scores_never_reach_the_decisive_band() {
        let mut state = place_all(&[
            (0, 3, Color::Black),
            (0, 2, Color::White),
            (0, 4, Color::White),
            (5, 5, Color::Black),
        ]);
        let score = Evaluator::default().evaluate(&mut state);
        assert!(!is_decisive(score));
    }

    #[test]
    fn more_distinct_liberties_favor_their_owner() {
        let weights = ScoreWeights {
            atari_multiplier: 0,
            rank_multipliers: [0; LIBERTY_RANKS],
            distinct_liberty_multiplier: 5,
            baseline_liberties: 8,
        };
        let evaluator = Evaluator::new(weights);
        // One corner stone (2 liberties) against one centre stone (4).
        let mut state = place_all(&[(0, 0, Color::Black), (4, 4, Color::White)]);
        let score = evaluator.evaluate(&mut state);
        assert_eq!(score, 5 * (4 - 2));
    }
}
