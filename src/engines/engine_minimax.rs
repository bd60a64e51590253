//! Iterative-deepening minimax engine behind the `Engine` trait.
//!
//! Wraps the core `SearchEngine` with default time/depth settings and maps
//! its outcome into the trait's output payload, including diagnostic info
//! lines in the style the binaries print.

use crate::board::state::BoardState;
use crate::engines::engine_trait::{Engine, EngineOutput, MoveRequest};
use crate::search::iterative_deepening::{SearchEngine, SearchSettings};
use std::time::Duration;

pub const DEFAULT_TIME_BUDGET_MS: u64 = 3_000;
pub const DEFAULT_DEPTH_CEILING: u8 = 64;

pub struct MinimaxEngine {
    search: SearchEngine,
    default_time_budget_ms: u64,
    default_depth_ceiling: u8,
}

impl MinimaxEngine {
    pub fn new(settings: SearchSettings) -> Self {
        Self {
            search: SearchEngine::new(settings),
            default_time_budget_ms: DEFAULT_TIME_BUDGET_MS,
            default_depth_ceiling: DEFAULT_DEPTH_CEILING,
        }
    }

    pub fn with_defaults(
        settings: SearchSettings,
        time_budget_ms: u64,
        depth_ceiling: u8,
    ) -> Self {
        Self {
            search: SearchEngine::new(settings),
            default_time_budget_ms: time_budget_ms,
            default_depth_ceiling: depth_ceiling,
        }
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new(SearchSettings::default())
    }
}

impl Engine for MinimaxEngine {
    fn name(&self) -> &str {
        "AtariGo Minimax"
    }

    fn choose_move(
        &mut self,
        state: &BoardState,
        request: &MoveRequest,
    ) -> Result<EngineOutput, String> {
        let budget = Duration::from_millis(
            request.time_budget_ms.unwrap_or(self.default_time_budget_ms),
        );
        let ceiling = request.depth_ceiling.unwrap_or(self.default_depth_ceiling);

        let outcome = self
            .search
            .select_move(state, budget, ceiling)
            .map_err(|e| e.to_string())?;

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string minimax_engine depth {} score {} nodes {} time_ms {}",
            outcome.completed_depth, outcome.score, outcome.nodes, outcome.elapsed_ms
        ));
        if let Some(winner) = outcome.winner {
            out.info_lines
                .push(format!("info string minimax_engine winner {winner}"));
        }

        // An unchanged signature means the search degraded to the parent
        // state: there was no legal move to make.
        if outcome.chosen.signature() == state.signature() {
            out.score = outcome.score;
            out.winner = outcome.winner;
            return Ok(out);
        }

        out.chosen = Some(outcome.chosen);
        out.score = outcome.score;
        out.winner = outcome.winner;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::bitboard::cell_from_coord;
    use crate::board::types::Color;

    #[test]
    fn engine_reports_a_move_and_diagnostics() {
        let state = BoardState::from_placements(&[
            (cell_from_coord(4, 4), Color::Black),
            (cell_from_coord(4, 5), Color::White),
        ])
        .unwrap();
        let mut engine = MinimaxEngine::new(SearchSettings {
            seed: Some(1),
            ..SearchSettings::default()
        });
        let request = MoveRequest {
            time_budget_ms: Some(2_000),
            depth_ceiling: Some(2),
        };
        let out = engine.choose_move(&state, &request).unwrap();
        let chosen = out.chosen.expect("a legal move exists");
        assert_eq!(chosen.occupied().count_ones(), 3);
        assert!(!out.info_lines.is_empty());
    }

    #[test]
    fn engine_with_no_legal_move_returns_none() {
        let mut state = BoardState::new();
        for cell in 0..crate::board::bitboard::BOARD_CELLS {
            state.play(cell).unwrap();
        }
        let mut engine = MinimaxEngine::new(SearchSettings {
            seed: Some(1),
            ..SearchSettings::default()
        });
        let out = engine.choose_move(&state, &MoveRequest::default()).unwrap();
        assert!(out.chosen.is_none());
    }
}
