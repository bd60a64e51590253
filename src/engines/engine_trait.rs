//! Engine abstraction layer used by the binaries and the match harness.
//!
//! Defines common input parameters and output payloads so different engine
//! strategies can be selected at runtime behind a single trait interface.

use crate::board::state::BoardState;
use crate::board::types::Color;

/// Per-move request parameters. `None` fields fall back to the engine's own
/// defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveRequest {
    pub time_budget_ms: Option<u64>,
    pub depth_ceiling: Option<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    /// The chosen child state; `None` when the engine had no legal move.
    pub chosen: Option<BoardState>,
    pub score: i32,
    /// Winner when the chosen position is terminal.
    pub winner: Option<Color>,
    pub info_lines: Vec<String>,
}

pub trait Engine {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn choose_move(
        &mut self,
        state: &BoardState,
        request: &MoveRequest,
    ) -> Result<EngineOutput, String>;
}
