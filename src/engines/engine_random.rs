//! Random-move baseline engine.
//!
//! Selects uniformly from legal placements and is primarily used for
//! diagnostics, harness baselines, and the lowest difficulty setting.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::board::bitboard::cells_of;
use crate::board::state::BoardState;
use crate::engines::engine_trait::{Engine, EngineOutput, MoveRequest};
use crate::search::strong_points::centre_cell;
use crate::search::successors::legal_cells;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "AtariGo Random"
    }

    fn choose_move(
        &mut self,
        state: &BoardState,
        _request: &MoveRequest,
    ) -> Result<EngineOutput, String> {
        let mut out = EngineOutput::default();

        let cells = if state.occupied() == 0 {
            vec![centre_cell()]
        } else {
            cells_of(legal_cells(state))
        };
        out.info_lines
            .push(format!("info string random_engine legal_moves {}", cells.len()));

        let Some(&cell) = cells.as_slice().choose(&mut self.rng) else {
            return Ok(out);
        };

        let chosen = state.child_with(cell).map_err(|e| e.to_string())?;
        out.chosen = Some(chosen);
        Ok(out)
    }
}
