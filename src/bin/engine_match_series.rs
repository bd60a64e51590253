//! Standalone engine-vs-engine series runner.
//!
//! Run with:
//! `cargo run --release --bin engine_match_series`
//! `cargo run --release --bin engine_match_series -- --verbose`

use atari_go::analysis::scoring::ScoreWeights;
use atari_go::engines::engine_minimax::MinimaxEngine;
use atari_go::engines::engine_trait::{Engine, MoveRequest};
use atari_go::search::iterative_deepening::SearchSettings;
use atari_go::utils::engine_match_harness::{
    play_engine_match_series, MatchConfig, MatchSeriesConfig,
};

fn main() -> Result<(), String> {
    env_logger::init();
    let verbose = std::env::args().any(|a| a == "--verbose" || a == "-v");

    // Customize these two blocks to experiment with different weightings.
    let settings_v1 = SearchSettings {
        weights: ScoreWeights {
            baseline_liberties: 8,
            ..ScoreWeights::default()
        },
        discard_fraction: 0.0,
        seed: Some(1),
    };
    let settings_v2 = SearchSettings {
        weights: ScoreWeights {
            baseline_liberties: 6,
            distinct_liberty_multiplier: 0,
            ..ScoreWeights::default()
        },
        discard_fraction: 0.0,
        seed: Some(2),
    };

    let player1 = || Box::new(MinimaxEngine::new(settings_v1)) as Box<dyn Engine>;
    let player2 = || Box::new(MinimaxEngine::new(settings_v2)) as Box<dyn Engine>;

    let stats = play_engine_match_series(
        player1,
        player2,
        &MatchSeriesConfig {
            games: 10,
            per_game: MatchConfig {
                max_plies: 162,
                request: MoveRequest {
                    time_budget_ms: Some(500),
                    depth_ceiling: Some(6),
                },
            },
            verbose,
        },
    )?;

    println!("{}", stats.report());
    Ok(())
}
