//! Minimal head-to-head engine match harness for local testing.
//!
//! Runs two `Engine` implementations against each other without console
//! I/O. Player 1 alternates colors across a series and results aggregate
//! into a small report, which is how competing weight configurations get
//! compared.

use std::time::Instant;

use crate::analysis::scoring::{winner_of, Evaluator};
use crate::board::state::BoardState;
use crate::board::types::Color;
use crate::engines::engine_trait::{Engine, MoveRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Win(Color),
    /// Neither side captured within the ply limit.
    MaxPlies,
    /// An engine had no legal reply.
    Stalled(Color),
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub max_plies: u16,
    pub request: MoveRequest,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 200,
            request: MoveRequest {
                time_budget_ms: Some(250),
                depth_ceiling: Some(4),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_state: BoardState,
    pub plies_played: u16,
    pub black_total_time_ms: u128,
    pub white_total_time_ms: u128,
}

#[derive(Debug, Clone)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub per_game: MatchConfig,
    pub verbose: bool,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 10,
            per_game: MatchConfig::default(),
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SeriesStats {
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub unfinished: u16,
    pub total_plies: u32,
}

impl SeriesStats {
    pub fn report(&self) -> String {
        format!(
            "player1 wins: {}, player2 wins: {}, unfinished: {}, avg plies: {:.1}",
            self.player1_wins,
            self.player2_wins,
            self.unfinished,
            if self.player1_wins + self.player2_wins + self.unfinished == 0 {
                0.0
            } else {
                f64::from(self.total_plies)
                    / f64::from(self.player1_wins + self.player2_wins + self.unfinished)
            }
        )
    }
}

/// Play one game between `black` and `white` from the empty board.
pub fn play_engine_match<'a>(
    black: &'a mut dyn Engine,
    white: &'a mut dyn Engine,
    config: &MatchConfig,
) -> Result<MatchResult, String> {
    black.new_game();
    white.new_game();

    // The harness referees terminality itself so it does not depend on
    // engines reporting scores.
    let referee = Evaluator::default();
    let mut state = BoardState::new();
    let mut black_time_ms: u128 = 0;
    let mut white_time_ms: u128 = 0;

    for ply in 0..config.max_plies {
        let mover = state.to_move();
        let engine = match mover {
            Color::Black => &mut *black,
            Color::White => &mut *white,
        };

        let started = Instant::now();
        let out = engine.choose_move(&state, &config.request)?;
        let elapsed = started.elapsed().as_millis();
        match mover {
            Color::Black => black_time_ms += elapsed,
            Color::White => white_time_ms += elapsed,
        }

        let Some(next) = out.chosen else {
            return Ok(MatchResult {
                outcome: MatchOutcome::Stalled(mover),
                final_state: state,
                plies_played: ply,
                black_total_time_ms: black_time_ms,
                white_total_time_ms: white_time_ms,
            });
        };
        state = next;

        let mut check = state;
        if let Some(winner) = winner_of(referee.evaluate(&mut check)) {
            return Ok(MatchResult {
                outcome: MatchOutcome::Win(winner),
                final_state: state,
                plies_played: ply + 1,
                black_total_time_ms: black_time_ms,
                white_total_time_ms: white_time_ms,
            });
        }
    }

    Ok(MatchResult {
        outcome: MatchOutcome::MaxPlies,
        final_state: state,
        plies_played: config.max_plies,
        black_total_time_ms: black_time_ms,
        white_total_time_ms: white_time_ms,
    })
}

/// Play a series, alternating which player takes Black each game.
pub fn play_engine_match_series(
    mut player1: impl FnMut() -> Box<dyn Engine>,
    mut player2: impl FnMut() -> Box<dyn Engine>,
    config: &MatchSeriesConfig,
) -> Result<SeriesStats, String> {
    let mut stats = SeriesStats::default();

    for game in 0..config.games {
        let player1_is_black = game % 2 == 0;
        let mut first = player1();
        let mut second = player2();
        let (black, white): (&mut dyn Engine, &mut dyn Engine) = if player1_is_black {
            (first.as_mut(), second.as_mut())
        } else {
            (second.as_mut(), first.as_mut())
        };

        let result = play_engine_match(black, white, &config.per_game)?;
        stats.total_plies += u32::from(result.plies_played);

        match result.outcome {
            MatchOutcome::Win(color) => {
                let player1_won = (color == Color::Black) == player1_is_black;
                if player1_won {
                    stats.player1_wins += 1;
                } else {
                    stats.player2_wins += 1;
                }
                if config.verbose {
                    println!(
                        "game {game}: {color} wins in {} plies",
                        result.plies_played
                    );
                }
            }
            MatchOutcome::Stalled(color) => {
                // The stalled side loses the game.
                let player1_won = (color == Color::Black) != player1_is_black;
                if player1_won {
                    stats.player1_wins += 1;
                } else {
                    stats.player2_wins += 1;
                }
                if config.verbose {
                    println!("game {game}: {color} stalled");
                }
            }
            MatchOutcome::MaxPlies => {
                stats.unfinished += 1;
                if config.verbose {
                    println!("game {game}: unfinished after {} plies", result.plies_played);
                }
            }
        }
    }

    Ok(stats)
}
