//! Interactive console game: human (Black) versus the minimax engine
//! (White). Moves are entered as a row letter plus column number, e.g. `C6`
//! or `c 6`.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use atari_go::analysis::capture::captured_cell_indices;
use atari_go::analysis::scoring::{winner_of, Evaluator};
use atari_go::board::bitboard::{cell_from_coord, is_in_bounds};
use atari_go::board::state::BoardState;
use atari_go::board::types::Color;
use atari_go::search::iterative_deepening::{SearchEngine, SearchSettings};
use atari_go::utils::render_board::render_board;

const THINK_TIME: Duration = Duration::from_millis(5_000);
const DEPTH_CEILING: u8 = 64;

fn main() {
    env_logger::init();

    let evaluator = Evaluator::default();
    let mut engine = SearchEngine::new(SearchSettings::default());
    let mut state = BoardState::new();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("{}", render_board(&state));

        let mut scored = state;
        let score = evaluator.evaluate(&mut scored);
        if let Some(winner) = winner_of(score) {
            let removed = captured_cell_indices(&state);
            println!("Game over. {winner} wins! Captured cells: {removed:?}");
            break;
        }

        if state.to_move() == Color::Black {
            let Some(cell) = read_human_move(&mut lines, &state) else {
                println!("Input closed. Goodbye.");
                break;
            };
            if let Err(e) = state.play(cell) {
                println!("Move rejected: {e}");
                continue;
            }
        } else {
            println!("White is thinking...");
            match engine.select_move(&state, THINK_TIME, DEPTH_CEILING) {
                Ok(outcome) => {
                    println!(
                        "White moved after {} ms (depth {}, score {}).",
                        outcome.elapsed_ms, outcome.completed_depth, outcome.score
                    );
                    if outcome.chosen.signature() == state.signature() {
                        println!("White has no move. Game ends.");
                        break;
                    }
                    state = outcome.chosen;
                }
                Err(e) => {
                    eprintln!("engine error: {e}");
                    break;
                }
            }
        }
    }
}

/// Prompt until the human enters a valid move on an empty cell, or return
/// `None` when stdin closes.
fn read_human_move(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    state: &BoardState,
) -> Option<usize> {
    loop {
        print!("Your move (e.g. C6): ");
        io::stdout().flush().ok();

        let line = lines.next()?.ok()?;
        let input = line.trim();
        if input.len() < 2 {
            println!("Enter a row letter followed by a column number.");
            continue;
        }

        let mut chars = input.chars();
        let row_char = chars.next()?.to_ascii_uppercase();
        if !row_char.is_ascii_uppercase() {
            println!("The row must be a letter.");
            continue;
        }
        let row = (row_char as u8 - b'A') as usize;

        let col_text: String = chars.as_str().trim().to_string();
        let Ok(col) = col_text.parse::<usize>() else {
            println!("The column must be a number, e.g. C6.");
            continue;
        };
        if col == 0 {
            println!("Columns start at 1.");
            continue;
        }
        let col = col - 1;

        if !is_in_bounds(row, col) {
            println!("That cell is off the board.");
            continue;
        }
        let cell = cell_from_coord(row, col);
        if !state.is_empty_cell(cell) {
            println!("That cell is occupied. Choose an empty one.");
            continue;
        }
        return Some(cell);
    }
}
