//! Greedy one-piece lookahead player for demo mode.
//!
//! Every reachable placement of the active piece is simulated on a clone of
//! the game and the resulting well is scored by a weighted sum of aggregate
//! column height, cleared lines, holes and surface bumpiness.

use blockfall_core::{Board, GameState};
use blockfall_types::{BOARD_HEIGHT, BOARD_WIDTH};

use crate::place::{apply_place, Placement};

/// Evaluation weights, scaled by 1000.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weights {
    pub height: i64,
    pub lines: i64,
    pub holes: i64,
    pub bumpiness: i64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            height: -510,
            lines: 760,
            holes: -357,
            bumpiness: -184,
        }
    }
}

/// Column heights, hole count and bumpiness of a well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Surface {
    pub aggregate_height: u32,
    pub holes: u32,
    pub bumpiness: u32,
}

impl Surface {
    pub fn measure(board: &Board) -> Self {
        let mut heights = [0u32; BOARD_WIDTH as usize];
        let mut holes = 0;

        for x in 0..BOARD_WIDTH as i8 {
            let mut seen_top = false;
            for y in 0..BOARD_HEIGHT as i8 {
                if board.is_occupied(x, y) {
                    if !seen_top {
                        heights[x as usize] = (BOARD_HEIGHT as i8 - y) as u32;
                        seen_top = true;
                    }
                } else if seen_top {
                    holes += 1;
                }
            }
        }

        Self {
            aggregate_height: heights.iter().sum(),
            holes,
            bumpiness: heights.windows(2).map(|w| w[0].abs_diff(w[1])).sum(),
        }
    }
}

fn evaluate(before: &GameState, after: &GameState, weights: &Weights) -> i64 {
    if after.game_over() {
        return i64::MIN / 2;
    }
    let surface = Surface::measure(after.board());
    let lines = after.lines().saturating_sub(before.lines());

    weights.height * surface.aggregate_height as i64
        + weights.lines * lines as i64
        + weights.holes * surface.holes as i64
        + weights.bumpiness * surface.bumpiness as i64
}

/// Best placement for the active piece, or `None` if nothing can be placed.
pub fn choose_placement(game: &GameState, weights: &Weights) -> Option<Placement> {
    let mut best: Option<(i64, Placement)> = None;

    for turns in 0..4u8 {
        for x in -3..BOARD_WIDTH as i8 {
            let placement = Placement { turns, x };
            let mut trial = game.clone();
            if apply_place(&mut trial, placement).is_err() {
                continue;
            }

            let value = evaluate(game, &trial, weights);
            if best.map_or(true, |(v, _)| value > v) {
                best = Some((value, placement));
            }
        }
    }

    best.map(|(_, placement)| placement)
}
