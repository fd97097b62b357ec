//! Move-choosing policies for automated play.
//!
//! - `RandomPolicy`: uniform over moves that change the grid
//! - `GreedyPolicy`: highest immediate score, ties broken in
//!   `Direction::ALL` order

use crate::core::{Direction, Grid, TileRng};
use crate::rules::MergeEngine;

/// Chooses the next move for a grid.
pub trait Policy {
    /// Pick a direction, or `None` if no move changes the grid.
    fn choose(&mut self, engine: &MergeEngine, grid: &Grid, rng: &mut TileRng)
        -> Option<Direction>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Directions that change `grid`, with the score each would earn.
///
/// Evaluated without spawning, so the result is deterministic.
pub fn legal_moves(engine: &MergeEngine, grid: &Grid) -> Vec<(Direction, u64)> {
    Direction::ALL
        .iter()
        .filter_map(|&direction| {
            engine
                .slide(grid, direction)
                .ok()
                .filter(|slide| slide.moved)
                .map(|slide| (direction, slide.score_delta))
        })
        .collect()
}

/// Uniformly random legal move.
#[derive(Clone, Debug, Default)]
pub struct RandomPolicy;

impl Policy for RandomPolicy {
    fn choose(
        &mut self,
        engine: &MergeEngine,
        grid: &Grid,
        rng: &mut TileRng,
    ) -> Option<Direction> {
        let moves = legal_moves(engine, grid);
        if moves.is_empty() {
            return None;
        }
        Some(moves[rng.gen_range_usize(0..moves.len())].0)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Legal move with the largest immediate score delta.
#[derive(Clone, Debug, Default)]
pub struct GreedyPolicy;

impl Policy for GreedyPolicy {
    fn choose(
        &mut self,
        engine: &MergeEngine,
        grid: &Grid,
        _rng: &mut TileRng,
    ) -> Option<Direction> {
        let mut best: Option<(Direction, u64)> = None;
        for (direction, score) in legal_moves(engine, grid) {
            // Strict comparison keeps the earliest direction on ties
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((direction, score));
            }
        }
        best.map(|(direction, _)| direction)
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}
