//! Automated play loop.
//!
//! Drives a `Game` with a `Policy` until the grid is terminal or the move
//! cap is reached.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::core::{Result, TileRng};
use crate::session::Game;

use super::policy::Policy;

/// Configuration for automated play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoplayConfig {
    /// Maximum moves before stopping (to bound runaway games).
    pub max_moves: u32,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self { max_moves: 100_000 }
    }
}

impl AutoplayConfig {
    /// Create a new autoplay config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum moves per game.
    #[must_use]
    pub fn with_max_moves(mut self, max: u32) -> Self {
        self.max_moves = max;
        self
    }
}

/// Outcome of an automated game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoplaySummary {
    pub score: u64,
    pub moves: u32,
    pub max_tile: u32,
    /// Game reached a terminal grid (as opposed to hitting the move cap).
    pub finished: bool,
}

/// Play `game` with `policy` until it ends or `config.max_moves` is hit.
///
/// `rng` drives the policy only; tile spawns use the game's own RNG.
#[instrument(skip_all, fields(policy = policy.name(), max_moves = config.max_moves))]
pub fn autoplay<P: Policy + ?Sized>(
    game: &mut Game,
    policy: &mut P,
    rng: &mut TileRng,
    config: &AutoplayConfig,
) -> Result<AutoplaySummary> {
    while !game.is_over() && game.moves() < config.max_moves {
        let Some(direction) = policy.choose(game.engine(), game.grid(), rng) else {
            break;
        };
        let result = game.step(direction)?;
        debug!(%direction, score_delta = result.score_delta, "Autoplay move");
    }

    let summary = AutoplaySummary {
        score: game.score(),
        moves: game.moves(),
        max_tile: game.max_tile(),
        finished: game.is_over(),
    };
    info!(
        score = summary.score,
        moves = summary.moves,
        max_tile = summary.max_tile,
        finished = summary.finished,
        "Autoplay complete"
    );
    Ok(summary)
}
