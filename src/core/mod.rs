//! Core types: grid, direction, RNG, configuration, errors.
//!
//! Everything here is free of game rules. The merge algorithm lives in
//! `rules` and operates on these types.

pub mod config;
pub mod error;
pub mod grid;
pub mod rng;

pub use config::{GameConfig, DEFAULT_FOUR_PROBABILITY};
pub use error::{EngineError, Result};
pub use grid::{Direction, Grid, CLASSIC_SIZE, EMPTY, MAX_SIZE, MIN_SIZE};
pub use rng::{TileRng, TileSource};
