//! # twenty48-engine
//!
//! Deterministic sliding-tile merge engine for 2048-style puzzles.
//!
//! ## Design Principles
//!
//! 1. **Pure Transitions**: `MergeEngine::apply_move` takes a grid by
//!    reference and returns a new one. The caller owns the authoritative
//!    state and the running score.
//!
//! 2. **Injected Randomness**: Tile spawns draw from a `TileSource`, so a
//!    fixed seed reproduces a whole game.
//!
//! 3. **One Merge Routine**: Every direction is rotated onto a canonical
//!    left move and handled by `merge_row`.
//!
//! ## Modules
//!
//! - `core`: Grid, direction, RNG, configuration, errors
//! - `rules`: The merge engine and terminal detection
//! - `session`: Caller-side game state (score, game over, restart)
//! - `autoplay`: Policies and an automated play loop
//!
//! ```
//! use twenty48_engine::{Direction, MergeEngine, TileRng};
//!
//! let engine = MergeEngine::classic();
//! let mut rng = TileRng::new(42);
//! let grid = engine.spawn_initial(4, &mut rng).unwrap();
//!
//! let result = engine.apply_move(&grid, Direction::Left, &mut rng).unwrap();
//! assert_eq!(result.moved, result.grid != grid);
//! assert_eq!(result.spawned.is_some(), result.moved);
//! ```

pub mod autoplay;
pub mod core;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{Direction, EngineError, GameConfig, Grid, Result, TileRng, TileSource};

pub use crate::rules::{is_terminal, MergeEngine, MoveResult, Slide, SpawnedTile};

pub use crate::session::Game;

pub use crate::autoplay::{
    autoplay, AutoplayConfig, AutoplaySummary, GreedyPolicy, Policy, RandomPolicy,
};
