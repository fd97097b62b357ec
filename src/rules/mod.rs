//! Game rules: the merge engine.
//!
//! `MergeEngine` turns a grid and a direction into the next grid, the
//! score gained, and whether the game is over. Every direction is handled
//! by one left-merge routine (`merge_row`) after rotating the grid.

pub mod engine;
pub mod merge;

pub use engine::{is_terminal, MergeEngine, MoveResult, Slide, SpawnedTile};
pub use merge::{merge_row, RowMerge};
