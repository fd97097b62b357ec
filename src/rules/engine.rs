//! The merge engine: grid transitions, spawning, and terminal detection.
//!
//! A move is processed in four steps:
//! 1. Rotate the grid clockwise so the requested direction becomes a left
//!    move (`left = 0`, `down = 1`, `right = 2`, `up = 3` quarter turns).
//! 2. Compact and merge every row to the left.
//! 3. Rotate back by the remaining quarter turns.
//! 4. If anything changed, spawn one tile in a random empty cell.
//!
//! The engine never mutates a caller's grid and keeps no running state.
//! Score accumulation belongs to the caller.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace, warn};

use crate::core::{
    Direction, EngineError, GameConfig, Grid, Result, TileSource, DEFAULT_FOUR_PROBABILITY,
};

use super::merge::merge_row;

/// A tile placed by a spawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpawnedTile {
    pub row: usize,
    pub col: usize,
    pub value: u32,
}

/// Grid transition without the spawn step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slide {
    /// Post-move grid, equal to the input when `moved` is false.
    pub grid: Grid,
    /// Sum of tiles created by merges.
    pub score_delta: u64,
    /// Whether any cell changed.
    pub moved: bool,
    /// Number of merges performed.
    pub merges: u32,
}

/// Result of applying one move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    /// New grid state, including the spawned tile.
    pub grid: Grid,
    /// Score gained by this move.
    pub score_delta: u64,
    /// Whether any cell changed (and therefore a tile spawned).
    pub moved: bool,
    /// Whether the new grid admits no further moves.
    pub terminal: bool,
    /// Tile spawned by this move, `None` when nothing moved.
    pub spawned: Option<SpawnedTile>,
}

/// Sliding-tile merge engine.
///
/// Holds only the spawn rule. Randomness is passed into each call so
/// results are reproducible under a fixed seed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MergeEngine {
    four_probability: f64,
}

impl Default for MergeEngine {
    fn default() -> Self {
        Self::classic()
    }
}

impl MergeEngine {
    /// Engine with the classic 90% twos / 10% fours spawn rule.
    #[must_use]
    pub const fn classic() -> Self {
        Self {
            four_probability: DEFAULT_FOUR_PROBABILITY,
        }
    }

    /// Engine with a custom chance of spawning a 4.
    pub fn new(four_probability: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&four_probability) {
            return Err(EngineError::InvalidConfig(format!(
                "four_probability {four_probability} is outside [0, 1]"
            )));
        }
        Ok(Self { four_probability })
    }

    /// Engine for a validated game configuration.
    pub fn from_config(config: &GameConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.four_probability)
    }

    /// Chance that a spawned tile is a 4.
    #[must_use]
    pub fn four_probability(&self) -> f64 {
        self.four_probability
    }

    /// Apply a move: slide, spawn if anything moved, then check for a
    /// terminal grid.
    ///
    /// On an already terminal grid this returns `moved = false`,
    /// `terminal = true`, and the input grid unchanged.
    #[instrument(level = "debug", skip(self, grid, rng), fields(size = grid.size()))]
    pub fn apply_move<R: TileSource + ?Sized>(
        &self,
        grid: &Grid,
        direction: Direction,
        rng: &mut R,
    ) -> Result<MoveResult> {
        let Slide {
            mut grid,
            score_delta,
            moved,
            merges,
        } = self.slide(grid, direction)?;

        let spawned = if moved {
            self.spawn_tile(&mut grid, rng)
        } else {
            None
        };
        let terminal = is_terminal(&grid);

        debug!(moved, merges, score_delta, terminal, "Move applied");

        Ok(MoveResult {
            grid,
            score_delta,
            moved,
            terminal,
            spawned,
        })
    }

    /// Slide and merge without spawning.
    ///
    /// Deterministic; useful for evaluating candidate moves.
    pub fn slide(&self, grid: &Grid, direction: Direction) -> Result<Slide> {
        let turns = direction.rotations();
        let mut work = grid.rotated_times(turns);

        let mut moved = false;
        let mut score_delta = 0u64;
        let mut merges = 0u32;
        for r in 0..work.size() {
            let outcome = merge_row(work.row_mut(r))?;
            moved |= outcome.changed;
            score_delta += outcome.score_delta;
            merges += outcome.merges;
        }

        if !moved {
            return Ok(Slide {
                grid: grid.clone(),
                score_delta: 0,
                moved: false,
                merges: 0,
            });
        }

        Ok(Slide {
            grid: work.rotated_times((4 - turns) % 4),
            score_delta,
            moved,
            merges,
        })
    }

    /// Place one tile in a uniformly chosen empty cell.
    ///
    /// Returns `None` and leaves the grid alone if it is full, or if the
    /// source picks an index outside the empty cells.
    pub fn spawn_tile<R: TileSource + ?Sized>(
        &self,
        grid: &mut Grid,
        rng: &mut R,
    ) -> Option<SpawnedTile> {
        let empty = grid.empty_indices();
        if empty.is_empty() {
            return None;
        }

        let pick = rng.pick_index(empty.len());
        let Some(&index) = empty.get(pick) else {
            warn!(pick, empty = empty.len(), "Tile source picked an out-of-range cell");
            return None;
        };
        let value = if rng.roll(self.four_probability) { 4 } else { 2 };
        grid.set_index(index, value);

        let size = grid.size();
        let spawned = SpawnedTile {
            row: index / size,
            col: index % size,
            value,
        };
        trace!(row = spawned.row, col = spawned.col, value, "Spawned tile");
        Some(spawned)
    }

    /// Fresh `size`×`size` grid holding two spawned tiles.
    #[instrument(level = "debug", skip(self, rng))]
    pub fn spawn_initial<R: TileSource + ?Sized>(&self, size: usize, rng: &mut R) -> Result<Grid> {
        let mut grid = Grid::empty(size)?;
        self.spawn_tile(&mut grid, rng);
        self.spawn_tile(&mut grid, rng);
        Ok(grid)
    }

    /// See [`is_terminal`].
    #[must_use]
    pub fn is_terminal(&self, grid: &Grid) -> bool {
        is_terminal(grid)
    }
}

/// True iff the grid has no empty cell and no horizontally or vertically
/// adjacent pair of equal tiles. Such a grid cannot change under any move.
#[must_use]
pub fn is_terminal(grid: &Grid) -> bool {
    if !grid.is_full() {
        return false;
    }

    let n = grid.size();
    let cells = grid.cells();
    for r in 0..n {
        for c in 0..n {
            let value = cells[r * n + c];
            if c + 1 < n && cells[r * n + c + 1] == value {
                return false;
            }
            if r + 1 < n && cells[(r + 1) * n + c] == value {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TileRng;

    /// Always picks the first empty cell and spawns a 2.
    struct FirstCellTwo;

    impl TileSource for FirstCellTwo {
        fn pick_index(&mut self, _len: usize) -> usize {
            0
        }

        fn roll(&mut self, _probability: f64) -> bool {
            false
        }
    }

    fn grid(rows: &[&[u32]]) -> Grid {
        Grid::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    fn terminal_grid() -> Grid {
        grid(&[
            &[2, 4, 2, 4],
            &[4, 2, 4, 2],
            &[2, 4, 2, 4],
            &[4, 2, 4, 2],
        ])
    }

    #[test]
    fn test_slide_left() {
        let engine = MergeEngine::classic();
        let g = grid(&[&[2, 2, 0, 0], &[0; 4], &[0; 4], &[0; 4]]);

        let slide = engine.slide(&g, Direction::Left).unwrap();
        assert!(slide.moved);
        assert_eq!(slide.score_delta, 4);
        assert_eq!(slide.grid.to_rows()[0], vec![4, 0, 0, 0]);
        assert_eq!(slide.grid.tile_count(), 1);
    }

    #[test]
    fn test_slide_right() {
        let engine = MergeEngine::classic();
        let g = grid(&[&[2, 2, 0, 0], &[0; 4], &[0; 4], &[0; 4]]);

        let slide = engine.slide(&g, Direction::Right).unwrap();
        assert_eq!(slide.grid.to_rows()[0], vec![0, 0, 0, 4]);
    }

    #[test]
    fn test_slide_up_and_down_on_column() {
        let engine = MergeEngine::classic();
        let g = grid(&[&[2, 0, 0, 0], &[2, 0, 0, 0], &[0; 4], &[0; 4]]);

        let up = engine.slide(&g, Direction::Up).unwrap();
        assert_eq!(up.grid.get(0, 0), Some(4));
        assert_eq!(up.grid.tile_count(), 1);

        let down = engine.slide(&g, Direction::Down).unwrap();
        assert_eq!(down.grid.get(3, 0), Some(4));
        assert_eq!(down.grid.tile_count(), 1);
    }

    #[test]
    fn test_slide_does_not_touch_input() {
        let engine = MergeEngine::classic();
        let g = grid(&[&[0, 2, 0, 2], &[0; 4], &[0; 4], &[0; 4]]);
        let before = g.clone();

        let _ = engine.slide(&g, Direction::Left).unwrap();
        assert_eq!(g, before);
    }

    #[test]
    fn test_apply_move_spawns_with_scripted_source() {
        let engine = MergeEngine::classic();
        let g = grid(&[&[0, 0, 2, 2], &[0; 4], &[0; 4], &[0; 4]]);

        let result = engine.apply_move(&g, Direction::Right, &mut FirstCellTwo).unwrap();
        assert!(result.moved);
        assert!(!result.terminal);
        assert_eq!(result.score_delta, 4);
        assert_eq!(
            result.spawned,
            Some(SpawnedTile {
                row: 0,
                col: 0,
                value: 2
            })
        );
        assert_eq!(result.grid.to_rows()[0], vec![2, 0, 0, 4]);
    }

    #[test]
    fn test_apply_move_noop_keeps_grid() {
        let engine = MergeEngine::classic();
        let g = grid(&[&[2, 4, 0, 0], &[8, 0, 0, 0], &[0; 4], &[0; 4]]);

        let result = engine.apply_move(&g, Direction::Left, &mut TileRng::new(1)).unwrap();
        assert!(!result.moved);
        assert_eq!(result.score_delta, 0);
        assert_eq!(result.spawned, None);
        assert_eq!(result.grid, g);
    }

    #[test]
    fn test_apply_move_on_terminal_grid() {
        let engine = MergeEngine::classic();
        let g = terminal_grid();

        for direction in Direction::ALL {
            let result = engine.apply_move(&g, direction, &mut TileRng::new(3)).unwrap();
            assert!(!result.moved, "{direction} should not move");
            assert!(result.terminal);
            assert_eq!(result.grid, g);
        }
    }

    #[test]
    fn test_move_into_terminal_state() {
        let engine = MergeEngine::classic();
        // Sliding right frees (0, 0); the spawned 2 completes the checkerboard.
        let g = grid(&[
            &[4, 2, 4, 0],
            &[4, 2, 4, 2],
            &[2, 4, 2, 4],
            &[4, 2, 4, 2],
        ]);

        let result = engine.apply_move(&g, Direction::Right, &mut FirstCellTwo).unwrap();
        assert!(result.moved);
        assert_eq!(result.grid.to_rows()[0], vec![2, 4, 2, 4]);
        assert!(result.terminal);
    }

    #[test]
    fn test_spawn_tile_full_grid() {
        let engine = MergeEngine::classic();
        let mut g = terminal_grid();
        assert_eq!(engine.spawn_tile(&mut g, &mut TileRng::new(0)), None);
        assert_eq!(g, terminal_grid());
    }

    #[test]
    fn test_spawn_tile_out_of_range_pick() {
        struct PastTheEnd;

        impl TileSource for PastTheEnd {
            fn pick_index(&mut self, len: usize) -> usize {
                len
            }

            fn roll(&mut self, _probability: f64) -> bool {
                false
            }
        }

        let engine = MergeEngine::classic();
        let mut g = grid(&[&[2, 0], &[4, 0]]);
        assert_eq!(engine.spawn_tile(&mut g, &mut PastTheEnd), None);
        assert_eq!(g, grid(&[&[2, 0], &[4, 0]]));

        let result = engine.apply_move(&g, Direction::Right, &mut PastTheEnd).unwrap();
        assert!(result.moved);
        assert_eq!(result.spawned, None);
        assert_eq!(result.grid, grid(&[&[0, 2], &[0, 4]]));
    }

    #[test]
    fn test_spawn_tile_respects_probability() {
        let always_four = MergeEngine::new(1.0).unwrap();
        let mut g = Grid::empty(3).unwrap();
        let spawned = always_four.spawn_tile(&mut g, &mut TileRng::new(5)).unwrap();
        assert_eq!(spawned.value, 4);

        let never_four = MergeEngine::new(0.0).unwrap();
        let mut g = Grid::empty(3).unwrap();
        let spawned = never_four.spawn_tile(&mut g, &mut TileRng::new(5)).unwrap();
        assert_eq!(spawned.value, 2);
        assert_eq!(g.get(spawned.row, spawned.col), Some(2));
    }

    #[test]
    fn test_spawn_initial() {
        let engine = MergeEngine::classic();
        let g = engine.spawn_initial(4, &mut FirstCellTwo).unwrap();
        assert_eq!(g.to_rows()[0], vec![2, 2, 0, 0]);
        assert_eq!(g.tile_count(), 2);

        assert!(matches!(
            engine.spawn_initial(1, &mut FirstCellTwo),
            Err(EngineError::InvalidGrid(_))
        ));
    }

    #[test]
    fn test_is_terminal() {
        assert!(is_terminal(&terminal_grid()));

        let mut rows = terminal_grid().to_rows();
        rows[3][3] = 4;
        assert!(!is_terminal(&Grid::from_rows(rows).unwrap()));

        let mut rows = terminal_grid().to_rows();
        rows[1][0] = 2;
        assert!(!is_terminal(&Grid::from_rows(rows).unwrap()));

        let mut rows = terminal_grid().to_rows();
        rows[2][2] = 0;
        assert!(!is_terminal(&Grid::from_rows(rows).unwrap()));
    }

    #[test]
    fn test_new_rejects_bad_probability() {
        assert!(MergeEngine::new(1.2).is_err());
        assert!(MergeEngine::new(f64::NAN).is_err());
        assert_eq!(MergeEngine::new(0.5).unwrap().four_probability(), 0.5);
    }

    #[test]
    fn test_overflow_reported() {
        let engine = MergeEngine::classic();
        let top = 1u32 << 31;
        let g = grid(&[&[top, top], &[0, 0]]);
        assert_eq!(
            engine.apply_move(&g, Direction::Left, &mut FirstCellTwo),
            Err(EngineError::TileOverflow(top))
        );
    }
}
