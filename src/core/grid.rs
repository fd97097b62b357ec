//! Grid and direction types.
//!
//! A `Grid` is an N×N board stored as a flat row-major `Vec<u32>`
//! (`row * N + col`). `0` marks an empty cell; every other cell holds a
//! power of two no smaller than 2. All constructors validate, so a `Grid`
//! value always upholds these invariants, including grids read back
//! through serde.

use serde::{Deserialize, Serialize};

use super::error::{EngineError, Result};

/// Smallest supported side length.
pub const MIN_SIZE: usize = 2;

/// Largest supported side length.
pub const MAX_SIZE: usize = 256;

/// Classic board side length.
pub const CLASSIC_SIZE: usize = 4;

/// Empty cell marker.
pub const EMPTY: u32 = 0;

// =============================================================================
// Direction
// =============================================================================

/// Direction of a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Number of clockwise quarter turns that map this direction onto a
    /// canonical left move.
    #[must_use]
    pub const fn rotations(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Down => 1,
            Direction::Right => 2,
            Direction::Up => 3,
        }
    }

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Direction {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(EngineError::InvalidDirection(format!("{s:?}"))),
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = EngineError;

    /// `0 = Up, 1 = Down, 2 = Left, 3 = Right`.
    fn try_from(value: u8) -> Result<Self> {
        Direction::ALL
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| EngineError::InvalidDirection(format!("index {value}")))
    }
}

// =============================================================================
// Grid
// =============================================================================

/// Square board of tiles.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u32>>", into = "Vec<Vec<u32>>")]
pub struct Grid {
    size: usize,
    cells: Vec<u32>,
}

/// Whether `value` may occupy a cell.
#[must_use]
pub fn is_valid_cell(value: u32) -> bool {
    value == EMPTY || (value >= 2 && value.is_power_of_two())
}

impl Grid {
    /// Create an all-empty grid.
    pub fn empty(size: usize) -> Result<Self> {
        check_size(size)?;
        Ok(Self {
            size,
            cells: vec![EMPTY; size * size],
        })
    }

    /// Create a grid from row-major cells.
    pub fn from_cells(size: usize, cells: Vec<u32>) -> Result<Self> {
        check_size(size)?;
        if cells.len() != size * size {
            return Err(EngineError::InvalidGrid(format!(
                "expected {} cells for a {size}x{size} grid, got {}",
                size * size,
                cells.len()
            )));
        }
        if let Some((index, &value)) = cells.iter().enumerate().find(|(_, &v)| !is_valid_cell(v)) {
            return Err(EngineError::InvalidGrid(format!(
                "cell ({}, {}) holds {value}, which is not a tile value",
                index / size,
                index % size
            )));
        }
        Ok(Self { size, cells })
    }

    /// Create a grid from nested rows. Every row must have as many cells as
    /// there are rows.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self> {
        let size = rows.len();
        check_size(size)?;
        if let Some((r, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != size) {
            return Err(EngineError::InvalidGrid(format!(
                "row {r} has {} cells, expected {size}",
                row.len()
            )));
        }
        Self::from_cells(size, rows.into_iter().flatten().collect())
    }

    /// Side length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major cells.
    #[must_use]
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Cell value at `(row, col)`, `None` if out of bounds. `Some(0)` is empty.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        if row < self.size && col < self.size {
            Some(self.cells[row * self.size + col])
        } else {
            None
        }
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.cells.chunks(self.size)
    }

    /// Copy into nested rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.rows().map(<[u32]>::to_vec).collect()
    }

    /// Row-major indices of empty cells.
    #[must_use]
    pub fn empty_indices(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == EMPTY)
            .map(|(i, _)| i)
            .collect()
    }

    /// `(row, col)` of every empty cell, row-major.
    #[must_use]
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.empty_indices()
            .into_iter()
            .map(|i| (i / self.size, i % self.size))
            .collect()
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != EMPTY).count()
    }

    /// True when no cell is empty.
    #[must_use]
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&EMPTY)
    }

    /// Largest tile, `0` for an empty grid.
    #[must_use]
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(EMPTY)
    }

    /// Non-empty values sorted ascending.
    #[must_use]
    pub fn sorted_tiles(&self) -> Vec<u32> {
        let mut tiles: Vec<u32> = self.cells.iter().copied().filter(|&v| v != EMPTY).collect();
        tiles.sort_unstable();
        tiles
    }

    /// One clockwise quarter turn: `(r, c)` moves to `(c, N - 1 - r)`.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let n = self.size;
        let mut cells = vec![EMPTY; n * n];
        for r in 0..n {
            for c in 0..n {
                cells[c * n + (n - 1 - r)] = self.cells[r * n + c];
            }
        }
        Self { size: n, cells }
    }

    /// `turns` clockwise quarter turns (taken mod 4).
    #[must_use]
    pub fn rotated_times(&self, turns: usize) -> Self {
        let mut grid = self.clone();
        for _ in 0..turns % 4 {
            grid = grid.rotated();
        }
        grid
    }

    /// Write a cell by row-major index. Callers keep values valid.
    pub(crate) fn set_index(&mut self, index: usize, value: u32) {
        debug_assert!(is_valid_cell(value));
        self.cells[index] = value;
    }

    /// Mutable row slice. Callers keep values valid.
    pub(crate) fn row_mut(&mut self, row: usize) -> &mut [u32] {
        let n = self.size;
        &mut self.cells[row * n..(row + 1) * n]
    }
}

fn check_size(size: usize) -> Result<()> {
    if size < MIN_SIZE {
        return Err(EngineError::InvalidGrid(format!(
            "side length {size} is below the minimum of {MIN_SIZE}"
        )));
    }
    if size > MAX_SIZE {
        return Err(EngineError::InvalidGrid(format!(
            "side length {size} is above the maximum of {MAX_SIZE}"
        )));
    }
    Ok(())
}

impl TryFrom<Vec<Vec<u32>>> for Grid {
    type Error = EngineError;

    fn try_from(rows: Vec<Vec<u32>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<Grid> for Vec<Vec<u32>> {
    fn from(grid: Grid) -> Self {
        grid.to_rows()
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self.max_tile().max(1).to_string().len();
        for row in self.rows() {
            let line: Vec<String> = row
                .iter()
                .map(|&v| {
                    if v == EMPTY {
                        format!("{:>width$}", ".")
                    } else {
                        format!("{v:>width$}")
                    }
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
