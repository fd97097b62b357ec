//! Canonical left move for a single row.
//!
//! Every direction is reduced to this routine by rotating the grid first.

use smallvec::SmallVec;

use crate::core::{EngineError, Result, EMPTY};

/// Outcome of merging one row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RowMerge {
    /// Row differs from its input.
    pub changed: bool,
    /// Sum of the tiles created by merges.
    pub score_delta: u64,
    /// Number of merges performed.
    pub merges: u32,
}

/// Compact `row` to the left and merge equal neighbours, in place.
///
/// Pairs are taken left to right from the compacted sequence and a merged
/// tile never merges again in the same call, so `[2, 2, 2, 2]` becomes
/// `[4, 4, 0, 0]` and `[2, 2, 2]` becomes `[4, 2, 0]`.
///
/// On error `row` is left untouched.
pub fn merge_row(row: &mut [u32]) -> Result<RowMerge> {
    let tiles: SmallVec<[u32; 8]> = row.iter().copied().filter(|&v| v != EMPTY).collect();
    let mut merged: SmallVec<[u32; 8]> = SmallVec::with_capacity(row.len());
    let mut outcome = RowMerge::default();

    let mut i = 0;
    while i < tiles.len() {
        let value = tiles[i];
        if tiles.get(i + 1) == Some(&value) {
            let doubled = value
                .checked_mul(2)
                .ok_or(EngineError::TileOverflow(value))?;
            merged.push(doubled);
            outcome.score_delta += u64::from(doubled);
            outcome.merges += 1;
            i += 2;
        } else {
            merged.push(value);
            i += 1;
        }
    }

    merged.resize(row.len(), EMPTY);
    outcome.changed = merged.as_slice() != &*row;
    row.copy_from_slice(&merged);
    Ok(outcome)
}
