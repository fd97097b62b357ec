//! Engine error types.
//!
//! Every error is a precondition failure detected before any state is
//! produced. A failed call never leaves a partially transformed grid behind.

/// Errors raised by grid construction, direction parsing, configuration,
/// and move application.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum EngineError {
    /// Malformed grid shape or an illegal cell value.
    #[display("Invalid grid: {}", _0)]
    InvalidGrid(String),

    /// A direction token outside the four-way enum.
    #[display("Invalid direction: {}", _0)]
    InvalidDirection(String),

    /// A merge would produce a tile larger than the cell type can hold.
    #[display("Tile overflow: merging two {} tiles", _0)]
    TileOverflow(u32),

    /// Configuration values out of range.
    #[display("Invalid config: {}", _0)]
    InvalidConfig(String),
}

impl std::error::Error for EngineError {}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, EngineError>;
