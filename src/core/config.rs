//! Game configuration.
//!
//! Callers configure a game at startup by providing:
//! - Board side length
//! - Probability that a spawned tile is a 4 instead of a 2
//! - Seed for the spawn RNG
//!
//! Configs can be built in code or read from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::error::{EngineError, Result};
use super::grid::{CLASSIC_SIZE, MAX_SIZE, MIN_SIZE};

/// Classic chance that a spawned tile is a 4.
pub const DEFAULT_FOUR_PROBABILITY: f64 = 0.1;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Board side length (at least 2).
    pub size: usize,

    /// Probability that a spawned tile is a 4.
    pub four_probability: f64,

    /// Seed for tile spawns.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: CLASSIC_SIZE,
            four_probability: DEFAULT_FOUR_PROBABILITY,
            seed: 0,
        }
    }
}

impl GameConfig {
    /// Create the classic 4×4 configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the board side length.
    #[must_use]
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Set the 4-tile spawn probability.
    #[must_use]
    pub fn with_four_probability(mut self, probability: f64) -> Self {
        self.four_probability = probability;
        self
    }

    /// Set the spawn seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check that every value is in range.
    pub fn validate(&self) -> Result<()> {
        if self.size < MIN_SIZE {
            return Err(EngineError::InvalidConfig(format!(
                "size {} is below the minimum of {MIN_SIZE}",
                self.size
            )));
        }
        if self.size > MAX_SIZE {
            return Err(EngineError::InvalidConfig(format!(
                "size {} is above the maximum of {MAX_SIZE}",
                self.size
            )));
        }
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(EngineError::InvalidConfig(format!(
                "four_probability {} is outside [0, 1]",
                self.four_probability
            )));
        }
        Ok(())
    }

    /// Parse and validate a TOML document. Missing keys take defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    #[instrument(skip(path))]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| EngineError::InvalidConfig(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), size = config.size, seed = config.seed, "Loaded game config");
        Ok(config)
    }
}
