//! A single game: grid, running score, and spawn RNG.

use tracing::{info, instrument, warn};

use crate::core::{Direction, GameConfig, Grid, Result, TileRng};
use crate::rules::{is_terminal, MergeEngine, MoveResult};

/// One game in progress.
///
/// Owns the authoritative grid and replaces it wholesale with each
/// `MoveResult`. Once the grid is terminal, moves are refused until
/// `restart`.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    engine: MergeEngine,
    rng: TileRng,
    grid: Grid,
    score: u64,
    moves: u32,
    over: bool,
}

impl Game {
    /// Start a new game from a configuration.
    #[instrument(skip(config), fields(size = config.size, seed = config.seed))]
    pub fn new(config: GameConfig) -> Result<Self> {
        let engine = MergeEngine::from_config(&config)?;
        let mut rng = TileRng::new(config.seed);
        let grid = engine.spawn_initial(config.size, &mut rng)?;
        info!("Starting new game");

        Ok(Self {
            over: is_terminal(&grid),
            config,
            engine,
            rng,
            grid,
            score: 0,
            moves: 0,
        })
    }

    /// Continue from an existing grid with score 0.
    ///
    /// The grid's side length overrides `config.size`.
    pub fn from_grid(config: GameConfig, grid: Grid) -> Result<Self> {
        let config = config.with_size(grid.size());
        let engine = MergeEngine::from_config(&config)?;

        Ok(Self {
            over: is_terminal(&grid),
            rng: TileRng::new(config.seed),
            config,
            engine,
            grid,
            score: 0,
            moves: 0,
        })
    }

    /// Start a classic 4×4 game with the given seed.
    pub fn classic(seed: u64) -> Result<Self> {
        Self::new(GameConfig::new().with_seed(seed))
    }

    /// Apply a move and fold its result into the game.
    ///
    /// After game over this returns `moved = false` without touching the
    /// grid or the RNG.
    #[instrument(level = "debug", skip(self), fields(score = self.score, moves = self.moves))]
    pub fn step(&mut self, direction: Direction) -> Result<MoveResult> {
        if self.over {
            warn!("Move attempted after game over");
            return Ok(MoveResult {
                grid: self.grid.clone(),
                score_delta: 0,
                moved: false,
                terminal: true,
                spawned: None,
            });
        }

        let result = self.engine.apply_move(&self.grid, direction, &mut self.rng)?;
        if result.moved {
            self.grid = result.grid.clone();
            self.score += result.score_delta;
            self.moves += 1;
        }
        if result.terminal {
            self.over = true;
            info!(
                score = self.score,
                moves = self.moves,
                max_tile = self.grid.max_tile(),
                "Game over"
            );
        }
        Ok(result)
    }

    /// Throw away the current grid and start again.
    ///
    /// The RNG continues its stream, so successive games differ.
    #[instrument(skip(self), fields(previous_score = self.score))]
    pub fn restart(&mut self) -> Result<()> {
        self.grid = self.engine.spawn_initial(self.config.size, &mut self.rng)?;
        self.score = 0;
        self.moves = 0;
        self.over = is_terminal(&self.grid);
        info!("Game restarted");
        Ok(())
    }

    /// Current grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Sum of all score deltas since the last (re)start.
    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Number of moves that changed the grid.
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Whether the grid is terminal.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Largest tile on the grid.
    #[must_use]
    pub fn max_tile(&self) -> u32 {
        self.grid.max_tile()
    }

    /// Configuration this game was started with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Engine used for moves.
    #[must_use]
    pub fn engine(&self) -> &MergeEngine {
        &self.engine
    }
}
