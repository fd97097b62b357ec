//! Game sessions.
//!
//! The engine is stateless; a `Game` is the caller-side owner of the grid,
//! the running score, and the game-over flag.

mod game;

pub use game::Game;
