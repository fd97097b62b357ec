//! Automated play for demos, soak tests, and benchmarks.

pub mod policy;
pub mod runner;

pub use policy::{legal_moves, GreedyPolicy, Policy, RandomPolicy};
pub use runner::{autoplay, AutoplayConfig, AutoplaySummary};
