//! Monte Carlo collection simulator.
//!
//! Runs many independent engines over the same configuration to analyze:
//! - Currency earned per box
//! - Duplicate rates
//! - How many boxes it takes to finish each category
//!
//! Every run owns its own `RewardEngine`, so results match real openings.

mod collection_sim;
mod config;
mod report;
mod runner;

pub use collection_sim::{simulate_single_run, RunStats};
pub use config::SimConfig;
pub use report::{CategoryReport, SimReport};
pub use runner::run_simulation;
