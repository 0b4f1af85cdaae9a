//! Lootbox - reward simulator library
//!
//! Weighted multi-slot box openings, duplicate tracking against per-category
//! collections, currency accounting and aggregate statistics. Display is left
//! to callers; the `lootbox` binary is one such caller.

pub mod config;
pub mod error;
pub mod rewards;
pub mod simulator;

pub use config::LootConfig;
pub use error::{ConfigError, EngineError};
pub use rewards::{BatchResult, BatchSummary, EngineStats, Outcome, RewardEngine};
