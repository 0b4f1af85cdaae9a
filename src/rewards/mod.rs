//! Reward resolution: loot tables, randomness, collection tracking and the engine.

pub mod draw_source;
pub mod engine;
pub mod loot_table;
pub mod types;

pub use draw_source::{DrawSource, RandSource};
pub use engine::{BatchResult, RewardEngine};
pub use loot_table::{LootEntry, SlotLootTable, WEIGHT_SUM_TOLERANCE};
pub use types::*;
