//! Per-slot loot tables and weighted reward selection.

use serde::{Deserialize, Serialize};

/// Allowed deviation of a table's weight sum from 100%.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// One reward key and its drop weight, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootEntry {
    pub reward: String,
    pub weight: f64,
}

/// Drop rates for one slot of a box. Entry order is kept as configured and
/// defines the cumulative order used when drawing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotLootTable {
    entries: Vec<LootEntry>,
}

impl SlotLootTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style append of one entry.
    pub fn with(mut self, reward: impl Into<String>, weight: f64) -> Self {
        self.entries.push(LootEntry {
            reward: reward.into(),
            weight,
        });
        self
    }

    pub fn from_pairs<K: Into<String>>(pairs: impl IntoIterator<Item = (K, f64)>) -> Self {
        pairs
            .into_iter()
            .fold(Self::new(), |table, (reward, weight)| table.with(reward, weight))
    }

    pub fn entries(&self) -> &[LootEntry] {
        &self.entries
    }

    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    /// Weight given to `reward`, 0.0 if the table does not mention it.
    pub fn weight_of(&self, reward: &str) -> f64 {
        self.entries
            .iter()
            .find(|e| e.reward == reward)
            .map(|e| e.weight)
            .unwrap_or(0.0)
    }

    pub fn is_balanced(&self) -> bool {
        (self.total_weight() - 100.0).abs() <= WEIGHT_SUM_TOLERANCE
    }

    /// Inverse-CDF selection. `roll` is a uniform sample in `[0, 1)`, scaled by
    /// the table's total weight. Zero-weight entries are never returned.
    ///
    /// Returns `None` only when no entry has positive weight.
    pub fn pick(&self, roll: f64) -> Option<&str> {
        let target = roll * self.total_weight();
        let mut cumulative = 0.0;
        let mut last_live = None;

        for entry in &self.entries {
            if entry.weight <= 0.0 {
                continue;
            }
            cumulative += entry.weight;
            last_live = Some(entry.reward.as_str());
            if target < cumulative {
                return last_live;
            }
        }

        // Round-off can leave target just above the final cumulative sum
        last_live
    }

    /// Entries with a nonzero rate, highest rate first.
    pub fn by_rate_desc(&self) -> Vec<&LootEntry> {
        let mut live: Vec<&LootEntry> = self.entries.iter().filter(|e| e.weight > 0.0).collect();
        live.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        live
    }
}
