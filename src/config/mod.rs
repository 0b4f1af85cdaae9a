//! Loot configuration: reward definitions, slot tables and validation.

mod persistence;
mod presets;

pub use persistence::{config_dir, default_config_path};

use crate::error::ConfigError;
use crate::rewards::SlotLootTable;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDef {
    pub name: String,
    pub capacity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenominationDef {
    pub name: String,
    pub value: u64,
}

/// Currency granted when a category yields an already-owned number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateRule {
    pub category: String,
    pub currency_value: u64,
}

/// Everything a `RewardEngine` is built from. Static for the engine's lifetime.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LootConfig {
    pub categories: Vec<CategoryDef>,
    pub denominations: Vec<DenominationDef>,
    #[serde(default)]
    pub duplicate_rules: Vec<DuplicateRule>,
    /// One table per slot; the box size is `slots.len()`.
    pub slots: Vec<SlotLootTable>,
}

impl LootConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, name: impl Into<String>, capacity: u32) -> Self {
        self.categories.push(CategoryDef {
            name: name.into(),
            capacity,
        });
        self
    }

    pub fn denomination(mut self, name: impl Into<String>, value: u64) -> Self {
        self.denominations.push(DenominationDef {
            name: name.into(),
            value,
        });
        self
    }

    pub fn duplicate_rule(mut self, category: impl Into<String>, currency_value: u64) -> Self {
        self.duplicate_rules.push(DuplicateRule {
            category: category.into(),
            currency_value,
        });
        self
    }

    pub fn slot(mut self, table: SlotLootTable) -> Self {
        self.slots.push(table);
        self
    }

    /// Use `table` for `count` consecutive slots.
    pub fn repeat_slot(mut self, table: SlotLootTable, count: usize) -> Self {
        self.slots.extend(std::iter::repeat(table).take(count));
        self
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn duplicate_value(&self, category: &str) -> u64 {
        self.duplicate_rules
            .iter()
            .find(|r| r.category == category)
            .map(|r| r.currency_value)
            .unwrap_or(0)
    }

    pub fn find_category(&self, name: &str) -> Option<&CategoryDef> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn find_denomination(&self, name: &str) -> Option<&DenominationDef> {
        self.denominations.iter().find(|d| d.name == name)
    }

    /// Run every construction check. Slot numbers in errors are 1-based.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slots.is_empty() {
            return Err(ConfigError::NoSlots);
        }

        let mut names = HashSet::new();
        for name in self
            .categories
            .iter()
            .map(|c| &c.name)
            .chain(self.denominations.iter().map(|d| &d.name))
        {
            if !names.insert(name.as_str()) {
                return Err(ConfigError::DuplicateName(name.clone()));
            }
        }

        if let Some(d) = self.denominations.iter().find(|d| d.value == 0) {
            return Err(ConfigError::ZeroCurrencyValue(d.name.clone()));
        }

        let mut ruled = HashSet::new();
        for rule in &self.duplicate_rules {
            if self.find_category(&rule.category).is_none() {
                return Err(ConfigError::UnknownDuplicateRule(rule.category.clone()));
            }
            if !ruled.insert(rule.category.as_str()) {
                return Err(ConfigError::DuplicateName(rule.category.clone()));
            }
        }

        for (index, table) in self.slots.iter().enumerate() {
            self.validate_slot(index + 1, table)?;
        }

        Ok(())
    }

    fn validate_slot(&self, slot: usize, table: &SlotLootTable) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for entry in table.entries() {
            if !entry.weight.is_finite() || entry.weight < 0.0 {
                return Err(ConfigError::InvalidWeight {
                    slot,
                    key: entry.reward.clone(),
                    weight: entry.weight,
                });
            }
            if !seen.insert(entry.reward.as_str()) {
                return Err(ConfigError::DuplicateName(entry.reward.clone()));
            }

            match self.find_category(&entry.reward) {
                Some(category) if category.capacity == 0 && entry.weight > 0.0 => {
                    return Err(ConfigError::UnobtainableCategory {
                        slot,
                        category: category.name.clone(),
                        weight: entry.weight,
                    });
                }
                Some(_) => {}
                None if self.find_denomination(&entry.reward).is_some() => {}
                None => {
                    return Err(ConfigError::UnknownRewardKey {
                        slot,
                        key: entry.reward.clone(),
                    });
                }
            }
        }

        if !table.is_balanced() {
            return Err(ConfigError::WeightSum {
                slot,
                total: table.total_weight(),
            });
        }

        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
