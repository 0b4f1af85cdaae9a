//! The reward engine: box openings, duplicate detection and currency accounting.
//!
//! One engine owns all of its state. Independent engines never share
//! categories, counters or randomness, so several simulations can run side by
//! side (the simulator builds one per run).

use super::draw_source::{DrawSource, RandSource};
use super::loot_table::SlotLootTable;
use super::types::{
    BatchSummary, CategoryProgress, CollectibleCategory, CurrencyDenomination,
    DenominationStats, EngineState, EngineStats, Outcome,
};
use crate::config::LootConfig;
use crate::error::{ConfigError, EngineError};
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use tracing::{debug, info, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RewardRef {
    Category(usize),
    Currency(usize),
}

/// Outcomes of every box in a batch, in order, plus the batch's net effect.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchResult {
    pub outcomes: Vec<Outcome>,
    pub summary: BatchSummary,
}

#[derive(Debug)]
pub struct RewardEngine<S: DrawSource = RandSource<ChaCha8Rng>> {
    config: LootConfig,
    rewards: HashMap<String, RewardRef>,
    categories: Vec<CollectibleCategory>,
    denominations: Vec<CurrencyDenomination>,
    state: EngineState,
    source: S,
}

impl RewardEngine {
    /// Engine with an entropy-seeded generator.
    pub fn new(config: LootConfig) -> Result<Self, ConfigError> {
        Self::with_source(config, RandSource::from_entropy())
    }

    /// Engine whose draws are fully determined by `seed`.
    pub fn seeded(config: LootConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_source(config, RandSource::from_seed(seed))
    }
}

impl<S: DrawSource> RewardEngine<S> {
    pub fn with_source(config: LootConfig, source: S) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rewards = HashMap::new();
        for (index, category) in config.categories.iter().enumerate() {
            rewards.insert(category.name.clone(), RewardRef::Category(index));
        }
        for (index, denomination) in config.denominations.iter().enumerate() {
            rewards.insert(denomination.name.clone(), RewardRef::Currency(index));
        }

        let (categories, denominations) = fresh_collection(&config);
        info!(
            slots = config.slot_count(),
            categories = categories.len(),
            denominations = denominations.len(),
            "reward engine ready"
        );

        Ok(Self {
            config,
            rewards,
            categories,
            denominations,
            state: EngineState::default(),
            source,
        })
    }

    /// Open one box: one independent draw per slot, resolved in slot order.
    ///
    /// Slots are applied as they resolve. If a slot fails with
    /// [`EngineError::InvariantViolation`], the box stays counted and the slots
    /// before it keep their effects; the engine should be reset or dropped.
    pub fn open_box(&mut self) -> Result<Vec<Outcome>, EngineError> {
        self.state.boxes_opened += 1;

        let mut outcomes = Vec::with_capacity(self.config.slot_count());
        for slot in 0..self.config.slot_count() {
            let reward = self.draw_slot(slot)?;
            outcomes.push(self.resolve(slot, reward)?);
        }

        debug!(
            box_number = self.state.boxes_opened,
            total_currency = self.state.total_currency,
            total_duplicates = self.state.total_duplicates,
            "box opened"
        );
        Ok(outcomes)
    }

    /// Open `count` boxes in sequence. The summary is the after-minus-before
    /// difference across the whole batch.
    pub fn open_batch(&mut self, count: i64) -> Result<BatchResult, EngineError> {
        if count < 0 {
            return Err(EngineError::InvalidArgument(format!(
                "box count must not be negative, got {count}"
            )));
        }

        let before_state = self.state;
        let before_collected: Vec<u32> = self.categories.iter().map(|c| c.collected()).collect();

        let mut outcomes = Vec::new();
        for _ in 0..count {
            outcomes.extend(self.open_box()?);
        }

        let boxes_opened = self.state.boxes_opened - before_state.boxes_opened;
        let currency_gained = self.state.total_currency - before_state.total_currency;
        let summary = BatchSummary {
            boxes_opened,
            currency_gained,
            new_duplicates: self.state.total_duplicates - before_state.total_duplicates,
            new_items: self
                .categories
                .iter()
                .zip(before_collected)
                .map(|(c, before)| (c.name.clone(), c.collected() - before))
                .collect(),
            avg_currency_per_box: if boxes_opened > 0 {
                currency_gained as f64 / boxes_opened as f64
            } else {
                0.0
            },
        };

        if count > 0 {
            debug!(
                boxes = summary.boxes_opened,
                currency = summary.currency_gained,
                duplicates = summary.new_duplicates,
                "batch opened"
            );
        }
        Ok(BatchResult { outcomes, summary })
    }

    pub fn stats(&self) -> EngineStats {
        let categories: Vec<CategoryProgress> = self
            .categories
            .iter()
            .map(|c| CategoryProgress {
                name: c.name.clone(),
                collected: c.collected(),
                capacity: c.capacity,
                progress_fraction: c.progress(),
            })
            .collect();
        let denominations: Vec<DenominationStats> = self
            .denominations
            .iter()
            .map(|d| DenominationStats {
                name: d.name.clone(),
                value: d.value,
                times_drawn: d.times_drawn,
            })
            .collect();

        let overall_collected: u32 = categories.iter().map(|c| c.collected).sum();
        let overall_capacity: u32 = categories.iter().map(|c| c.capacity).sum();
        let overall_completion = if overall_capacity > 0 {
            overall_collected as f64 / overall_capacity as f64
        } else {
            0.0
        };
        let average_currency_per_box = if self.state.boxes_opened > 0 {
            self.state.total_currency as f64 / self.state.boxes_opened as f64
        } else {
            0.0
        };

        EngineStats {
            boxes_opened: self.state.boxes_opened,
            total_currency: self.state.total_currency,
            total_duplicates: self.state.total_duplicates,
            average_currency_per_box,
            currency_drops: denominations.iter().map(|d| d.times_drawn).sum(),
            categories,
            denominations,
            overall_collected,
            overall_capacity,
            overall_completion,
        }
    }

    /// Clear all counters and ownership sets. The configuration and random
    /// source are kept.
    pub fn reset(&mut self) {
        let (categories, denominations) = fresh_collection(&self.config);
        self.categories = categories;
        self.denominations = denominations;
        self.state = EngineState::default();
        info!("reward engine reset");
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn config(&self) -> &LootConfig {
        &self.config
    }

    pub fn slot_tables(&self) -> &[SlotLootTable] {
        &self.config.slots
    }

    /// True when every slot uses the same drop rates.
    pub fn slots_share_rates(&self) -> bool {
        self.config.slots.windows(2).all(|w| w[0] == w[1])
    }

    pub fn category(&self, name: &str) -> Option<&CollectibleCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn categories(&self) -> &[CollectibleCategory] {
        &self.categories
    }

    pub fn denomination(&self, name: &str) -> Option<&CurrencyDenomination> {
        self.denominations.iter().find(|d| d.name == name)
    }

    pub fn denominations(&self) -> &[CurrencyDenomination] {
        &self.denominations
    }

    /// Categorical draw over one slot's table.
    fn draw_slot(&mut self, slot: usize) -> Result<RewardRef, EngineError> {
        let roll = self.source.unit();
        let key = self.config.slots[slot].pick(roll).ok_or_else(|| {
            EngineError::InvariantViolation(format!("slot {} has no drawable reward", slot + 1))
        })?;
        trace!(slot = slot + 1, roll, reward = key, "slot drawn");

        self.rewards.get(key).copied().ok_or_else(|| {
            EngineError::InvariantViolation(format!("slot {} drew unknown reward '{key}'", slot + 1))
        })
    }

    fn resolve(&mut self, slot: usize, reward: RewardRef) -> Result<Outcome, EngineError> {
        match reward {
            RewardRef::Currency(index) => {
                let value = self.denominations[index].value;
                self.state.total_currency = self.credit(slot, value)?;
                let denomination = &mut self.denominations[index];
                denomination.times_drawn += 1;
                Ok(Outcome::Currency {
                    slot,
                    denomination: denomination.name.clone(),
                    value,
                })
            }
            RewardRef::Category(index) => {
                let capacity = self.categories[index].capacity;
                if capacity == 0 {
                    return Err(EngineError::InvariantViolation(format!(
                        "slot {} drew '{}', which has no items to collect",
                        slot + 1,
                        self.categories[index].name
                    )));
                }

                // Second independent draw, over the full range including owned numbers
                let number = self.source.item_number(capacity);
                if !(1..=capacity).contains(&number) {
                    return Err(EngineError::InvariantViolation(format!(
                        "slot {} drew item #{number} for '{}', outside 1..={capacity}",
                        slot + 1,
                        self.categories[index].name
                    )));
                }

                if self.categories[index].owns(number) {
                    let granted = self.categories[index].duplicate_currency;
                    self.state.total_currency = self.credit(slot, granted)?;
                    self.state.total_duplicates += 1;
                    Ok(Outcome::Duplicate {
                        slot,
                        category: self.categories[index].name.clone(),
                        number,
                        currency_granted: granted,
                    })
                } else {
                    let category = &mut self.categories[index];
                    category.collect(number);
                    Ok(Outcome::NewItem {
                        slot,
                        category: category.name.clone(),
                        number,
                        collected_after: category.collected(),
                        capacity,
                    })
                }
            }
        }
    }

    /// Currency total after adding `amount`, refusing to wrap.
    fn credit(&self, slot: usize, amount: u64) -> Result<u64, EngineError> {
        self.state.total_currency.checked_add(amount).ok_or_else(|| {
            EngineError::InvariantViolation(format!(
                "slot {} would overflow the currency total ({} + {amount})",
                slot + 1,
                self.state.total_currency
            ))
        })
    }
}

fn fresh_collection(config: &LootConfig) -> (Vec<CollectibleCategory>, Vec<CurrencyDenomination>) {
    let categories = config
        .categories
        .iter()
        .map(|c| CollectibleCategory::new(&c.name, c.capacity, config.duplicate_value(&c.name)))
        .collect();
    let denominations = config
        .denominations
        .iter()
        .map(|d| CurrencyDenomination::new(&d.name, d.value))
        .collect();
    (categories, denominations)
}
