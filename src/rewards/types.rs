//! Collection state, per-slot outcomes and statistics snapshots.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// One class of numbered collectibles, e.g. "Pets T1", and the numbers owned so far.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectibleCategory {
    pub name: String,
    pub capacity: u32,
    /// Currency granted instead of an already-owned number.
    pub duplicate_currency: u64,
    owned: BTreeSet<u32>,
}

impl CollectibleCategory {
    pub fn new(name: impl Into<String>, capacity: u32, duplicate_currency: u64) -> Self {
        Self {
            name: name.into(),
            capacity,
            duplicate_currency,
            owned: BTreeSet::new(),
        }
    }

    /// Record `number` as owned. Returns `true` if it was new.
    ///
    /// Numbers outside `1..=capacity` are rejected and never stored.
    pub fn collect(&mut self, number: u32) -> bool {
        if number == 0 || number > self.capacity {
            return false;
        }
        self.owned.insert(number)
    }

    pub fn owns(&self, number: u32) -> bool {
        self.owned.contains(&number)
    }

    pub fn owned(&self) -> &BTreeSet<u32> {
        &self.owned
    }

    pub fn collected(&self) -> u32 {
        self.owned.len() as u32
    }

    /// Fraction collected, 0.0 for an empty category.
    pub fn progress(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.collected() as f64 / self.capacity as f64
        }
    }

    pub fn is_complete(&self) -> bool {
        self.capacity > 0 && self.collected() == self.capacity
    }
}

/// A fixed-value currency reward, e.g. "Currency High".
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyDenomination {
    pub name: String,
    pub value: u64,
    pub times_drawn: u64,
}

impl CurrencyDenomination {
    pub fn new(name: impl Into<String>, value: u64) -> Self {
        Self {
            name: name.into(),
            value,
            times_drawn: 0,
        }
    }
}

/// Aggregate counters for one engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineState {
    pub boxes_opened: u64,
    pub total_currency: u64,
    pub total_duplicates: u64,
}

/// What a single slot produced. `slot` is the 0-based slot index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Currency {
        slot: usize,
        denomination: String,
        value: u64,
    },
    NewItem {
        slot: usize,
        category: String,
        number: u32,
        collected_after: u32,
        capacity: u32,
    },
    Duplicate {
        slot: usize,
        category: String,
        number: u32,
        currency_granted: u64,
    },
}

impl Outcome {
    pub fn slot(&self) -> usize {
        match self {
            Outcome::Currency { slot, .. }
            | Outcome::NewItem { slot, .. }
            | Outcome::Duplicate { slot, .. } => *slot,
        }
    }

    /// Currency this outcome added to the running total.
    pub fn currency(&self) -> u64 {
        match self {
            Outcome::Currency { value, .. } => *value,
            Outcome::Duplicate {
                currency_granted, ..
            } => *currency_granted,
            Outcome::NewItem { .. } => 0,
        }
    }

    pub fn is_new_item(&self) -> bool {
        matches!(self, Outcome::NewItem { .. })
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Outcome::Duplicate { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Currency {
                slot,
                denomination,
                value,
            } => write!(f, "Slot {}: {}: {}", slot + 1, denomination, value),
            Outcome::NewItem {
                slot,
                category,
                number,
                collected_after,
                capacity,
            } => write!(
                f,
                "Slot {}: New {} #{} ({}/{})",
                slot + 1,
                category,
                number,
                collected_after,
                capacity
            ),
            Outcome::Duplicate {
                slot,
                category,
                number,
                currency_granted,
            } => write!(
                f,
                "Slot {}: {} #{} (Duplicate: +{} currency)",
                slot + 1,
                category,
                number,
                currency_granted
            ),
        }
    }
}

/// Net effect of a batch of box openings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub boxes_opened: u64,
    pub currency_gained: u64,
    pub new_duplicates: u64,
    /// New distinct items per category, in configuration order.
    pub new_items: Vec<(String, u32)>,
    pub avg_currency_per_box: f64,
}

impl BatchSummary {
    pub fn new_items_for(&self, category: &str) -> u32 {
        self.new_items
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn total_new_items(&self) -> u32 {
        self.new_items.iter().map(|(_, count)| count).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryProgress {
    pub name: String,
    pub collected: u32,
    pub capacity: u32,
    pub progress_fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DenominationStats {
    pub name: String,
    pub value: u64,
    pub times_drawn: u64,
}

/// Read-only snapshot of an engine's progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineStats {
    pub boxes_opened: u64,
    pub total_currency: u64,
    pub total_duplicates: u64,
    /// 0.0 before the first box. A display value, not a true mean.
    pub average_currency_per_box: f64,
    pub categories: Vec<CategoryProgress>,
    pub denominations: Vec<DenominationStats>,
    pub overall_collected: u32,
    pub overall_capacity: u32,
    pub overall_completion: f64,
    pub currency_drops: u64,
}

impl EngineStats {
    pub fn category(&self, name: &str) -> Option<&CategoryProgress> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn denomination(&self, name: &str) -> Option<&DenominationStats> {
        self.denominations.iter().find(|d| d.name == name)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_reports_new_then_owned() {
        let mut pets = CollectibleCategory::new("Pets", 3, 5);
        assert!(pets.collect(2));
        assert!(!pets.collect(2));
        assert!(pets.owns(2));
        assert_eq!(pets.collected(), 1);
    }

    #[test]
    fn test_collect_rejects_out_of_range_numbers() {
        let mut pets = CollectibleCategory::new("Pets", 3, 5);
        assert!(!pets.collect(0));
        assert!(!pets.collect(4));
        assert_eq!(pets.collected(), 0);
    }

    #[test]
    fn test_progress_and_completion() {
        let mut pets = CollectibleCategory::new("Pets", 2, 0);
        assert_eq!(pets.progress(), 0.0);
        pets.collect(1);
        assert!((pets.progress() - 0.5).abs() < f64::EPSILON);
        assert!(!pets.is_complete());
        pets.collect(2);
        assert!(pets.is_complete());

        let empty = CollectibleCategory::new("Chess Set: T3", 0, 0);
        assert_eq!(empty.progress(), 0.0);
        assert!(!empty.is_complete());
    }

    #[test]
    fn test_outcome_display_uses_one_based_slots() {
        let currency = Outcome::Currency {
            slot: 0,
            denomination: "Currency High".to_string(),
            value: 100,
        };
        assert_eq!(currency.to_string(), "Slot 1: Currency High: 100");

        let new_item = Outcome::NewItem {
            slot: 1,
            category: "Pets T1".to_string(),
            number: 5,
            collected_after: 1,
            capacity: 56,
        };
        assert_eq!(new_item.to_string(), "Slot 2: New Pets T1 #5 (1/56)");

        let duplicate = Outcome::Duplicate {
            slot: 2,
            category: "Pets T1".to_string(),
            number: 5,
            currency_granted: 5,
        };
        assert_eq!(
            duplicate.to_string(),
            "Slot 3: Pets T1 #5 (Duplicate: +5 currency)"
        );
        assert_eq!(duplicate.currency(), 5);
        assert_eq!(duplicate.slot(), 2);
    }

    #[test]
    fn test_batch_summary_lookup() {
        let summary = BatchSummary {
            new_items: vec![("Pets".to_string(), 2), ("Emotes".to_string(), 1)],
            ..Default::default()
        };
        assert_eq!(summary.new_items_for("Pets"), 2);
        assert_eq!(summary.new_items_for("Missing"), 0);
        assert_eq!(summary.total_new_items(), 3);
    }
}
