//! Built-in configurations.

use super::LootConfig;
use crate::rewards::SlotLootTable;

/// Slots per box in the standard configuration.
pub const STANDARD_SLOTS: usize = 3;

// (name, capacity, duplicate currency)
const STANDARD_CATEGORIES: [(&str, u32, u64); 9] = [
    ("Emote T1", 20, 5),
    ("Emote T2", 8, 10),
    ("Spawn Plat T1", 8, 10),
    ("Spawn Plat T2", 0, 0),
    ("Pets T1", 56, 5),
    ("Pets T2", 32, 10),
    ("Chess Set: T1", 112, 20),
    ("Chess Set: T2", 32, 50),
    ("Chess Set: T3", 0, 0),
];

const STANDARD_DENOMINATIONS: [(&str, u64); 3] = [
    ("Currency High", 100),
    ("Currency Med", 50),
    ("Currency Low", 20),
];

const STANDARD_RATES: [(&str, f64); 12] = [
    ("Currency High", 5.0),
    ("Currency Med", 8.0),
    ("Currency Low", 18.0),
    ("Emote T1", 10.0),
    ("Emote T2", 5.0),
    ("Spawn Plat T1", 5.0),
    ("Spawn Plat T2", 0.0),
    ("Pets T1", 20.0),
    ("Pets T2", 5.0),
    ("Chess Set: T1", 20.0),
    ("Chess Set: T2", 4.0),
    ("Chess Set: T3", 0.0),
];

impl LootConfig {
    /// Current live drop table: three slots sharing the same rates.
    pub fn standard() -> Self {
        let mut config = STANDARD_CATEGORIES.iter().fold(
            LootConfig::new(),
            |config, &(name, capacity, duplicate)| {
                config
                    .category(name, capacity)
                    .duplicate_rule(name, duplicate)
            },
        );
        for (name, value) in STANDARD_DENOMINATIONS {
            config = config.denomination(name, value);
        }
        config.repeat_slot(SlotLootTable::from_pairs(STANDARD_RATES), STANDARD_SLOTS)
    }

    /// Standard rewards with a single slot per box.
    pub fn single_slot() -> Self {
        let mut config = Self::standard();
        config.slots.truncate(1);
        config
    }
}
