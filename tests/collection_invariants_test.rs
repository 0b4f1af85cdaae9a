//! Integration test: collection and accounting invariants
//!
//! Runs seeded engines over many boxes and checks the properties that must hold
//! after every opening: monotonic counters, bounded ownership, slot counts and
//! drop distributions that follow the configured weights.

use lootbox::rewards::SlotLootTable;
use lootbox::{ConfigError, LootConfig, Outcome, RewardEngine};
use std::collections::HashMap;

// =========================================================================
// Monotonic counters and bounded collections
// =========================================================================

#[test]
fn test_counters_never_decrease_and_collections_stay_bounded() {
    for seed in [1u64, 7, 42, 1234] {
        let mut engine = RewardEngine::seeded(LootConfig::standard(), seed).unwrap();
        let mut last_currency = 0;
        let mut last_duplicates = 0;
        let mut last_collected: Vec<u32> = vec![0; engine.categories().len()];

        for _ in 0..400 {
            engine.open_box().unwrap();
            let state = engine.state();
            assert!(state.total_currency >= last_currency);
            assert!(state.total_duplicates >= last_duplicates);
            last_currency = state.total_currency;
            last_duplicates = state.total_duplicates;

            for (index, category) in engine.categories().iter().enumerate() {
                let collected = category.collected();
                assert!(collected >= last_collected[index]);
                assert!(collected <= category.capacity);
                assert!(category
                    .owned()
                    .iter()
                    .all(|n| *n >= 1 && *n <= category.capacity));
                last_collected[index] = collected;
            }
        }
    }
}

#[test]
fn test_every_box_has_one_outcome_per_slot() {
    let config = LootConfig::single_slot()
        .slot(LootConfig::standard().slots[0].clone())
        .slot(SlotLootTable::from_pairs([("Currency Low", 100.0)]))
        .slot(SlotLootTable::from_pairs([("Pets T2", 100.0)]));
    let mut engine = RewardEngine::seeded(config, 5).unwrap();

    for _ in 0..100 {
        let outcomes = engine.open_box().unwrap();
        assert_eq!(outcomes.len(), 4);
        for (index, outcome) in outcomes.iter().enumerate() {
            assert_eq!(outcome.slot(), index);
        }
        assert!(matches!(
            &outcomes[2],
            Outcome::Currency { denomination, value: 20, .. } if denomination == "Currency Low"
        ));
        assert!(matches!(
            &outcomes[3],
            Outcome::NewItem { category, .. } | Outcome::Duplicate { category, .. }
                if category == "Pets T2"
        ));
    }
}

#[test]
fn test_currency_total_equals_sum_of_outcomes() {
    let mut engine = RewardEngine::seeded(LootConfig::standard(), 314).unwrap();
    let batch = engine.open_batch(1_000).unwrap();
    let from_outcomes: u64 = batch.outcomes.iter().map(Outcome::currency).sum();

    assert_eq!(from_outcomes, engine.state().total_currency);
    let stats = engine.stats();
    let drawn: u64 = stats.denominations.iter().map(|d| d.times_drawn).sum();
    assert_eq!(drawn, stats.currency_drops);
}

// =========================================================================
// Zero-weight and zero-capacity entries
// =========================================================================

#[test]
fn test_zero_capacity_zero_weight_category_never_drawn() {
    let mut engine = RewardEngine::seeded(LootConfig::standard(), 2718).unwrap();
    let batch = engine.open_batch(5_000).unwrap();

    for outcome in &batch.outcomes {
        match outcome {
            Outcome::NewItem { category, .. } | Outcome::Duplicate { category, .. } => {
                assert_ne!(category, "Spawn Plat T2");
                assert_ne!(category, "Chess Set: T3");
            }
            Outcome::Currency { .. } => {}
        }
    }
    assert_eq!(engine.category("Spawn Plat T2").unwrap().collected(), 0);
    assert_eq!(engine.category("Chess Set: T3").unwrap().collected(), 0);
}

#[test]
fn test_zero_weight_currency_never_drawn() {
    let config = LootConfig::new()
        .denomination("Coin", 1)
        .denomination("Jackpot", 1_000_000)
        .slot(SlotLootTable::from_pairs([("Jackpot", 0.0), ("Coin", 100.0)]));
    let mut engine = RewardEngine::seeded(config, 3).unwrap();
    engine.open_batch(2_000).unwrap();

    assert_eq!(engine.denomination("Jackpot").unwrap().times_drawn, 0);
    assert_eq!(engine.state().total_currency, 2_000);
}

// =========================================================================
// Distribution follows weights
// =========================================================================

#[test]
fn test_draw_frequencies_follow_weights() {
    let mut engine = RewardEngine::seeded(LootConfig::single_slot(), 12345).unwrap();
    let trials = 20_000;
    let batch = engine.open_batch(trials).unwrap();

    let mut counts: HashMap<String, u32> = HashMap::new();
    for outcome in &batch.outcomes {
        let key = match outcome {
            Outcome::Currency { denomination, .. } => denomination.clone(),
            Outcome::NewItem { category, .. } | Outcome::Duplicate { category, .. } => {
                category.clone()
            }
        };
        *counts.entry(key).or_insert(0) += 1;
    }

    for entry in LootConfig::standard().slots[0].entries() {
        let observed = counts.get(&entry.reward).copied().unwrap_or(0) as f64 / trials as f64;
        let expected = entry.weight / 100.0;
        assert!(
            (observed - expected).abs() < 0.015,
            "{}: expected ~{:.3}, observed {:.3}",
            entry.reward,
            expected,
            observed
        );
    }
}

#[test]
fn test_item_numbers_drawn_with_replacement() {
    // A single-item category: every draw after the first must be a duplicate
    let config = LootConfig::new()
        .category("Solo", 1)
        .duplicate_rule("Solo", 2)
        .slot(SlotLootTable::from_pairs([("Solo", 100.0)]));
    let mut engine = RewardEngine::seeded(config, 10).unwrap();
    let batch = engine.open_batch(50).unwrap();

    assert_eq!(batch.summary.new_items_for("Solo"), 1);
    assert_eq!(batch.summary.new_duplicates, 49);
    assert_eq!(batch.summary.currency_gained, 98);
}

// =========================================================================
// Construction failures
// =========================================================================

#[test]
fn test_unbalanced_tables_always_rejected() {
    for total in [99.98, 100.02, 50.0, 150.0, 0.0] {
        let config = LootConfig::new()
            .denomination("Coin", 10)
            .denomination("Gem", 10)
            .slot(SlotLootTable::from_pairs([("Coin", total - 10.0), ("Gem", 10.0)]));
        assert!(
            matches!(
                RewardEngine::seeded(config, 1),
                Err(ConfigError::WeightSum { .. }) | Err(ConfigError::InvalidWeight { .. })
            ),
            "total {total} should be rejected"
        );
    }
}

#[test]
fn test_tables_within_tolerance_accepted() {
    for total in [99.995, 100.0, 100.005] {
        let config = LootConfig::new()
            .denomination("Coin", 10)
            .denomination("Gem", 10)
            .slot(SlotLootTable::from_pairs([("Coin", total - 10.0), ("Gem", 10.0)]));
        assert!(
            RewardEngine::seeded(config, 1).is_ok(),
            "total {total} should be accepted"
        );
    }
}

#[test]
fn test_each_slot_validated_independently() {
    let mut config = LootConfig::standard();
    config.slots[2] = SlotLootTable::from_pairs([("Currency High", 100.5)]);

    match RewardEngine::seeded(config, 1) {
        Err(ConfigError::WeightSum { slot, .. }) => assert_eq!(slot, 3),
        Err(other) => panic!("expected WeightSum, got {other}"),
        Ok(_) => panic!("unbalanced third slot should be rejected"),
    }
}
