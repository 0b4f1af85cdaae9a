//! A single simulated collection: one engine, a fixed number of boxes.

use crate::error::EngineError;
use crate::rewards::{DrawSource, EngineStats, Outcome, RewardEngine};

/// Results of one simulated run.
#[derive(Debug, Clone)]
pub struct RunStats {
    pub final_stats: EngineStats,
    /// Box number at which each category was completed, in configuration
    /// order. `None` if never completed (or the category is empty).
    pub boxes_to_complete: Vec<Option<u64>>,
    /// Box number at which every obtainable category was complete.
    pub boxes_to_full_collection: Option<u64>,
    pub new_items: u64,
}

/// Open `boxes` boxes on `engine`, tracking when each category fills up.
pub fn simulate_single_run<S: DrawSource>(
    engine: &mut RewardEngine<S>,
    boxes: u64,
) -> Result<RunStats, EngineError> {
    let mut boxes_to_complete: Vec<Option<u64>> = vec![None; engine.categories().len()];
    let mut boxes_to_full_collection = None;
    let mut new_items = 0u64;

    for _ in 0..boxes {
        let outcomes = engine.open_box()?;
        let box_number = engine.state().boxes_opened;
        new_items += outcomes.iter().filter(|o| o.is_new_item()).count() as u64;

        for outcome in &outcomes {
            if let Outcome::NewItem {
                category,
                collected_after,
                capacity,
                ..
            } = outcome
            {
                if collected_after == capacity {
                    if let Some(index) = engine.categories().iter().position(|c| &c.name == category)
                    {
                        boxes_to_complete[index].get_or_insert(box_number);
                    }
                }
            }
        }

        if boxes_to_full_collection.is_none() && is_fully_collected(engine) {
            boxes_to_full_collection = Some(box_number);
        }
    }

    Ok(RunStats {
        final_stats: engine.stats(),
        boxes_to_complete,
        boxes_to_full_collection,
        new_items,
    })
}

fn is_fully_collected<S: DrawSource>(engine: &RewardEngine<S>) -> bool {
    engine
        .categories()
        .iter()
        .filter(|c| c.capacity > 0)
        .all(|c| c.is_complete())
}
