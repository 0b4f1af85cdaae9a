//! Main simulation runner: one independent engine per run.

use super::collection_sim::{simulate_single_run, RunStats};
use super::config::SimConfig;
use super::report::SimReport;
use crate::config::LootConfig;
use crate::error::EngineError;
use crate::rewards::{RandSource, RewardEngine};

/// Run the full simulation and return a report.
pub fn run_simulation(loot: &LootConfig, config: &SimConfig) -> Result<SimReport, EngineError> {
    let mut all_runs: Vec<RunStats> = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        // Create RNG for this run
        let source = match config.seed {
            Some(seed) => RandSource::from_seed(seed.wrapping_add(run_idx as u64)),
            None => RandSource::from_entropy(),
        };
        let mut engine = RewardEngine::with_source(loot.clone(), source)?;

        let run_stats = simulate_single_run(&mut engine, config.boxes_per_run)?;

        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - Currency {}, Duplicates {}, Collected {}/{}",
                run_idx + 1,
                config.num_runs,
                run_stats.final_stats.total_currency,
                run_stats.final_stats.total_duplicates,
                run_stats.final_stats.overall_collected,
                run_stats.final_stats.overall_capacity
            );
        }
        all_runs.push(run_stats);
    }

    Ok(SimReport::from_runs(all_runs, config.boxes_per_run))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_simulation() {
        let config = SimConfig {
            num_runs: 5,
            boxes_per_run: 100,
            seed: Some(42),
            verbosity: 0,
        };

        let report = run_simulation(&LootConfig::standard(), &config).unwrap();

        assert_eq!(report.num_runs, 5);
        assert_eq!(report.boxes_per_run, 100);
        assert!(report.avg_total_currency > 0.0);
        assert!(report.avg_overall_completion > 0.0);
    }

    #[test]
    fn test_seeded_simulation_is_reproducible() {
        let config = SimConfig {
            num_runs: 3,
            boxes_per_run: 50,
            seed: Some(777),
            verbosity: 0,
        };

        let a = run_simulation(&LootConfig::standard(), &config).unwrap();
        let b = run_simulation(&LootConfig::standard(), &config).unwrap();

        assert_eq!(a.to_json(), b.to_json());
    }

    #[test]
    fn test_runs_use_distinct_seeds() {
        let config = SimConfig {
            num_runs: 2,
            boxes_per_run: 200,
            seed: Some(1),
            verbosity: 0,
        };

        let report = run_simulation(&LootConfig::standard(), &config).unwrap();
        let first = &report.run_stats[0].final_stats;
        let second = &report.run_stats[1].final_stats;
        assert_ne!(first, second);
    }

    #[test]
    fn test_invalid_config_fails() {
        let mut loot = LootConfig::standard();
        loot.slots.clear();

        let result = run_simulation(&loot, &SimConfig::quick());
        assert!(matches!(result, Err(EngineError::Config(_))));
    }
}
