//! Simulation configuration.

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of independent collections to simulate
    pub num_runs: u32,

    /// Boxes opened in each run
    pub boxes_per_run: u64,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            boxes_per_run: 500,
            seed: None,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for a short look at early progress
    pub fn quick() -> Self {
        Self {
            num_runs: 20,
            boxes_per_run: 100,
            ..Default::default()
        }
    }

    /// Long runs for estimating boxes-to-complete
    pub fn completion_analysis(num_runs: u32) -> Self {
        Self {
            num_runs,
            boxes_per_run: 5_000,
            ..Default::default()
        }
    }
}
