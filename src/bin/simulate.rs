//! Collection simulator CLI.
//!
//! Run Monte Carlo simulations to analyze drop tables.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                    # Default: 100 runs x 500 boxes
//!   cargo run --bin simulate -- -n 20 -b 2000   # 20 runs of 2000 boxes
//!   cargo run --bin simulate -- --seed 42       # Reproducible run

use anyhow::{Context, Result};
use clap::Parser;
use lootbox::simulator::{run_simulation, SimConfig};
use lootbox::LootConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "simulate", about = "Monte Carlo loot box collection simulator")]
struct Args {
    /// Number of simulation runs
    #[arg(short = 'n', long)]
    runs: Option<u32>,

    /// Boxes opened per run
    #[arg(short, long)]
    boxes: Option<u64>,

    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Loot configuration JSON (default: built-in)
    #[arg(short, long, env = "LOOTBOX_CONFIG")]
    config: Option<PathBuf>,

    /// Quick test (20 runs x 100 boxes)
    #[arg(long, conflicts_with = "completion")]
    quick: bool,

    /// Long runs for boxes-to-complete estimates (5000 boxes per run)
    #[arg(long)]
    completion: bool,

    /// Print a line per run
    #[arg(short, long)]
    verbose: bool,

    /// Save JSON report
    #[arg(long)]
    json: bool,
}

impl Args {
    fn sim_config(&self) -> SimConfig {
        let mut config = if self.quick {
            SimConfig::quick()
        } else if self.completion {
            SimConfig::completion_analysis(SimConfig::default().num_runs)
        } else {
            SimConfig::default()
        };
        if let Some(runs) = self.runs {
            config.num_runs = runs;
        }
        if let Some(boxes) = self.boxes {
            config.boxes_per_run = boxes;
        }
        config.seed = self.seed;
        if self.verbose {
            config.verbosity = 2;
        }
        config
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lootbox=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let loot = match &args.config {
        Some(path) => {
            LootConfig::load(path).with_context(|| format!("loading {}", path.display()))?
        }
        None => LootConfig::standard(),
    };
    let config = args.sim_config();

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              LOOT BOX COLLECTION SIMULATOR                    ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Boxes per Run:  {}", config.boxes_per_run);
    println!("  Slots per Box:  {}", loot.slot_count());
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&loot, &config)?;

    println!("{}", report.to_text());

    if args.json {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, report.to_json())
            .with_context(|| format!("writing {filename}"))?;
        println!("JSON report saved to: {}", filename);
    }
    Ok(())
}
