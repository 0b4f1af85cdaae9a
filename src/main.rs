//! Console front end for the reward engine.
//!
//! Opens boxes, prints the rewards of the most recent ones, and shows
//! collection, currency and drop-rate panels.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use lootbox::config::default_config_path;
use lootbox::rewards::DrawSource;
use lootbox::{BatchSummary, EngineStats, LootConfig, Outcome, RewardEngine};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lootbox", about = "Loot box reward simulator")]
struct Cli {
    /// Number of boxes to open
    #[arg(short = 'n', long, default_value_t = 1, allow_negative_numbers = true)]
    boxes: i64,

    /// Random seed for reproducible openings
    #[arg(short, long)]
    seed: Option<u64>,

    /// Loot configuration JSON (default: ~/.lootbox/config.json, else built-in)
    #[arg(short, long, env = "LOOTBOX_CONFIG")]
    config: Option<PathBuf>,

    /// Show rewards from this many of the most recent boxes
    #[arg(long, default_value_t = 10)]
    show: usize,

    /// Print drop rates by slot
    #[arg(long)]
    rates: bool,

    /// Save final stats as JSON
    #[arg(long)]
    json: bool,

    /// Open boxes one at a time from the keyboard
    #[arg(short, long)]
    interactive: bool,

    /// Write the built-in configuration to ~/.lootbox/config.json and exit
    #[arg(long)]
    init_config: bool,

    /// Verbose logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.init_config {
        let path = default_config_path()?;
        LootConfig::standard()
            .save(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    let config = resolve_config(cli.config.as_deref())?;
    match cli.seed {
        Some(seed) => run(RewardEngine::seeded(config, seed)?, &cli),
        None => run(RewardEngine::new(config)?, &cli),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "lootbox=debug" } else { "lootbox=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn resolve_config(path: Option<&Path>) -> Result<LootConfig> {
    if let Some(path) = path {
        return LootConfig::load(path).with_context(|| format!("loading {}", path.display()));
    }
    match default_config_path() {
        Ok(path) if path.exists() => {
            LootConfig::load(&path).with_context(|| format!("loading {}", path.display()))
        }
        _ => Ok(LootConfig::standard()),
    }
}

fn run<S: DrawSource>(mut engine: RewardEngine<S>, cli: &Cli) -> Result<()> {
    if cli.rates {
        print_drop_rates(&engine);
    }

    if cli.interactive {
        interactive_loop(&mut engine)?;
    } else {
        let batch = engine.open_batch(cli.boxes)?;
        print_rewards(&batch.outcomes, engine.config().slot_count(), cli.show);
        if cli.boxes > 1 {
            print_batch_summary(&batch.summary);
        }
    }

    let stats = engine.stats();
    print_stats(&stats);

    if cli.json {
        let filename = format!("lootbox_stats_{}.json", Utc::now().format("%Y%m%d_%H%M%S"));
        std::fs::write(&filename, stats.to_json())
            .with_context(|| format!("writing {filename}"))?;
        println!("JSON stats saved to: {}", filename);
    }
    Ok(())
}

fn interactive_loop<S: DrawSource>(engine: &mut RewardEngine<S>) -> Result<()> {
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("\nPress Enter to open a loot box (r = reset, q = quit): ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        match line.trim() {
            "q" | "quit" => return Ok(()),
            "r" | "reset" => {
                engine.reset();
                println!("Inventory reset.");
            }
            _ => {
                let outcomes = engine.open_box()?;
                println!("\nYou received:");
                for outcome in &outcomes {
                    println!("- {}", outcome);
                }
                let stats = engine.stats();
                println!(
                    "Boxes: {}  Currency: {}  Duplicates: {}",
                    stats.boxes_opened, stats.total_currency, stats.total_duplicates
                );
            }
        }
    }
}

fn print_rewards(outcomes: &[Outcome], slots: usize, show: usize) {
    if outcomes.is_empty() || show == 0 {
        return;
    }
    let boxes = outcomes.len() / slots.max(1);
    let shown_boxes = boxes.min(show);
    let recent = &outcomes[outcomes.len() - shown_boxes * slots..];

    if boxes > shown_boxes {
        println!(
            "Opened {} loot boxes! Showing the last {} boxes' rewards.",
            boxes, shown_boxes
        );
    }

    let sections: [(&str, fn(&Outcome) -> bool); 3] = [
        ("New Items", Outcome::is_new_item),
        ("Duplicates", Outcome::is_duplicate),
        ("Currency", |o| matches!(o, Outcome::Currency { .. })),
    ];
    for (title, belongs) in sections {
        let group: Vec<&Outcome> = recent.iter().filter(|o| belongs(o)).collect();
        if group.is_empty() {
            continue;
        }
        println!("\n── {} ──", title);
        for outcome in group {
            println!("  {}", outcome);
        }
    }
}

fn print_batch_summary(summary: &BatchSummary) {
    println!("\n── Batch Opening Summary ──");
    println!("  Boxes Opened:      {}", summary.boxes_opened);
    println!("  Currency Gained:   {}", summary.currency_gained);
    println!("  New Duplicates:    {}", summary.new_duplicates);
    println!("  Avg Currency/Box:  {:.1}", summary.avg_currency_per_box);
    for (category, count) in summary.new_items.iter().filter(|(_, count)| *count > 0) {
        println!("  {}: +{} new items", category, count);
    }
}

fn print_stats(stats: &EngineStats) {
    println!("\n── Inventory Status ──");
    println!("  Boxes Opened:          {}", stats.boxes_opened);
    println!(
        "  Avg. Currency per Box: {:.1}",
        stats.average_currency_per_box
    );
    println!("  Total Duplicates:      {}", stats.total_duplicates);

    println!("\n── Collection Progress ──");
    println!(
        "  Overall: {}/{} ({:.1}%)",
        stats.overall_collected,
        stats.overall_capacity,
        stats.overall_completion * 100.0
    );
    for category in stats.categories.iter().filter(|c| c.capacity > 0) {
        let bar = "█".repeat((category.progress_fraction * 20.0) as usize);
        println!(
            "  {:<16} {:>4}/{:<4} {:>5.1}% {}",
            category.name,
            category.collected,
            category.capacity,
            category.progress_fraction * 100.0,
            bar
        );
    }

    println!("\n── Currency Status ──");
    println!("  Total Currency: {}", stats.total_currency);
    println!("  Currency Drops: {}", stats.currency_drops);
    for denomination in &stats.denominations {
        println!(
            "  {:<16} x{} (value {})",
            denomination.name, denomination.times_drawn, denomination.value
        );
    }
}

fn print_drop_rates<S: DrawSource>(engine: &RewardEngine<S>) {
    println!("── Drop Rates by Slot ──");
    let tables = engine.slot_tables();
    let shown = if engine.slots_share_rates() {
        println!("All slots currently have the same drop rates.");
        &tables[..1]
    } else {
        tables
    };

    for (index, table) in shown.iter().enumerate() {
        if shown.len() > 1 {
            println!("Slot {}", index + 1);
        }
        for entry in table.by_rate_desc() {
            let detail = match (
                engine.category(&entry.reward),
                engine.denomination(&entry.reward),
            ) {
                (Some(category), _) => format!("Unique Items: {}", category.capacity),
                (None, Some(denomination)) => format!("Value: {}", denomination.value),
                (None, None) => String::new(),
            };
            println!("  {:<16} {:>5.1}% ({})", entry.reward, entry.weight, detail);
        }
    }
    println!();
}
