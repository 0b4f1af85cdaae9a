//! Simulation report generation.

use super::collection_sim::RunStats;
use serde::Serialize;

/// Per-category aggregates across all runs.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryReport {
    pub name: String,
    pub capacity: u32,
    pub avg_collected: f64,
    pub avg_completion: f64,
    /// Fraction of runs that finished this category.
    pub completion_rate: f64,
    /// Mean box number of completion, over runs that completed.
    pub avg_boxes_to_complete: Option<f64>,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub boxes_per_run: u64,

    pub avg_total_currency: f64,
    pub avg_total_duplicates: f64,
    pub avg_currency_per_box: f64,
    pub avg_new_items: f64,
    pub avg_overall_completion: f64,

    pub full_collection_rate: f64,
    pub avg_boxes_to_full_collection: Option<f64>,

    pub categories: Vec<CategoryReport>,
    /// Average draws per run for each currency denomination.
    pub avg_currency_drops: Vec<(String, f64)>,

    // Individual run stats for detailed analysis
    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0u32), |(s, n), v| (s + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>, boxes_per_run: u64) -> Self {
        let num_runs = runs.len() as u32;
        let avg = |f: &dyn Fn(&RunStats) -> f64| mean(runs.iter().map(f)).unwrap_or(0.0);

        let avg_total_currency = avg(&|r| r.final_stats.total_currency as f64);
        let avg_total_duplicates = avg(&|r| r.final_stats.total_duplicates as f64);
        let avg_currency_per_box = avg(&|r| r.final_stats.average_currency_per_box);
        let avg_new_items = avg(&|r| r.new_items as f64);
        let avg_overall_completion = avg(&|r| r.final_stats.overall_completion);

        let full_collection_rate = avg(&|r| {
            if r.boxes_to_full_collection.is_some() {
                1.0
            } else {
                0.0
            }
        });
        let avg_boxes_to_full_collection = mean(
            runs.iter()
                .filter_map(|r| r.boxes_to_full_collection)
                .map(|b| b as f64),
        );

        let categories = match runs.first() {
            Some(first) => first
                .final_stats
                .categories
                .iter()
                .enumerate()
                .map(|(index, category)| CategoryReport {
                    name: category.name.clone(),
                    capacity: category.capacity,
                    avg_collected: avg(&|r| r.final_stats.categories[index].collected as f64),
                    avg_completion: avg(&|r| r.final_stats.categories[index].progress_fraction),
                    completion_rate: avg(&|r| {
                        if r.boxes_to_complete[index].is_some() {
                            1.0
                        } else {
                            0.0
                        }
                    }),
                    avg_boxes_to_complete: mean(
                        runs.iter()
                            .filter_map(|r| r.boxes_to_complete[index])
                            .map(|b| b as f64),
                    ),
                })
                .collect(),
            None => Vec::new(),
        };

        let avg_currency_drops = match runs.first() {
            Some(first) => first
                .final_stats
                .denominations
                .iter()
                .enumerate()
                .map(|(index, d)| {
                    (
                        d.name.clone(),
                        avg(&|r| r.final_stats.denominations[index].times_drawn as f64),
                    )
                })
                .collect(),
            None => Vec::new(),
        };

        Self {
            num_runs,
            boxes_per_run,
            avg_total_currency,
            avg_total_duplicates,
            avg_currency_per_box,
            avg_new_items,
            avg_overall_completion,
            full_collection_rate,
            avg_boxes_to_full_collection,
            categories,
            avg_currency_drops,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                  LOOT BOX SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} x {} boxes\n\n",
            self.num_runs, self.boxes_per_run
        ));

        report.push_str("── CURRENCY ─────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Total Currency:  {:.1}\n",
            self.avg_total_currency
        ));
        report.push_str(&format!(
            "  Avg Per Box:         {:.1}\n",
            self.avg_currency_per_box
        ));
        report.push_str(&format!(
            "  Avg Duplicates:      {:.1}\n",
            self.avg_total_duplicates
        ));
        for (name, drops) in &self.avg_currency_drops {
            report.push_str(&format!("  {:<20} {:.1} drops\n", name, drops));
        }
        report.push('\n');

        report.push_str("── COLLECTION ───────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg New Items:       {:.1}\n",
            self.avg_new_items
        ));
        report.push_str(&format!(
            "  Avg Completion:      {:.1}%\n",
            self.avg_overall_completion * 100.0
        ));
        report.push_str(&format!(
            "  Full Collections:    {:.1}%\n",
            self.full_collection_rate * 100.0
        ));
        if let Some(boxes) = self.avg_boxes_to_full_collection {
            report.push_str(&format!("  Avg Boxes to Full:   {:.0}\n", boxes));
        }
        report.push('\n');

        report.push_str("── PER-CATEGORY BREAKDOWN ───────────────────────────────────────\n");
        report.push_str("  Category          Owned       Done    Completed  Boxes\n");
        report.push_str("  ────────          ─────       ────    ─────────  ─────\n");
        for category in self.categories.iter().filter(|c| c.capacity > 0) {
            let boxes = category
                .avg_boxes_to_complete
                .map(|b| format!("{:.0}", b))
                .unwrap_or_else(|| "-".to_string());
            let bar: String = "█".repeat((category.avg_completion * 10.0) as usize);
            report.push_str(&format!(
                "  {:<16} {:>5.1}/{:<4} {:>5.1}%   {:>6.1}%  {:>5} {}\n",
                category.name,
                category.avg_collected,
                category.capacity,
                category.avg_completion * 100.0,
                category.completion_rate * 100.0,
                boxes,
                bar
            ));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
