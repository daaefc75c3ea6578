//! Daily challenge planning command
//!
//! Plans seeds and max scores for a range of dates and writes them as JSON.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashSet;
use std::fs;
use std::path::Path;

use crate::config::GameConfig;
use crate::dictionary::Dictionary;
use crate::schedule::{DailyPlan, PlanRequest, plan_daily_challenges};
use crate::scoring::Scorer;

/// Options for a planning run
pub struct DailyConfig<'a> {
    pub start: NaiveDate,
    pub days: u64,
    /// Fixed RNG seed for reproducible plans
    pub rng_seed: Option<u64>,
    /// Existing plan file; its dates are skipped and its entries kept
    pub existing: Option<&'a Path>,
}

/// Read previously planned challenges, if the file exists
///
/// # Errors
///
/// Returns an error if the file exists but is not a JSON list of plans.
pub fn read_existing(path: &Path) -> Result<Vec<DailyPlan>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

/// Plan daily challenges with a progress bar
///
/// Returns the existing plans followed by the new ones, sorted by date.
///
/// # Errors
///
/// Returns an error if the existing plan file is unreadable or planning fails.
pub fn run_daily(
    options: &DailyConfig<'_>,
    dictionary: &Dictionary,
    config: &GameConfig,
) -> Result<Vec<DailyPlan>> {
    let mut plans = match options.existing {
        Some(path) => read_existing(path)?,
        None => Vec::new(),
    };
    let existing: FxHashSet<NaiveDate> = plans.iter().map(|p| p.date).collect();

    let pb = ProgressBar::new(options.days);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
            .context("progress bar template")?
            .progress_chars("█▓▒░"),
    );
    pb.set_message("computing max scores");

    let mut rng = match options.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let request = PlanRequest {
        start: options.start,
        days: options.days,
        existing: &existing,
        min_word_length: config.min_word_length,
    };
    let planned = plan_daily_challenges(
        dictionary,
        &Scorer::from_config(config),
        &request,
        &mut rng,
        &|| pb.inc(1),
    )?;
    pb.finish_with_message(format!("planned {} challenges", planned.len()));

    plans.extend(planned);
    plans.sort_by_key(|p| p.date);
    Ok(plans)
}
