//! Daily challenge planning
//!
//! Assigns a seed word and its maximum score to each upcoming date. Seeds are
//! drawn without replacement from the dictionary's seed candidates; when the
//! pool runs out it is reshuffled and reused.

use chrono::{Days, NaiveDate};
use rand::Rng;
use rand::seq::SliceRandom;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::dictionary::Dictionary;
use crate::scoring::Scorer;

/// One planned daily challenge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPlan {
    pub date: NaiveDate,
    /// Uppercase seed word
    pub seed_word: String,
    pub max_score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("Dictionary has no {0}-letter seed candidates")]
    NoCandidates(usize),
    #[error("Date range starting {0} overflows the calendar")]
    DateOverflow(NaiveDate),
}

/// Which dates to plan and how to score them
#[derive(Debug, Clone)]
pub struct PlanRequest<'a> {
    pub start: NaiveDate,
    pub days: u64,
    /// Dates that already have a challenge and must be skipped
    pub existing: &'a FxHashSet<NaiveDate>,
    pub min_word_length: usize,
}

/// Dates in `start..start + days` that are not already planned
///
/// # Errors
///
/// Returns `ScheduleError::DateOverflow` if the range leaves chrono's calendar.
pub fn target_dates(
    start: NaiveDate,
    days: u64,
    existing: &FxHashSet<NaiveDate>,
) -> Result<Vec<NaiveDate>, ScheduleError> {
    (0..days)
        .map(|offset| {
            start
                .checked_add_days(Days::new(offset))
                .ok_or(ScheduleError::DateOverflow(start))
        })
        .filter(|date| date.as_ref().map_or(true, |d| !existing.contains(d)))
        .collect()
}

/// Plan challenges for every unplanned date in the request
///
/// `on_planned` is called once per finished plan, from worker threads.
///
/// # Errors
///
/// Returns `ScheduleError` if there are dates to plan but no seed candidates,
/// or if the date range overflows.
pub fn plan_daily_challenges<R: Rng + ?Sized>(
    dictionary: &Dictionary,
    scorer: &Scorer,
    request: &PlanRequest<'_>,
    rng: &mut R,
    on_planned: &(dyn Fn() + Sync),
) -> Result<Vec<DailyPlan>, ScheduleError> {
    let dates = target_dates(request.start, request.days, request.existing)?;
    if dates.is_empty() {
        info!("all target dates already planned");
        return Ok(Vec::new());
    }

    let candidates = dictionary.seed_candidates();
    if candidates.is_empty() {
        return Err(ScheduleError::NoCandidates(dictionary.seed_length()));
    }
    if candidates.len() < dates.len() {
        warn!(
            candidates = candidates.len(),
            dates = dates.len(),
            "not enough seed candidates, seeds will repeat"
        );
    }

    let mut pool: Vec<&String> = Vec::with_capacity(dates.len() + candidates.len());
    while pool.len() < dates.len() {
        let mut round: Vec<&String> = candidates.iter().collect();
        round.shuffle(rng);
        pool.extend(round);
    }
    pool.truncate(dates.len());

    let plans = dates
        .par_iter()
        .zip(pool.par_iter())
        .map(|(&date, &seed)| {
            let plan = DailyPlan {
                date,
                seed_word: seed.to_uppercase(),
                max_score: dictionary.compute_max_score(seed, scorer, request.min_word_length),
            };
            on_planned();
            plan
        })
        .collect();

    Ok(plans)
}
