//! Scoring rules
//!
//! Pure, stateless mapping from word length to points, from score to a star
//! rating, and the "found a full-length word" bonus check. All tunables come
//! from `GameConfig`; nothing here is global.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::GameConfig;
use crate::core::{RoundContext, RoundResult, ScoredWord};

/// Points awarded per word length
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoringTable(BTreeMap<usize, u32>);

impl ScoringTable {
    #[must_use]
    pub fn new(entries: impl IntoIterator<Item = (usize, u32)>) -> Self {
        Self(entries.into_iter().collect())
    }

    /// Points for a word of `length` letters, 0 if the length is not in the table
    #[must_use]
    pub fn points(&self, length: usize) -> u32 {
        self.0.get(&length).copied().unwrap_or(0)
    }
}

impl Default for ScoringTable {
    fn default() -> Self {
        Self::new([(2, 100), (3, 300), (4, 600), (5, 1000), (6, 1500)])
    }
}

/// Required score fraction (0..=1) for each star
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StarThresholds(BTreeMap<u8, f64>);

impl StarThresholds {
    #[must_use]
    pub fn new(entries: impl IntoIterator<Item = (u8, f64)>) -> Self {
        Self(entries.into_iter().collect())
    }

    /// Star rating for a score fraction, walking from the highest star down
    #[must_use]
    pub fn stars_for_fraction(&self, fraction: f64) -> u8 {
        self.0
            .iter()
            .rev()
            .find(|&(_, &threshold)| fraction >= threshold)
            .map_or(0, |(&star, _)| star)
    }

    /// Minimum points needed for each star given a max score
    #[must_use]
    pub fn points_needed(&self, max_score: u32) -> Vec<(u8, u32)> {
        self.0
            .iter()
            .map(|(&star, &threshold)| (star, (f64::from(max_score) * threshold).ceil() as u32))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, f64)> + '_ {
        self.0.iter().map(|(&star, &threshold)| (star, threshold))
    }
}

impl Default for StarThresholds {
    fn default() -> Self {
        Self::new([(1, 0.30), (2, 0.60), (3, 0.85)])
    }
}

/// Which words earn the bonus star
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusPolicy {
    /// Any word as long as the seed
    #[default]
    AnyFullLength,
    /// Only the exact seed word
    Themed,
}

/// Star rating summary for a finished round
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rating {
    pub fraction: f64,
    pub stars: u8,
    pub bonus_star: bool,
}

/// Scoring engine built from configuration
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    table: ScoringTable,
    thresholds: StarThresholds,
    bonus_policy: BonusPolicy,
}

impl Scorer {
    #[must_use]
    pub fn new(table: ScoringTable, thresholds: StarThresholds, bonus_policy: BonusPolicy) -> Self {
        Self {
            table,
            thresholds,
            bonus_policy,
        }
    }

    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.scoring.clone(),
            config.star_thresholds.clone(),
            config.bonus_policy,
        )
    }

    #[must_use]
    pub const fn thresholds(&self) -> &StarThresholds {
        &self.thresholds
    }

    #[inline]
    #[must_use]
    pub fn score_length(&self, length: usize) -> u32 {
        self.table.points(length)
    }

    /// Points for a word, by character count
    ///
    /// # Examples
    /// ```
    /// use anagram_rounds::scoring::Scorer;
    ///
    /// let scorer = Scorer::default();
    /// assert_eq!(scorer.score_word("rag"), 300);
    /// assert_eq!(scorer.score_word("garden"), 1500);
    /// assert_eq!(scorer.score_word("g"), 0);
    /// ```
    #[must_use]
    pub fn score_word(&self, word: &str) -> u32 {
        self.score_length(word.chars().count())
    }

    /// Sum of word points, saturating at `u32::MAX`
    #[must_use]
    pub fn total(words: &[ScoredWord]) -> u32 {
        words
            .iter()
            .fold(0u32, |total, w| total.saturating_add(w.points))
    }

    /// Star rating (0..=3 with default thresholds) for `score` out of `max_score`
    #[must_use]
    pub fn stars(&self, score: u32, max_score: u32) -> u8 {
        Self::stars_with(score, max_score, &self.thresholds)
    }

    /// Star rating against explicit thresholds, e.g. a level's own
    #[must_use]
    pub fn stars_with(score: u32, max_score: u32, thresholds: &StarThresholds) -> u8 {
        if max_score == 0 {
            return 0;
        }
        thresholds.stars_for_fraction(f64::from(score) / f64::from(max_score))
    }

    /// Whether the player found a full-length word (or the exact seed when themed)
    #[must_use]
    pub fn earns_bonus_star(words: &[ScoredWord], seed_word: &str, themed: bool) -> bool {
        if themed {
            let seed = seed_word.to_lowercase();
            words.iter().any(|w| w.word.to_lowercase() == seed)
        } else {
            let full_length = seed_word.chars().count();
            words.iter().any(|w| w.word.chars().count() == full_length)
        }
    }

    /// Rate a finished round against its maximum score
    ///
    /// Level-specific thresholds win over the configured defaults; a themed
    /// context or a themed bonus policy requires the exact seed for the bonus star.
    #[must_use]
    pub fn rate(&self, result: &RoundResult, max_score: u32) -> Rating {
        let thresholds = match &result.context {
            RoundContext::Level(level) => {
                level.star_thresholds.as_ref().unwrap_or(&self.thresholds)
            }
            _ => &self.thresholds,
        };
        let themed = result.context.is_themed() || self.bonus_policy == BonusPolicy::Themed;
        let fraction = if max_score == 0 {
            0.0
        } else {
            f64::from(result.total_score) / f64::from(max_score)
        };

        Rating {
            fraction,
            stars: Self::stars_with(result.total_score, max_score, thresholds),
            bonus_star: Self::earns_bonus_star(&result.scored_words, &result.seed_word, themed),
        }
    }
}
