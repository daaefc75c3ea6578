//! Seed analysis command
//!
//! Reports the maximum score for a seed, every word that contributes to it and
//! the points needed for each star.

use crate::config::GameConfig;
use crate::core::{SeedError, SeedWord};
use crate::dictionary::Dictionary;
use crate::scoring::Scorer;

/// Result of analyzing a seed word
pub struct SeedAnalysis {
    pub seed: String,
    pub max_score: u32,
    pub total_words: usize,
    /// Formable words grouped by length, longest first
    pub words_by_length: Vec<(usize, Vec<String>)>,
    /// Points needed per star
    pub star_targets: Vec<(u8, u32)>,
}

/// Analyze a seed word against the dictionary
///
/// # Errors
///
/// Returns `SeedError` if the seed is not exactly `letter_count` letters.
pub fn analyze_seed(
    seed: &str,
    dictionary: &Dictionary,
    config: &GameConfig,
) -> Result<SeedAnalysis, SeedError> {
    let seed = SeedWord::new(seed, config.letter_count)?;
    let scorer = Scorer::from_config(config);

    let max_score = dictionary.compute_max_score(seed.text(), &scorer, config.min_word_length);
    let words = dictionary.formable_words(seed.text(), config.min_word_length);
    let total_words = words.len();

    let mut words_by_length: Vec<(usize, Vec<String>)> = Vec::new();
    for word in words {
        let length = word.chars().count();
        match words_by_length.last_mut() {
            Some((len, group)) if *len == length => group.push(word),
            _ => words_by_length.push((length, vec![word])),
        }
    }

    Ok(SeedAnalysis {
        seed: seed.display(),
        max_score,
        total_words,
        words_by_length,
        star_targets: scorer.thresholds().points_needed(max_score),
    })
}
