//! Dictionary of valid words
//!
//! Loaded once into a hash set for O(1) membership tests. Shared read-only
//! between rounds as `Arc<Dictionary>`; before a successful load every query
//! answers as if the dictionary were empty.

mod embedded;
pub mod loader;

pub use embedded::{WORDS, WORDS_COUNT};

use rand::Rng;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{error, info};

use crate::core::LetterPool;
use crate::scoring::Scorer;

/// Errors raised while loading a word list
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("Failed to read dictionary {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Dictionary source contains no words")]
    Empty,
}

#[derive(Debug)]
struct WordIndex {
    words: FxHashSet<String>,
    /// Alphabetic words exactly as long as a seed, sorted
    seed_candidates: Vec<String>,
}

impl WordIndex {
    fn build(words: Vec<String>, seed_length: usize) -> Self {
        let words: FxHashSet<String> = words.into_iter().collect();
        let mut seed_candidates: Vec<String> = words
            .iter()
            .filter(|w| w.chars().count() == seed_length && is_alphabetic(w))
            .cloned()
            .collect();
        seed_candidates.sort_unstable();

        Self {
            words,
            seed_candidates,
        }
    }
}

/// Process-wide word list, loaded at most once
#[derive(Debug)]
pub struct Dictionary {
    seed_length: usize,
    index: OnceLock<WordIndex>,
}

impl Dictionary {
    /// Create an unloaded dictionary whose seed candidates have `seed_length` letters
    #[must_use]
    pub const fn new(seed_length: usize) -> Self {
        Self {
            seed_length,
            index: OnceLock::new(),
        }
    }

    /// Create an already-loaded dictionary from a list of words
    ///
    /// # Examples
    /// ```
    /// use anagram_rounds::dictionary::Dictionary;
    ///
    /// let dictionary = Dictionary::from_words(6, ["garden", "rag"]);
    /// assert!(dictionary.is_valid("RAG"));
    /// assert!(!dictionary.is_valid("zzz"));
    /// ```
    pub fn from_words<I, S>(seed_length: usize, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let dictionary = Self::new(seed_length);
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        dictionary.install(words);
        dictionary
    }

    /// Load from a newline-delimited word list file
    ///
    /// A second call after a successful load is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `DictionaryError` if the file cannot be read or holds no words;
    /// the dictionary then stays unloaded.
    pub fn load_from_path<P: AsRef<Path>>(&self, path: P) -> Result<(), DictionaryError> {
        if self.is_loaded() {
            return Ok(());
        }

        let path = path.as_ref();
        let words = loader::read_words(path).map_err(|source| {
            error!(path = %path.display(), %source, "dictionary source unreadable");
            DictionaryError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;
        self.install_checked(words)
    }

    /// Load from newline-delimited text already in memory
    ///
    /// # Errors
    ///
    /// Returns `DictionaryError::Empty` if the text holds no words.
    pub fn load_from_str(&self, content: &str) -> Result<(), DictionaryError> {
        if self.is_loaded() {
            return Ok(());
        }
        self.install_checked(loader::parse_words(content))
    }

    /// Load the word list compiled into the binary
    ///
    /// # Errors
    ///
    /// Returns `DictionaryError::Empty` if the bundled list is empty.
    pub fn load_embedded(&self) -> Result<(), DictionaryError> {
        if self.is_loaded() {
            return Ok(());
        }
        self.install_checked(loader::words_from_slice(WORDS))
    }

    fn install_checked(&self, words: Vec<String>) -> Result<(), DictionaryError> {
        if words.is_empty() {
            error!("dictionary source contains no words");
            return Err(DictionaryError::Empty);
        }
        self.install(words);
        Ok(())
    }

    fn install(&self, words: Vec<String>) {
        let index = WordIndex::build(words, self.seed_length);
        let (total, candidates) = (index.words.len(), index.seed_candidates.len());
        // Concurrent loaders may race here; the first one wins and the rest are dropped
        if self.index.set(index).is_ok() {
            info!(
                words = total,
                seed_candidates = candidates,
                "dictionary loaded"
            );
        }
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.index.get().is_some()
    }

    /// Number of distinct words, 0 before loading
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.get().map_or(0, |index| index.words.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub const fn seed_length(&self) -> usize {
        self.seed_length
    }

    /// Case-insensitive membership test; always false before loading
    #[must_use]
    pub fn is_valid(&self, word: &str) -> bool {
        self.index
            .get()
            .is_some_and(|index| index.words.contains(&word.to_lowercase()))
    }

    /// Sorted alphabetic words of seed length, empty before loading
    #[must_use]
    pub fn seed_candidates(&self) -> &[String] {
        self.index
            .get()
            .map_or(&[], |index| index.seed_candidates.as_slice())
    }

    /// Uniformly random alphabetic word of exactly `length` letters
    #[must_use]
    pub fn random_word(&self, length: usize) -> Option<String> {
        self.random_word_with(length, &mut rand::rng())
    }

    /// Like [`Dictionary::random_word`] with a caller-supplied RNG
    ///
    /// Single-pass reservoir sampling over the whole word set: the k-th
    /// matching word replaces the current pick with probability 1/k.
    pub fn random_word_with<R: Rng + ?Sized>(&self, length: usize, rng: &mut R) -> Option<String> {
        let index = self.index.get()?;
        let mut chosen: Option<&String> = None;
        let mut seen = 0usize;

        for word in &index.words {
            if word.chars().count() != length || !is_alphabetic(word) {
                continue;
            }
            seen += 1;
            if rng.random_range(0..seen) == 0 {
                chosen = Some(word);
            }
        }

        chosen.cloned()
    }

    /// Theoretical maximum score for a seed
    ///
    /// Sums the points of every dictionary word between `min_word_length` and the
    /// seed length that can be formed from the seed's letters. This scans the
    /// entire vocabulary, so compute it once per seed.
    #[must_use]
    pub fn compute_max_score(&self, seed: &str, scorer: &Scorer, min_word_length: usize) -> u32 {
        let Some(index) = self.index.get() else {
            return 0;
        };
        let pool = LetterPool::from_word(seed);
        let max_length = seed.chars().count();

        let total: u64 = index
            .words
            .par_iter()
            .filter_map(|word| {
                let length = word.chars().count();
                (length >= min_word_length && length <= max_length && pool.can_form(word))
                    .then(|| u64::from(scorer.score_length(length)))
            })
            .sum();
        u32::try_from(total).unwrap_or(u32::MAX)
    }

    /// Every dictionary word formable from `seed`, longest first then alphabetical
    #[must_use]
    pub fn formable_words(&self, seed: &str, min_word_length: usize) -> Vec<String> {
        let Some(index) = self.index.get() else {
            return Vec::new();
        };
        let pool = LetterPool::from_word(seed);
        let max_length = seed.chars().count();

        let mut words: Vec<String> = index
            .words
            .par_iter()
            .filter(|word| {
                let length = word.chars().count();
                length >= min_word_length && length <= max_length && pool.can_form(word)
            })
            .cloned()
            .collect();

        words.sort_unstable_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.cmp(b))
        });
        words
    }
}

fn is_alphabetic(word: &str) -> bool {
    word.chars().all(char::is_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{BonusPolicy, ScoringTable, StarThresholds};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rustc_hash::FxHashMap;
    use std::io::Write;

    fn garden_dictionary() -> Dictionary {
        Dictionary::from_words(
            6,
            ["garden", "danger", "ranged", "rag", "den", "end", "an", "zebra", "eggs"],
        )
    }

    #[test]
    fn unloaded_dictionary_has_no_data() {
        let dictionary = Dictionary::new(6);
        assert!(!dictionary.is_loaded());
        assert!(!dictionary.is_valid("garden"));
        assert_eq!(dictionary.random_word(6), None);
        assert!(dictionary.seed_candidates().is_empty());
        assert_eq!(
            dictionary.compute_max_score("garden", &Scorer::default(), 2),
            0
        );
        assert!(dictionary.formable_words("garden", 2).is_empty());
    }

    #[test]
    fn membership_is_case_insensitive() {
        let dictionary = garden_dictionary();
        assert!(dictionary.is_valid("garden"));
        assert!(dictionary.is_valid("GARDEN"));
        assert!(dictionary.is_valid("Rag"));
        assert!(!dictionary.is_valid("zzz"));
    }

    #[test]
    fn load_is_idempotent() {
        let dictionary = Dictionary::new(6);
        dictionary.load_from_str("garden\nrag\n").unwrap();
        dictionary.load_from_str("zebra\n").unwrap();
        assert!(dictionary.is_valid("rag"));
        assert!(!dictionary.is_valid("zebra"));
        assert_eq!(dictionary.len(), 2);
    }

    #[test]
    fn load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Garden\n rag \n\n").unwrap();
        let dictionary = Dictionary::new(6);
        dictionary.load_from_path(file.path()).unwrap();
        assert!(dictionary.is_valid("garden"));
        assert_eq!(dictionary.len(), 2);
    }

    #[test]
    fn missing_source_leaves_dictionary_unloaded() {
        let dictionary = Dictionary::new(6);
        let err = dictionary.load_from_path("/no/such/dictionary.txt");
        assert!(matches!(err, Err(DictionaryError::Io { .. })));
        assert!(!dictionary.is_loaded());
        assert!(!dictionary.is_valid("garden"));
    }

    #[test]
    fn empty_source_is_rejected() {
        let dictionary = Dictionary::new(6);
        assert!(matches!(
            dictionary.load_from_str("\n  \n"),
            Err(DictionaryError::Empty)
        ));
        assert!(!dictionary.is_loaded());
    }

    #[test]
    fn embedded_list_loads() {
        let dictionary = Dictionary::new(6);
        dictionary.load_embedded().unwrap();
        assert_eq!(dictionary.len(), WORDS_COUNT);
        assert!(dictionary.is_valid("garden"));
        assert!(dictionary.is_valid("rag"));
        assert!(!dictionary.seed_candidates().is_empty());
    }

    #[test]
    fn seed_candidates_are_sorted_alphabetic_seed_length_words() {
        let dictionary = Dictionary::from_words(6, ["ranged", "garden", "danger", "gar-en", "rag"]);
        assert_eq!(
            dictionary.seed_candidates(),
            &["danger".to_string(), "garden".to_string(), "ranged".to_string()]
        );
    }

    #[test]
    fn random_word_single_candidate() {
        let dictionary = Dictionary::from_words(6, ["garden", "rag", "den", "an"]);
        for _ in 0..20 {
            assert_eq!(dictionary.random_word(6).as_deref(), Some("garden"));
        }
    }

    #[test]
    fn random_word_no_candidate() {
        let dictionary = Dictionary::from_words(6, ["rag", "den"]);
        assert_eq!(dictionary.random_word(6), None);
        assert_eq!(dictionary.random_word(9), None);
    }

    #[test]
    fn random_word_skips_non_alphabetic() {
        let dictionary = Dictionary::from_words(3, ["r-g", "rag"]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(
                dictionary.random_word_with(3, &mut rng).as_deref(),
                Some("rag")
            );
        }
    }

    #[test]
    fn random_word_is_roughly_uniform() {
        let dictionary = Dictionary::from_words(3, ["rag", "den", "end", "and", "garden"]);
        let mut rng = StdRng::seed_from_u64(42);
        let trials = 8000;
        let mut counts: FxHashMap<String, usize> = FxHashMap::default();

        for _ in 0..trials {
            let word = dictionary.random_word_with(3, &mut rng).unwrap();
            *counts.entry(word).or_insert(0) += 1;
        }

        assert_eq!(counts.len(), 4);
        for (word, count) in counts {
            let frequency = count as f64 / f64::from(trials);
            assert!(
                (frequency - 0.25).abs() < 0.03,
                "{word} drawn with frequency {frequency}"
            );
        }
    }

    #[test]
    fn max_score_sums_formable_words() {
        let dictionary = garden_dictionary();
        // garden, danger, ranged = 3 * 1500; rag = 300; den, end = 2 * 300; an = 100
        assert_eq!(
            dictionary.compute_max_score("garden", &Scorer::default(), 2),
            4500 + 300 + 600 + 100
        );
    }

    #[test]
    fn max_score_respects_min_length() {
        let dictionary = garden_dictionary();
        assert_eq!(
            dictionary.compute_max_score("garden", &Scorer::default(), 3),
            4500 + 300 + 600
        );
    }

    #[test]
    fn max_score_saturates_with_huge_points() {
        let scorer = Scorer::new(
            ScoringTable::new([(6, u32::MAX)]),
            StarThresholds::default(),
            BonusPolicy::default(),
        );
        assert_eq!(
            garden_dictionary().compute_max_score("garden", &scorer, 2),
            u32::MAX
        );
    }

    #[test]
    fn formable_words_order() {
        let dictionary = garden_dictionary();
        assert_eq!(
            dictionary.formable_words("GARDEN", 2),
            vec!["danger", "garden", "ranged", "den", "end", "rag", "an"]
        );
    }
}
