//! Letter multiset matching
//!
//! Decides whether a word can be spelled from a fixed multiset of letters,
//! honouring repeated letters: two `a`s available means at most two `a`s used.

use rustc_hash::FxHashMap;

/// Counted multiset of available letters, lowercase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterPool {
    counts: FxHashMap<char, u8>,
}

impl LetterPool {
    /// Build a pool from any sequence of letters
    pub fn from_letters<I>(letters: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let mut counts = FxHashMap::default();
        for ch in letters.into_iter().flat_map(char::to_lowercase) {
            let entry = counts.entry(ch).or_insert(0u8);
            *entry = entry.saturating_add(1);
        }
        Self { counts }
    }

    /// Build a pool from the characters of a string
    #[must_use]
    pub fn from_word(word: &str) -> Self {
        Self::from_letters(word.chars())
    }

    /// How many copies of `letter` are available
    #[must_use]
    pub fn count(&self, letter: char) -> u8 {
        self.counts.get(&letter).copied().unwrap_or(0)
    }

    /// Check whether `word` can be formed without reusing any letter instance
    #[must_use]
    pub fn can_form(&self, word: &str) -> bool {
        let mut available = self.counts.clone();
        for ch in word.chars().flat_map(char::to_lowercase) {
            match available.get_mut(&ch) {
                Some(count) if *count > 0 => *count -= 1,
                _ => return false,
            }
        }
        true
    }
}

/// Check whether `word` can be spelled from `available`
///
/// # Examples
/// ```
/// use anagram_rounds::core::can_form;
///
/// assert!(can_form("rag", "GARDEN"));
/// assert!(!can_form("zzz", "GARDEN"));
/// assert!(!can_form("added", "GARDEN")); // only one 'd'
/// ```
#[must_use]
pub fn can_form(word: &str, available: &str) -> bool {
    LetterPool::from_word(available).can_form(word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn formable_words() {
        assert!(can_form("rag", "garden"));
        assert!(can_form("garden", "garden"));
        assert!(can_form("danger", "garden"));
        assert!(can_form("", "garden"));
    }

    #[test]
    fn unformable_words() {
        assert!(!can_form("zzz", "garden"));
        assert!(!can_form("gardens", "garden"));
    }

    #[test]
    fn duplicate_letters_are_bounded() {
        assert!(can_form("aa", "banana"));
        assert!(can_form("aaa", "banana"));
        assert!(!can_form("aaaa", "banana"));
        assert!(!can_form("egg", "garden"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert!(can_form("RAG", "garden"));
        assert!(can_form("rag", "GARDEN"));
    }

    #[test]
    fn pool_counts() {
        let pool = LetterPool::from_word("Banana");
        assert_eq!(pool.count('a'), 3);
        assert_eq!(pool.count('n'), 2);
        assert_eq!(pool.count('b'), 1);
        assert_eq!(pool.count('z'), 0);
    }

    #[test]
    fn pool_is_reusable() {
        let pool = LetterPool::from_word("garden");
        assert!(pool.can_form("rag"));
        assert!(pool.can_form("rag"));
        assert!(pool.can_form("garden"));
    }

    #[test]
    fn multibyte_letters_are_opaque() {
        assert!(can_form("éa", "éclair"));
        assert!(!can_form("ée", "éclair"));
    }

    fn occurrences(haystack: &str, ch: char) -> usize {
        haystack.chars().filter(|&c| c == ch).count()
    }

    proptest! {
        #[test]
        fn can_form_matches_letter_counts(seed in "[a-f]{6}", word in "[a-h]{0,8}") {
            let expected = word
                .chars()
                .all(|c| occurrences(&word, c) <= occurrences(&seed, c));
            prop_assert_eq!(can_form(&word, &seed), expected);
        }

        #[test]
        fn every_permutation_prefix_is_formable(seed in "[a-z]{6}", take in 0usize..=6) {
            let mut letters: Vec<char> = seed.chars().collect();
            letters.reverse();
            let word: String = letters.into_iter().take(take).collect();
            prop_assert!(can_form(&word, &seed));
        }
    }
}
