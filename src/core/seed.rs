//! Seed word representation
//!
//! A `SeedWord` is the fixed letter multiset for a round. It is validated once at
//! construction so the round engine never has to re-check its length.

use std::fmt;
use thiserror::Error;

/// The letters available for a whole round, stored lowercase
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeedWord {
    text: String,
    letters: Vec<char>,
}

/// Error type for invalid seed words
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    #[error("Seed word must be exactly {expected} letters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("Seed word must contain only letters")]
    InvalidCharacters,
}

impl SeedWord {
    /// Create a seed word of exactly `letter_count` letters
    ///
    /// Input is trimmed and lowercased; length is counted in characters.
    ///
    /// # Errors
    /// Returns `SeedError` if:
    /// - Length is not exactly `letter_count`
    /// - Contains non-alphabetic characters
    ///
    /// # Examples
    /// ```
    /// use anagram_rounds::core::SeedWord;
    ///
    /// let seed = SeedWord::new("GARDEN", 6).unwrap();
    /// assert_eq!(seed.text(), "garden");
    /// assert_eq!(seed.display(), "GARDEN");
    ///
    /// assert!(SeedWord::new("toolong", 6).is_err());
    /// assert!(SeedWord::new("gard3n", 6).is_err());
    /// ```
    pub fn new(text: &str, letter_count: usize) -> Result<Self, SeedError> {
        let text = text.trim().to_lowercase();
        let letters: Vec<char> = text.chars().collect();

        if letters.len() != letter_count {
            return Err(SeedError::InvalidLength {
                expected: letter_count,
                actual: letters.len(),
            });
        }

        if !letters.iter().all(|c| c.is_alphabetic()) {
            return Err(SeedError::InvalidCharacters);
        }

        Ok(Self { text, letters })
    }

    /// Lowercase text used for comparisons
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Uppercase text used for display
    #[must_use]
    pub fn display(&self) -> String {
        self.text.to_uppercase()
    }

    /// Lowercase letters in seed order, duplicates included
    #[inline]
    #[must_use]
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// Number of letters in the seed
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }
}

impl fmt::Display for SeedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
