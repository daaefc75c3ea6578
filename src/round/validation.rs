//! Submission validation pipeline
//!
//! Checks run in a fixed order and the first failure wins:
//! length, duplicate, formability, dictionary membership.

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::core::LetterPool;
use crate::dictionary::Dictionary;

/// Why a submitted word was rejected
///
/// The `Display` text is the feedback shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Words must be at least {minimum} letters.")]
    TooShort { minimum: usize },
    #[error("Already submitted this word.")]
    AlreadySubmitted,
    #[error("Can't be made from these letters.")]
    CannotBeFormedFromLetters,
    #[error("Not a valid word.")]
    NotInDictionary,
}

/// Rules a candidate word is checked against during one round
#[derive(Debug, Clone, Copy)]
pub struct SubmissionRules<'a> {
    pub min_word_length: usize,
    pub letters: &'a LetterPool,
    pub dictionary: &'a Dictionary,
}

impl SubmissionRules<'_> {
    /// Validate `candidate`, returning its normalized lowercase form
    ///
    /// # Errors
    ///
    /// Returns the first failing `SubmissionError` in pipeline order.
    pub fn check(
        &self,
        candidate: &str,
        already_submitted: &FxHashSet<String>,
    ) -> Result<String, SubmissionError> {
        let normalized = candidate.to_lowercase();

        if normalized.chars().count() < self.min_word_length {
            return Err(SubmissionError::TooShort {
                minimum: self.min_word_length,
            });
        }

        if already_submitted.contains(&normalized) {
            return Err(SubmissionError::AlreadySubmitted);
        }

        if !self.letters.can_form(&normalized) {
            return Err(SubmissionError::CannotBeFormedFromLetters);
        }

        if !self.dictionary.is_valid(&normalized) {
            return Err(SubmissionError::NotInDictionary);
        }

        Ok(normalized)
    }
}
