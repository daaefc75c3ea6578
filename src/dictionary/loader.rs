//! Word list loading utilities
//!
//! Turns raw newline-delimited text into normalized dictionary entries.

use std::fs;
use std::io;
use std::path::Path;

/// Normalize newline-delimited text into dictionary entries
///
/// Each line is trimmed and lowercased; empty lines are dropped.
///
/// # Examples
/// ```
/// use anagram_rounds::dictionary::loader::parse_words;
///
/// let words = parse_words("Garden\n  rag \n\nDANGER\n");
/// assert_eq!(words, vec!["garden", "rag", "danger"]);
/// ```
#[must_use]
pub fn parse_words(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_lowercase())
            }
        })
        .collect()
}

/// Read and normalize a word list file
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read or opened.
pub fn read_words<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_words(&content))
}

/// Convert an embedded string slice to dictionary entries
#[must_use]
pub fn words_from_slice(slice: &[&str]) -> Vec<String> {
    slice
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
