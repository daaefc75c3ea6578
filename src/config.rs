//! Game configuration
//!
//! Every tunable of the round engine lives here so it can be overridden
//! without touching engine logic. Loaded from a JSON file; missing fields
//! fall back to the defaults below.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::scoring::{BonusPolicy, ScoringTable, StarThresholds};

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Tunable game rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Length of a round once play starts
    pub round_duration_secs: u32,
    /// Countdown shown before play starts
    pub countdown_secs: u32,
    /// Seed word length, also the number of tiles and slots
    pub letter_count: usize,
    /// Shortest word accepted for submission
    pub min_word_length: usize,
    pub scoring: ScoringTable,
    pub star_thresholds: StarThresholds,
    pub bonus_policy: BonusPolicy,
    /// How long a feedback message stays visible
    pub feedback_duration_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_duration_secs: 60,
            countdown_secs: 3,
            letter_count: 6,
            min_word_length: 2,
            scoring: ScoringTable::default(),
            star_thresholds: StarThresholds::default(),
            bonus_policy: BonusPolicy::default(),
            feedback_duration_ms: 1500,
        }
    }
}

impl GameConfig {
    /// Load and validate a JSON config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, is not valid JSON for
    /// this shape, or fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse and validate config from a JSON string
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` on malformed JSON or invalid values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants the engine relies on
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` describing the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.letter_count == 0 {
            return Err(ConfigError::Invalid(
                "letter_count must be at least 1".to_string(),
            ));
        }
        if self.min_word_length == 0 || self.min_word_length > self.letter_count {
            return Err(ConfigError::Invalid(format!(
                "min_word_length must be between 1 and {}, got {}",
                self.letter_count, self.min_word_length
            )));
        }
        if self.round_duration_secs == 0 {
            return Err(ConfigError::Invalid(
                "round_duration_secs must be at least 1".to_string(),
            ));
        }
        for (star, threshold) in self.star_thresholds.iter() {
            if !(1..=3).contains(&star) {
                return Err(ConfigError::Invalid(format!(
                    "star_thresholds keys must be 1..=3, got {star}"
                )));
            }
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ConfigError::Invalid(format!(
                    "star {star} threshold must be within 0..=1, got {threshold}"
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn feedback_duration(&self) -> Duration {
        Duration::from_millis(self.feedback_duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.letter_count, 6);
        assert_eq!(config.min_word_length, 2);
        assert_eq!(config.round_duration_secs, 60);
        assert_eq!(config.countdown_secs, 3);
        assert_eq!(config.feedback_duration(), Duration::from_millis(1500));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = GameConfig::from_json(r#"{ "round_duration_secs": 90 }"#).unwrap();
        assert_eq!(config.round_duration_secs, 90);
        assert_eq!(config.letter_count, 6);
        assert_eq!(config.scoring, ScoringTable::default());
    }

    #[test]
    fn scoring_table_from_json() {
        let config = GameConfig::from_json(
            r#"{ "scoring": { "2": 10, "3": 20 }, "bonus_policy": "themed" }"#,
        )
        .unwrap();
        assert_eq!(config.scoring.points(2), 10);
        assert_eq!(config.scoring.points(3), 20);
        assert_eq!(config.scoring.points(6), 0);
        assert_eq!(config.bonus_policy, BonusPolicy::Themed);
    }

    #[test]
    fn rejects_min_length_above_letter_count() {
        let err = GameConfig::from_json(r#"{ "letter_count": 4, "min_word_length": 5 }"#);
        assert!(matches!(err, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let err = GameConfig::from_json(r#"{ "star_thresholds": { "1": 1.5 } }"#);
        assert!(matches!(err, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "countdown_secs": 5 }}"#).unwrap();
        let config = GameConfig::from_file(file.path()).unwrap();
        assert_eq!(config.countdown_secs, 5);
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            GameConfig::from_file("/definitely/not/here.json"),
            Err(ConfigError::Io { .. })
        ));
    }
}
