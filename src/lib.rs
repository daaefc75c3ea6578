//! Anagram Rounds
//!
//! Round engine for a timed anagram game: players get the letters of a seed word
//! and submit as many dictionary words as they can spell from them before time
//! runs out, scoring points by word length.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use anagram_rounds::config::GameConfig;
//! use anagram_rounds::core::RoundSetup;
//! use anagram_rounds::dictionary::Dictionary;
//! use anagram_rounds::round::{DiscardSink, RoundEngine};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = GameConfig::default();
//! let dictionary = Arc::new(Dictionary::new(config.letter_count));
//! dictionary.load_embedded()?;
//!
//! let engine = RoundEngine::spawn(
//!     &RoundSetup::practice("GARDEN"),
//!     &config,
//!     dictionary,
//!     Arc::new(DiscardSink),
//! )?;
//! engine.start().await?;
//! let results = engine.wait_for_results().await?;
//! println!("Scored {}", results.total_score);
//! # Ok(())
//! # }
//! ```

// Core domain types
pub mod core;

// Tunable game rules
pub mod config;

// Word list and queries
pub mod dictionary;

// Points and star ratings
pub mod scoring;

// Round state machine, timers and result emission
pub mod round;

// Daily challenge planning
pub mod schedule;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
