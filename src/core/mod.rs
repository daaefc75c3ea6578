//! Core domain types for anagram rounds
//!
//! Seed words, letter multiset matching and the round data model.
//! Everything here is pure data with no timers or I/O.

mod letters;
mod models;
mod seed;

pub use letters::{LetterPool, can_form};
pub use models::{
    ChallengeInfo, DailyInfo, LetterTile, LevelInfo, RoundContext, RoundGoal, RoundPhase,
    RoundResult, RoundSetup, ScoredWord, TileId,
};
pub use seed::{SeedError, SeedWord};
