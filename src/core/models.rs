//! Round data model
//!
//! Tiles, scored words, phases, round contexts and the finished-round result.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::scoring::StarThresholds;

/// Opaque unique identifier of a hand tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileId(Uuid);

impl TileId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TileId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single letter tile in the player's hand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterTile {
    pub id: TileId,
    /// Uppercase display letter
    pub letter: char,
    /// Fixed home position in the hand row; never changes
    pub hand_index: usize,
    /// Whether the tile currently sits in a word slot
    pub placed: bool,
}

impl LetterTile {
    #[must_use]
    pub fn new(letter: char, hand_index: usize) -> Self {
        Self {
            id: TileId::new(),
            letter: letter.to_uppercase().next().unwrap_or(letter),
            hand_index,
            placed: false,
        }
    }
}

/// A validated word and the points it earned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredWord {
    pub id: Uuid,
    /// Lowercase word text
    pub word: String,
    pub points: u32,
}

impl ScoredWord {
    #[must_use]
    pub fn new(word: &str, points: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            word: word.to_lowercase(),
            points,
        }
    }
}

/// Round lifecycle, strictly forward: countdown, playing, results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    Countdown { seconds_left: u32 },
    Playing,
    Results,
}

impl RoundPhase {
    /// Ordinal used to assert forward-only transitions
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Countdown { .. } => 0,
            Self::Playing => 1,
            Self::Results => 2,
        }
    }

    #[must_use]
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Results)
    }
}

/// A scripted singleplayer level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelInfo {
    pub number: u32,
    /// Themed levels award the bonus star only for the exact seed word
    pub theme: Option<String>,
    pub max_score: Option<u32>,
    pub star_thresholds: Option<StarThresholds>,
}

/// A challenge round against an opponent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeInfo {
    pub match_id: Uuid,
}

/// A scheduled daily challenge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyInfo {
    pub challenge_id: Uuid,
    pub date: NaiveDate,
    pub max_score: Option<u32>,
}

/// What kind of round is being played and how its result is handled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoundContext {
    Practice,
    Level(LevelInfo),
    Challenge(ChallengeInfo),
    Daily(DailyInfo),
}

impl RoundContext {
    /// Practice rounds are never persisted
    #[must_use]
    pub const fn can_save_result(&self) -> bool {
        !matches!(self, Self::Practice)
    }

    #[must_use]
    pub fn is_themed(&self) -> bool {
        matches!(self, Self::Level(level) if level.theme.is_some())
    }

    /// Precomputed maximum score, when the context carries one
    #[must_use]
    pub fn max_score(&self) -> Option<u32> {
        match self {
            Self::Level(level) => level.max_score,
            Self::Daily(daily) => daily.max_score,
            Self::Practice | Self::Challenge(_) => None,
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Practice => "practice",
            Self::Level(_) => "level",
            Self::Challenge(_) => "challenge",
            Self::Daily(_) => "daily",
        }
    }
}

/// Optional early-finish condition; the round timer always runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundGoal {
    #[default]
    TimeLimit,
    TargetScore(u32),
    TargetWordCount(usize),
}

impl RoundGoal {
    /// Whether the goal has been reached with the given progress
    #[must_use]
    pub const fn is_met(self, total_score: u32, word_count: usize) -> bool {
        match self {
            Self::TimeLimit => false,
            Self::TargetScore(target) => total_score >= target,
            Self::TargetWordCount(target) => word_count >= target,
        }
    }
}

/// Everything needed to create a round
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSetup {
    pub seed_word: String,
    pub context: RoundContext,
    pub goal: RoundGoal,
}

impl RoundSetup {
    #[must_use]
    pub fn new(seed_word: impl Into<String>, context: RoundContext) -> Self {
        Self {
            seed_word: seed_word.into(),
            context,
            goal: RoundGoal::default(),
        }
    }

    #[must_use]
    pub fn practice(seed_word: impl Into<String>) -> Self {
        Self::new(seed_word, RoundContext::Practice)
    }

    #[must_use]
    pub const fn with_goal(mut self, goal: RoundGoal) -> Self {
        self.goal = goal;
        self
    }
}

/// The finished round handed to a result sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub context: RoundContext,
    /// Lowercase seed word
    pub seed_word: String,
    pub scored_words: Vec<ScoredWord>,
    pub total_score: u32,
    pub completed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_letter_is_uppercase() {
        let tile = LetterTile::new('g', 0);
        assert_eq!(tile.letter, 'G');
        assert!(!tile.placed);
    }

    #[test]
    fn tile_ids_are_unique() {
        let a = LetterTile::new('a', 0);
        let b = LetterTile::new('a', 1);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn scored_word_is_lowercase() {
        let word = ScoredWord::new("RAG", 300);
        assert_eq!(word.word, "rag");
        assert_eq!(word.points, 300);
    }

    #[test]
    fn phase_ranks_are_ordered() {
        assert!(RoundPhase::Countdown { seconds_left: 3 }.rank() < RoundPhase::Playing.rank());
        assert!(RoundPhase::Playing.rank() < RoundPhase::Results.rank());
    }

    #[test]
    fn only_practice_skips_saving() {
        assert!(!RoundContext::Practice.can_save_result());
        assert!(
            RoundContext::Challenge(ChallengeInfo {
                match_id: Uuid::new_v4()
            })
            .can_save_result()
        );
    }

    #[test]
    fn themed_levels() {
        let themed = RoundContext::Level(LevelInfo {
            number: 4,
            theme: Some("Gardening".to_string()),
            max_score: Some(9000),
            star_thresholds: None,
        });
        assert!(themed.is_themed());
        assert_eq!(themed.max_score(), Some(9000));
        assert!(!RoundContext::Practice.is_themed());
    }

    #[test]
    fn goals() {
        assert!(!RoundGoal::TimeLimit.is_met(u32::MAX, usize::MAX));
        assert!(RoundGoal::TargetScore(1000).is_met(1000, 0));
        assert!(!RoundGoal::TargetScore(1000).is_met(999, 10));
        assert!(RoundGoal::TargetWordCount(3).is_met(0, 3));
    }

    #[test]
    fn result_serializes_with_context_tag() {
        let result = RoundResult {
            context: RoundContext::Practice,
            seed_word: "garden".to_string(),
            scored_words: vec![ScoredWord::new("rag", 300)],
            total_score: 300,
            completed_at: Utc::now(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["context"]["kind"], "practice");
        assert_eq!(json["total_score"], 300);
        assert_eq!(json["scored_words"][0]["word"], "rag");
    }
}
