//! Round state machine
//!
//! Synchronous core of a round: tiles, word slots, phases, timing counters and
//! the submission pipeline. It has no notion of wall-clock time; the engine
//! feeds it one-second ticks. Phases only move forward:
//! countdown, playing, results.

use chrono::Utc;
use rustc_hash::FxHashSet;
use std::sync::Arc;
use tracing::debug;

use super::RoundError;
use super::validation::{SubmissionError, SubmissionRules};
use crate::config::GameConfig;
use crate::core::{
    LetterPool, LetterTile, RoundContext, RoundGoal, RoundPhase, RoundResult, RoundSetup,
    ScoredWord, SeedWord, TileId,
};
use crate::dictionary::Dictionary;
use crate::scoring::Scorer;

/// Result of submitting the assembled word
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing to submit: empty word or not playing
    Ignored,
    Accepted(ScoredWord),
    Rejected(SubmissionError),
}

/// What a one-second tick did to the round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Tick arrived in a phase that does not count it
    Ignored,
    CountingDown { seconds_left: u32 },
    /// Countdown finished; the round timer should start now
    RoundStarted,
    Running { time_remaining: u32 },
    /// Round timer expired; the round is now in results
    TimeUp,
}

/// Complete state of a single round
#[derive(Debug)]
pub struct RoundState {
    seed: SeedWord,
    letters: LetterPool,
    context: RoundContext,
    goal: RoundGoal,
    config: GameConfig,
    dictionary: Arc<Dictionary>,
    scorer: Scorer,
    tiles: Vec<LetterTile>,
    slots: Vec<Option<TileId>>,
    scored_words: Vec<ScoredWord>,
    submitted: FxHashSet<String>,
    total_score: u32,
    phase: RoundPhase,
    countdown_started: bool,
    time_remaining: u32,
    feedback: Option<String>,
    result: Option<RoundResult>,
}

impl RoundState {
    /// Create a round in its initial countdown phase
    ///
    /// # Errors
    ///
    /// Returns `RoundError` if the config is invalid or the seed word is not
    /// exactly `letter_count` letters. Both are setup bugs; no round is built.
    pub fn new(
        setup: &RoundSetup,
        config: &GameConfig,
        dictionary: Arc<Dictionary>,
    ) -> Result<Self, RoundError> {
        config.validate()?;
        let seed = SeedWord::new(&setup.seed_word, config.letter_count)?;

        let tiles: Vec<LetterTile> = seed
            .letters()
            .iter()
            .enumerate()
            .map(|(hand_index, &letter)| LetterTile::new(letter, hand_index))
            .collect();

        Ok(Self {
            letters: LetterPool::from_letters(seed.letters().iter().copied()),
            seed,
            context: setup.context.clone(),
            goal: setup.goal,
            config: config.clone(),
            dictionary,
            scorer: Scorer::from_config(config),
            slots: vec![None; tiles.len()],
            tiles,
            scored_words: Vec::new(),
            submitted: FxHashSet::default(),
            total_score: 0,
            phase: RoundPhase::Countdown {
                seconds_left: config.countdown_secs,
            },
            countdown_started: false,
            time_remaining: config.round_duration_secs,
            feedback: None,
            result: None,
        })
    }

    #[must_use]
    pub const fn seed(&self) -> &SeedWord {
        &self.seed
    }

    #[must_use]
    pub const fn context(&self) -> &RoundContext {
        &self.context
    }

    #[must_use]
    pub const fn goal(&self) -> RoundGoal {
        self.goal
    }

    #[must_use]
    pub const fn phase(&self) -> RoundPhase {
        self.phase
    }

    #[must_use]
    pub fn tiles(&self) -> &[LetterTile] {
        &self.tiles
    }

    #[must_use]
    pub fn slots(&self) -> &[Option<TileId>] {
        &self.slots
    }

    #[must_use]
    pub fn scored_words(&self) -> &[ScoredWord] {
        &self.scored_words
    }

    #[must_use]
    pub const fn total_score(&self) -> u32 {
        self.total_score
    }

    #[must_use]
    pub const fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    #[must_use]
    pub const fn result(&self) -> Option<&RoundResult> {
        self.result.as_ref()
    }

    fn tile(&self, id: TileId) -> Option<&LetterTile> {
        self.tiles.iter().find(|t| t.id == id)
    }

    fn tile_mut(&mut self, id: TileId) -> Option<&mut LetterTile> {
        self.tiles.iter_mut().find(|t| t.id == id)
    }

    /// The assembled word in slot order, uppercase, gaps skipped
    #[must_use]
    pub fn current_word(&self) -> String {
        self.slots
            .iter()
            .flatten()
            .filter_map(|&id| self.tile(id).map(|t| t.letter))
            .collect()
    }

    #[must_use]
    pub fn current_word_is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Every placed tile sits in exactly one slot and every slot references a placed tile
    #[must_use]
    pub fn slots_consistent(&self) -> bool {
        let mut seen: FxHashSet<TileId> = FxHashSet::default();
        for &id in self.slots.iter().flatten() {
            if !seen.insert(id) || !self.tile(id).is_some_and(|t| t.placed) {
                return false;
            }
        }
        self.tiles
            .iter()
            .filter(|t| t.placed)
            .all(|t| seen.contains(&t.id))
    }

    // Lifecycle

    /// Begin the countdown; only effective once, while counting down
    ///
    /// Returns `true` if the caller should start the one-second clock. A zero
    /// second countdown moves straight to playing.
    pub fn begin_countdown(&mut self) -> bool {
        if self.countdown_started || !matches!(self.phase, RoundPhase::Countdown { .. }) {
            return false;
        }
        self.countdown_started = true;
        if let RoundPhase::Countdown { seconds_left: 0 } = self.phase {
            self.begin_round();
        }
        true
    }

    /// Phases only move forward
    fn advance_phase(&mut self, next: RoundPhase) {
        debug_assert!(
            next.rank() >= self.phase.rank(),
            "phase moved backwards: {:?} -> {next:?}",
            self.phase
        );
        self.phase = next;
    }

    fn begin_round(&mut self) {
        self.advance_phase(RoundPhase::Playing);
        self.time_remaining = self.config.round_duration_secs;
        debug!(seed = %self.seed, duration = self.time_remaining, "round started");
    }

    /// Advance the clock by one second
    pub fn tick(&mut self) -> TickOutcome {
        match self.phase {
            RoundPhase::Countdown { seconds_left } if self.countdown_started => {
                let seconds_left = seconds_left.saturating_sub(1);
                if seconds_left == 0 {
                    self.begin_round();
                    TickOutcome::RoundStarted
                } else {
                    self.advance_phase(RoundPhase::Countdown { seconds_left });
                    TickOutcome::CountingDown { seconds_left }
                }
            }
            RoundPhase::Playing => {
                self.time_remaining = self.time_remaining.saturating_sub(1);
                if self.time_remaining == 0 {
                    self.end_game();
                    TickOutcome::TimeUp
                } else {
                    TickOutcome::Running {
                        time_remaining: self.time_remaining,
                    }
                }
            }
            RoundPhase::Countdown { .. } | RoundPhase::Results => TickOutcome::Ignored,
        }
    }

    /// Move to results and build the final result; irreversible
    ///
    /// Returns the result only on the transition itself, `None` if the round
    /// had already ended.
    pub fn end_game(&mut self) -> Option<RoundResult> {
        if self.phase.is_finished() {
            return None;
        }
        self.advance_phase(RoundPhase::Results);

        let result = RoundResult {
            context: self.context.clone(),
            seed_word: self.seed.text().to_string(),
            scored_words: self.scored_words.clone(),
            total_score: self.total_score,
            completed_at: Utc::now(),
        };
        debug!(
            seed = %self.seed,
            words = result.scored_words.len(),
            total = result.total_score,
            "round finished"
        );
        self.result = Some(result.clone());
        Some(result)
    }

    /// Whether the round's target goal (if any) has been reached
    #[must_use]
    pub fn goal_met(&self) -> bool {
        self.goal.is_met(self.total_score, self.scored_words.len())
    }

    // Tile interaction

    /// Place a hand tile into the first empty slot
    ///
    /// No-op unless playing, or if the tile is unknown, already placed, or all
    /// slots are full. Returns whether anything changed.
    pub fn tap_hand_tile(&mut self, id: TileId) -> bool {
        if !self.phase.is_playing() {
            return false;
        }
        if !self.tile(id).is_some_and(|t| !t.placed) {
            return false;
        }
        let Some(slot) = self.slots.iter().position(Option::is_none) else {
            return false;
        };

        self.slots[slot] = Some(id);
        if let Some(tile) = self.tile_mut(id) {
            tile.placed = true;
        }
        debug_assert!(self.slots_consistent());
        true
    }

    /// Return the tile in `slot_index` to the hand
    ///
    /// Remaining slots are not compacted: removing B from [A, B, C] leaves
    /// [A, _, C].
    pub fn tap_word_slot(&mut self, slot_index: usize) -> bool {
        if !self.phase.is_playing() {
            return false;
        }
        let Some(id) = self.slots.get_mut(slot_index).and_then(Option::take) else {
            return false;
        };

        if let Some(tile) = self.tile_mut(id) {
            tile.placed = false;
        }
        debug_assert!(self.slots_consistent());
        true
    }

    /// Return every placed tile to the hand at once
    pub fn clear_word(&mut self) -> bool {
        if !self.phase.is_playing() {
            return false;
        }
        self.clear_slots()
    }

    fn clear_slots(&mut self) -> bool {
        let mut changed = false;
        for slot in &mut self.slots {
            if slot.take().is_some() {
                changed = true;
            }
        }
        for tile in &mut self.tiles {
            tile.placed = false;
        }
        changed
    }

    // Submission

    /// Validate and score the assembled word
    ///
    /// On success the word is recorded, its points added and the slots cleared.
    /// On failure only the feedback message changes; the tiles stay placed.
    pub fn submit_current_word(&mut self) -> SubmitOutcome {
        if !self.phase.is_playing() || self.current_word_is_empty() {
            return SubmitOutcome::Ignored;
        }

        let candidate = self.current_word();
        let rules = SubmissionRules {
            min_word_length: self.config.min_word_length,
            letters: &self.letters,
            dictionary: &self.dictionary,
        };

        match rules.check(&candidate, &self.submitted) {
            Ok(word) => {
                let points = self.scorer.score_word(&word);
                let scored = ScoredWord::new(&word, points);
                debug!(word = %word, points, "word accepted");

                self.submitted.insert(word);
                self.scored_words.push(scored.clone());
                self.total_score = self.total_score.saturating_add(points);
                self.feedback = Some(format!("+{points} pts"));
                self.clear_slots();
                SubmitOutcome::Accepted(scored)
            }
            Err(err) => {
                debug!(word = %candidate, reason = %err, "word rejected");
                self.feedback = Some(err.to_string());
                SubmitOutcome::Rejected(err)
            }
        }
    }

    pub fn clear_feedback(&mut self) {
        self.feedback = None;
    }
}
