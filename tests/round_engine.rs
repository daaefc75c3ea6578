//! Time-driven behaviour of `RoundEngine` under tokio's paused clock

use anagram_rounds::config::GameConfig;
use anagram_rounds::core::{LevelInfo, RoundContext, RoundGoal, RoundPhase, RoundResult, RoundSetup};
use anagram_rounds::dictionary::Dictionary;
use anagram_rounds::round::{
    DiscardSink, ResultSink, RoundEngine, RoundError, SinkError, SubmissionError, SubmitOutcome,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::{self, Instant};

#[derive(Default)]
struct CountingSink {
    saved: AtomicUsize,
}

#[async_trait]
impl ResultSink for CountingSink {
    async fn save(&self, _result: &RoundResult) -> Result<(), SinkError> {
        self.saved.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct FailingSink;

#[async_trait]
impl ResultSink for FailingSink {
    async fn save(&self, _result: &RoundResult) -> Result<(), SinkError> {
        Err(SinkError::Rejected("offline".to_string()))
    }
}

fn dictionary() -> Arc<Dictionary> {
    Arc::new(Dictionary::from_words(
        6,
        ["garden", "danger", "ranged", "rag", "den", "end", "an"],
    ))
}

fn level() -> RoundContext {
    RoundContext::Level(LevelInfo {
        number: 1,
        theme: None,
        max_score: None,
        star_thresholds: None,
    })
}

fn spawn(setup: &RoundSetup, sink: Arc<dyn ResultSink>) -> RoundEngine {
    RoundEngine::spawn(setup, &GameConfig::default(), dictionary(), sink).unwrap()
}

async fn wait_until_playing(engine: &RoundEngine) {
    engine
        .subscribe()
        .wait_for(|s| s.phase.is_playing())
        .await
        .unwrap();
}

/// Lay `word` onto free tiles and submit it
async fn play(engine: &RoundEngine, word: &str) -> SubmitOutcome {
    let mut snapshot = engine.clear_word().await.unwrap();
    for letter in word.chars() {
        let tile = snapshot.free_tile(letter).expect("letter available");
        snapshot = engine.tap_hand_tile(tile).await.unwrap();
    }
    engine.submit_current_word().await.unwrap()
}

#[tokio::test(start_paused = true)]
async fn countdown_reaches_playing_after_three_seconds() {
    let engine = spawn(&RoundSetup::practice("garden"), Arc::new(DiscardSink));
    let mut updates = engine.subscribe();
    let started = Instant::now();

    let snapshot = engine.start().await.unwrap();
    assert_eq!(snapshot.phase, RoundPhase::Countdown { seconds_left: 3 });

    updates.wait_for(|s| s.phase.is_playing()).await.unwrap();
    assert_eq!(started.elapsed(), Duration::from_secs(3));
    assert_eq!(engine.snapshot().time_remaining, 60);
}

#[tokio::test(start_paused = true)]
async fn round_ends_when_time_runs_out() {
    let engine = spawn(&RoundSetup::practice("garden"), Arc::new(DiscardSink));
    let started = Instant::now();
    engine.start().await.unwrap();

    let snapshot = engine.wait_for_results().await.unwrap();
    assert_eq!(started.elapsed(), Duration::from_secs(63));
    assert_eq!(snapshot.phase, RoundPhase::Results);
    assert_eq!(snapshot.time_remaining, 0);
    assert!(snapshot.result.is_some());
}

#[tokio::test(start_paused = true)]
async fn second_start_does_not_restart_countdown() {
    let engine = spawn(&RoundSetup::practice("garden"), Arc::new(DiscardSink));
    let started = Instant::now();
    engine.start().await.unwrap();
    time::sleep(Duration::from_millis(1500)).await;

    let snapshot = engine.start().await.unwrap();
    assert_eq!(snapshot.phase, RoundPhase::Countdown { seconds_left: 2 });

    wait_until_playing(&engine).await;
    assert_eq!(started.elapsed(), Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn garden_round_scores_and_rejects() {
    let engine = spawn(&RoundSetup::practice("garden"), Arc::new(DiscardSink));
    engine.start().await.unwrap();
    wait_until_playing(&engine).await;

    let SubmitOutcome::Accepted(rag) = play(&engine, "rag").await else {
        panic!("rag should be accepted");
    };
    assert_eq!((rag.word.as_str(), rag.points), ("rag", 300));

    assert_eq!(
        play(&engine, "rag").await,
        SubmitOutcome::Rejected(SubmissionError::AlreadySubmitted)
    );
    assert_eq!(
        play(&engine, "g").await,
        SubmitOutcome::Rejected(SubmissionError::TooShort { minimum: 2 })
    );
    assert_eq!(
        play(&engine, "dare").await,
        SubmitOutcome::Rejected(SubmissionError::NotInDictionary)
    );
    assert!(matches!(play(&engine, "garden").await, SubmitOutcome::Accepted(_)));

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.total_score, 1800);
    let words: Vec<&str> = snapshot.scored_words.iter().map(|w| w.word.as_str()).collect();
    assert_eq!(words, vec!["rag", "garden"]);
    assert!(snapshot.current_word.is_empty());
}

#[tokio::test(start_paused = true)]
async fn submit_before_playing_is_ignored() {
    let engine = spawn(&RoundSetup::practice("garden"), Arc::new(DiscardSink));
    engine.start().await.unwrap();
    assert_eq!(
        engine.submit_current_word().await.unwrap(),
        SubmitOutcome::Ignored
    );
}

#[tokio::test(start_paused = true)]
async fn feedback_clears_after_display_duration() {
    let engine = spawn(&RoundSetup::practice("garden"), Arc::new(DiscardSink));
    engine.start().await.unwrap();
    wait_until_playing(&engine).await;

    play(&engine, "den").await;
    assert_eq!(engine.snapshot().feedback.as_deref(), Some("+300 pts"));
    let shown = Instant::now();

    engine
        .subscribe()
        .wait_for(|s| s.feedback.is_none())
        .await
        .unwrap();
    assert_eq!(shown.elapsed(), Duration::from_millis(1500));
}

#[tokio::test(start_paused = true)]
async fn newer_feedback_is_not_cleared_early() {
    let engine = spawn(&RoundSetup::practice("garden"), Arc::new(DiscardSink));
    engine.start().await.unwrap();
    wait_until_playing(&engine).await;

    play(&engine, "den").await;
    time::sleep(Duration::from_millis(1000)).await;
    play(&engine, "den").await;
    assert_eq!(
        engine.snapshot().feedback.as_deref(),
        Some("Already submitted this word.")
    );

    time::sleep(Duration::from_millis(1000)).await;
    assert!(engine.snapshot().feedback.is_some());
}

#[tokio::test(start_paused = true)]
async fn level_result_is_saved_exactly_once() {
    let sink = Arc::new(CountingSink::default());
    let engine = spawn(&RoundSetup::new("garden", level()), sink.clone());
    engine.start().await.unwrap();
    wait_until_playing(&engine).await;
    play(&engine, "garden").await;

    engine.end_game().await.unwrap();
    engine.end_game().await.unwrap();
    let snapshot = engine.wait_for_results().await.unwrap();

    assert_eq!(sink.saved.load(Ordering::SeqCst), 1);
    assert!(snapshot.result_save_error.is_none());
    assert_eq!(snapshot.result.unwrap().total_score, 1500);
}

#[tokio::test(start_paused = true)]
async fn practice_result_is_never_saved() {
    let sink = Arc::new(CountingSink::default());
    let engine = spawn(&RoundSetup::practice("garden"), sink.clone());
    engine.start().await.unwrap();
    engine.end_game().await.unwrap();

    let snapshot = engine.wait_for_results().await.unwrap();
    assert!(!snapshot.is_submitting_result);
    assert_eq!(sink.saved.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn failed_save_is_reported() {
    let engine = spawn(&RoundSetup::new("garden", level()), Arc::new(FailingSink));
    engine.start().await.unwrap();
    engine.end_game().await.unwrap();

    let snapshot = engine.wait_for_results().await.unwrap();
    assert_eq!(
        snapshot.result_save_error.as_deref(),
        Some("Failed to save result: offline")
    );
    assert_eq!(snapshot.phase, RoundPhase::Results);
}

#[tokio::test(start_paused = true)]
async fn target_goal_ends_round_early() {
    let sink = Arc::new(CountingSink::default());
    let setup = RoundSetup::new("garden", level()).with_goal(RoundGoal::TargetWordCount(2));
    let engine = spawn(&setup, sink.clone());
    engine.start().await.unwrap();
    wait_until_playing(&engine).await;

    play(&engine, "an").await;
    assert!(engine.snapshot().phase.is_playing());
    play(&engine, "end").await;

    let snapshot = engine.wait_for_results().await.unwrap();
    assert_eq!(snapshot.scored_words.len(), 2);
    assert!(snapshot.time_remaining > 0);
    assert_eq!(sink.saved.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn dropping_engine_stops_the_round() {
    let engine = spawn(&RoundSetup::practice("garden"), Arc::new(DiscardSink));
    engine.start().await.unwrap();
    let mut updates = engine.subscribe();
    drop(engine);

    let closed = time::timeout(Duration::from_secs(120), async {
        while updates.changed().await.is_ok() {}
    })
    .await;
    assert!(closed.is_ok());
    assert!(!updates.borrow().phase.is_finished());
}

#[test]
fn spawn_requires_runtime() {
    let result = RoundEngine::spawn(
        &RoundSetup::practice("garden"),
        &GameConfig::default(),
        dictionary(),
        Arc::new(DiscardSink),
    );
    assert!(matches!(result, Err(RoundError::NoRuntime)));
}

#[tokio::test]
async fn invalid_seed_is_rejected() {
    let result = RoundEngine::spawn(
        &RoundSetup::practice("rag"),
        &GameConfig::default(),
        dictionary(),
        Arc::new(DiscardSink),
    );
    assert!(matches!(result, Err(RoundError::Seed(_))));
}
