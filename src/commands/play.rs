//! Interactive terminal round
//!
//! Drives a `RoundEngine` from stdin: typed words are laid onto the hand tiles
//! letter by letter and then submitted, so every play goes through the same
//! tap and submit operations a graphical client would use.

use anyhow::{Context, Result};
use colored::Colorize;
use rustc_hash::FxHashSet;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use tokio::sync::mpsc;
use tracing::warn;

use crate::config::GameConfig;
use crate::core::{LetterPool, RoundContext, RoundGoal, RoundPhase, RoundSetup, ScoredWord};
use crate::dictionary::Dictionary;
use crate::output::{print_board, print_round_summary};
use crate::round::{
    DiscardSink, JsonLinesSink, ResultSink, RoundEngine, RoundSnapshot, SubmissionError,
    SubmitOutcome,
};
use crate::scoring::Scorer;

/// Options for an interactive round
pub struct PlayConfig {
    /// Seed word; a random dictionary word when absent
    pub seed: Option<String>,
    pub context: RoundContext,
    pub goal: RoundGoal,
    /// Append saved results to this JSON lines file
    pub results: Option<PathBuf>,
}

enum Flow {
    Continue,
    Stop,
}

/// Read stdin lines on a detached thread
///
/// Blocking reads stay off the runtime, so an idle prompt never holds up
/// shutdown once the round is over.
fn spawn_line_reader() -> mpsc::Receiver<io::Result<String>> {
    let (tx, rx) = mpsc::channel(16);
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Why a typed word cannot be laid onto the hand, in submission rule order
///
/// `None` when every letter has a tile; the engine then judges the word.
/// A word already submitted was formable, so it always reaches the engine.
#[must_use]
fn unplayable_reason(
    word: &str,
    snapshot: &RoundSnapshot,
    min_word_length: usize,
) -> Option<SubmissionError> {
    let hand = LetterPool::from_letters(snapshot.tiles.iter().map(|t| t.letter));
    if hand.can_form(word) {
        return None;
    }
    if word.chars().count() < min_word_length {
        return Some(SubmissionError::TooShort {
            minimum: min_word_length,
        });
    }
    Some(SubmissionError::CannotBeFormedFromLetters)
}

/// Formable words the player did not find, longest first
#[must_use]
pub fn missed_words(
    dictionary: &Dictionary,
    seed: &str,
    min_word_length: usize,
    found: &[ScoredWord],
) -> Vec<String> {
    let found: FxHashSet<&str> = found.iter().map(|w| w.word.as_str()).collect();
    dictionary
        .formable_words(seed, min_word_length)
        .into_iter()
        .filter(|w| !found.contains(w.as_str()))
        .collect()
}

/// Play one round in the terminal
///
/// Returns the final snapshot once results are in and any save has finished.
///
/// # Errors
///
/// Returns an error if no seed word is available, the round cannot be built,
/// or stdin fails.
pub async fn run_play(
    options: PlayConfig,
    dictionary: Arc<Dictionary>,
    config: &GameConfig,
) -> Result<RoundSnapshot> {
    let seed = match options.seed {
        Some(seed) => seed,
        None => dictionary
            .random_word(config.letter_count)
            .with_context(|| format!("no {}-letter words in dictionary", config.letter_count))?,
    };

    let sink: Arc<dyn ResultSink> = match options.results {
        Some(path) => {
            if !options.context.can_save_result() {
                warn!("practice rounds are never saved; ignoring results file");
            }
            Arc::new(JsonLinesSink::new(path))
        }
        None => Arc::new(DiscardSink),
    };

    let setup = RoundSetup::new(seed, options.context).with_goal(options.goal);
    let engine = RoundEngine::spawn(&setup, config, Arc::clone(&dictionary), sink)?;
    let seed_text = setup.seed_word.trim().to_lowercase();
    let max_score = match setup.context.max_score() {
        Some(max) => max,
        None => dictionary.compute_max_score(
            &seed_text,
            &Scorer::from_config(config),
            config.min_word_length,
        ),
    };

    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                      Anagram Round                           ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!("Type a word and press Enter to play it.");
    println!("Commands: ':clear' clears the word, ':hand' shows the board, ':end' finishes\n");

    let mut updates = engine.subscribe();
    let mut last_phase = None;
    let started = engine.start().await?;
    report_progress(&started, &mut last_phase);

    let mut lines = spawn_line_reader();
    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                if report_progress(&snapshot, &mut last_phase) {
                    break;
                }
            }
            line = lines.recv() => {
                let flow = match line {
                    Some(line) => {
                        let line = line.context("reading stdin")?;
                        handle_line(&engine, line.trim(), config.min_word_length).await?
                    }
                    None => Flow::Stop,
                };
                if matches!(flow, Flow::Stop) {
                    engine.end_game().await?;
                    break;
                }
            }
        }
    }

    let snapshot = engine.wait_for_results().await?;
    let rating = snapshot
        .result
        .as_ref()
        .map(|result| Scorer::from_config(config).rate(result, max_score));
    let missed = missed_words(
        &dictionary,
        &seed_text,
        config.min_word_length,
        &snapshot.scored_words,
    );
    print_round_summary(&snapshot, rating, max_score, &missed);
    Ok(snapshot)
}

/// Print phase changes and clock milestones; true once the round is over
fn report_progress(snapshot: &RoundSnapshot, last_phase: &mut Option<RoundPhase>) -> bool {
    let changed = *last_phase != Some(snapshot.phase);
    *last_phase = Some(snapshot.phase);

    match snapshot.phase {
        RoundPhase::Countdown { seconds_left } if changed => {
            println!("{}", format!("{seconds_left}...").bright_yellow().bold());
        }
        RoundPhase::Playing if changed => {
            println!("{}\n", "GO!".green().bold());
            print_board(snapshot);
        }
        RoundPhase::Playing => {
            let t = snapshot.time_remaining;
            if t > 0 && (t % 15 == 0 || t <= 5) {
                println!("{}", format!("⏱ {t}s left").bright_black());
            }
        }
        RoundPhase::Results => return true,
        RoundPhase::Countdown { .. } => {}
    }
    false
}

async fn handle_line(engine: &RoundEngine, input: &str, min_word_length: usize) -> Result<Flow> {
    match input {
        "" => {}
        ":end" | ":quit" | ":q" => return Ok(Flow::Stop),
        ":clear" => {
            engine.clear_word().await?;
        }
        ":hand" => print_board(&engine.snapshot()),
        word => play_word(engine, word, min_word_length).await?,
    }
    Ok(Flow::Continue)
}

async fn play_word(engine: &RoundEngine, word: &str, min_word_length: usize) -> Result<()> {
    if !engine.snapshot().phase.is_playing() {
        println!("{}", "Wait for the round to start.".bright_black());
        return Ok(());
    }

    let mut snapshot = engine.clear_word().await?;
    if let Some(err) = unplayable_reason(word, &snapshot, min_word_length) {
        println!("{}", err.to_string().red());
        return Ok(());
    }
    for letter in word.chars() {
        let Some(tile) = snapshot.free_tile(letter) else {
            break;
        };
        snapshot = engine.tap_hand_tile(tile).await?;
    }

    match engine.submit_current_word().await? {
        SubmitOutcome::Accepted(scored) => println!(
            "{} {}",
            scored.word.to_uppercase().bold(),
            format!("+{} pts", scored.points).green()
        ),
        SubmitOutcome::Rejected(err) => {
            engine.clear_word().await?;
            println!("{}", err.to_string().red());
        }
        SubmitOutcome::Ignored => println!("{}", "The round is over.".bright_black()),
    }
    Ok(())
}
