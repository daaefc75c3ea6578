//! Round engine actor
//!
//! One tokio task owns a `RoundState` and applies commands strictly one at a
//! time: player actions, clock ticks, feedback expiry and save completion all
//! arrive on the same queue. After each command the new `RoundSnapshot` is
//! published on a watch channel before the next command is taken.
//!
//! Dropping every `RoundEngine` handle closes the queue; the actor then exits
//! and its timers are aborted with it.

use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use super::RoundError;
use super::emission::{ResultSink, SinkError};
use super::state::{RoundState, SubmitOutcome, TickOutcome};
use super::timer::ScheduledTask;
use crate::config::GameConfig;
use crate::core::{LetterTile, RoundPhase, RoundResult, RoundSetup, ScoredWord, TileId};
use crate::dictionary::Dictionary;

const COMMAND_QUEUE: usize = 64;
const TICK: Duration = Duration::from_secs(1);

/// Observable state of a round after the latest command
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSnapshot {
    /// Uppercase seed word
    pub seed: String,
    pub phase: RoundPhase,
    pub time_remaining: u32,
    pub tiles: Vec<LetterTile>,
    pub slots: Vec<Option<TileId>>,
    /// Assembled word in slot order
    pub current_word: String,
    pub scored_words: Vec<ScoredWord>,
    pub total_score: u32,
    pub feedback: Option<String>,
    pub is_submitting_result: bool,
    /// Non-fatal warning when the result could not be saved
    pub result_save_error: Option<String>,
    pub result: Option<RoundResult>,
}

#[derive(Debug, Clone, Default)]
struct SaveStatus {
    in_progress: bool,
    error: Option<String>,
}

impl RoundSnapshot {
    fn capture(state: &RoundState, save: &SaveStatus) -> Self {
        Self {
            seed: state.seed().display(),
            phase: state.phase(),
            time_remaining: state.time_remaining(),
            tiles: state.tiles().to_vec(),
            slots: state.slots().to_vec(),
            current_word: state.current_word(),
            scored_words: state.scored_words().to_vec(),
            total_score: state.total_score(),
            feedback: state.feedback().map(str::to_string),
            is_submitting_result: save.in_progress,
            result_save_error: save.error.clone(),
            result: state.result().cloned(),
        }
    }

    /// First unplaced hand tile showing `letter`, case-insensitive
    #[must_use]
    pub fn free_tile(&self, letter: char) -> Option<TileId> {
        self.tiles
            .iter()
            .filter(|t| !t.placed)
            .find(|t| t.letter.to_lowercase().eq(letter.to_lowercase()))
            .map(|t| t.id)
    }
}

#[derive(Debug, Clone, Copy)]
enum PlayerAction {
    Start,
    TapHandTile(TileId),
    TapWordSlot(usize),
    ClearWord,
    Submit,
    EndGame,
}

struct Reply {
    outcome: SubmitOutcome,
    snapshot: RoundSnapshot,
}

enum Command {
    Player {
        action: PlayerAction,
        reply: oneshot::Sender<Reply>,
    },
    Tick {
        epoch: u64,
    },
    ClearFeedback {
        epoch: u64,
    },
    SaveFinished(Result<(), SinkError>),
}

struct RoundActor {
    state: RoundState,
    commands: mpsc::Receiver<Command>,
    weak: mpsc::WeakSender<Command>,
    published: watch::Sender<RoundSnapshot>,
    sink: Arc<dyn ResultSink>,
    save: SaveStatus,
    emitted: bool,
    clock: Option<ScheduledTask>,
    clock_epoch: u64,
    feedback_timer: Option<ScheduledTask>,
    feedback_epoch: u64,
    feedback_duration: Duration,
}

impl RoundActor {
    async fn run(mut self) {
        while let Some(command) = self.commands.recv().await {
            self.handle(command);
        }
        debug!(seed = %self.state.seed(), "round engine stopped");
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Player { action, reply } => {
                let outcome = self.apply(action);
                self.publish();
                let _ = reply.send(Reply {
                    outcome,
                    snapshot: self.published.borrow().clone(),
                });
                return;
            }
            Command::Tick { epoch } if epoch == self.clock_epoch => self.on_tick(),
            Command::ClearFeedback { epoch } if epoch == self.feedback_epoch => {
                self.state.clear_feedback();
            }
            Command::SaveFinished(outcome) => self.on_save_finished(outcome),
            // Queued by a timer that has since been replaced
            Command::Tick { .. } | Command::ClearFeedback { .. } => return,
        }
        self.publish();
    }

    fn apply(&mut self, action: PlayerAction) -> SubmitOutcome {
        match action {
            PlayerAction::Start => {
                if self.state.begin_countdown() {
                    self.start_clock();
                }
            }
            PlayerAction::TapHandTile(id) => {
                self.state.tap_hand_tile(id);
            }
            PlayerAction::TapWordSlot(index) => {
                self.state.tap_word_slot(index);
            }
            PlayerAction::ClearWord => {
                self.state.clear_word();
            }
            PlayerAction::Submit => {
                let outcome = self.state.submit_current_word();
                if outcome != SubmitOutcome::Ignored {
                    self.schedule_feedback_clear();
                }
                if matches!(outcome, SubmitOutcome::Accepted(_)) && self.state.goal_met() {
                    info!(goal = ?self.state.goal(), "round goal reached");
                    self.finish();
                }
                return outcome;
            }
            PlayerAction::EndGame => self.finish(),
        }
        SubmitOutcome::Ignored
    }

    fn on_tick(&mut self) {
        match self.state.tick() {
            TickOutcome::RoundStarted => self.start_clock(),
            TickOutcome::TimeUp => self.finish(),
            TickOutcome::Ignored
            | TickOutcome::CountingDown { .. }
            | TickOutcome::Running { .. } => {}
        }
    }

    /// Replace the one-second clock; the old one is aborted on drop
    fn start_clock(&mut self) {
        self.clock_epoch += 1;
        let epoch = self.clock_epoch;
        self.clock = Some(ScheduledTask::every(TICK, self.weak.clone(), move || {
            Command::Tick { epoch }
        }));
    }

    fn schedule_feedback_clear(&mut self) {
        self.feedback_epoch += 1;
        self.feedback_timer = Some(ScheduledTask::once(
            self.feedback_duration,
            self.weak.clone(),
            Command::ClearFeedback {
                epoch: self.feedback_epoch,
            },
        ));
    }

    fn finish(&mut self) {
        self.clock = None;
        self.state.end_game();
        if self.emitted {
            return;
        }
        if let Some(result) = self.state.result().cloned() {
            self.emitted = true;
            self.emit(result);
        }
    }

    fn emit(&mut self, result: RoundResult) {
        if !result.context.can_save_result() {
            debug!("practice round, result not saved");
            return;
        }

        self.save = SaveStatus {
            in_progress: true,
            error: None,
        };
        let sink = Arc::clone(&self.sink);
        let weak = self.weak.clone();
        tokio::spawn(async move {
            let outcome = sink.save(&result).await;
            if let Some(sender) = weak.upgrade() {
                let _ = sender.send(Command::SaveFinished(outcome)).await;
            }
        });
    }

    fn on_save_finished(&mut self, outcome: Result<(), SinkError>) {
        self.save.in_progress = false;
        match outcome {
            Ok(()) => info!(context = self.state.context().label(), "round result saved"),
            Err(err) => {
                warn!(%err, "failed to save round result");
                self.save.error = Some(format!("Failed to save result: {err}"));
            }
        }
    }

    fn publish(&self) {
        self.published
            .send_replace(RoundSnapshot::capture(&self.state, &self.save));
    }
}

/// Handle to a running round
///
/// Cheap to clone. The round is discarded, timers included, when the last
/// handle is dropped.
#[derive(Debug, Clone)]
pub struct RoundEngine {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<RoundSnapshot>,
}

impl RoundEngine {
    /// Build a round and spawn its actor on the current tokio runtime
    ///
    /// # Errors
    ///
    /// Returns `RoundError` if the setup or config is invalid, or if called
    /// outside a tokio runtime.
    pub fn spawn(
        setup: &RoundSetup,
        config: &GameConfig,
        dictionary: Arc<Dictionary>,
        sink: Arc<dyn ResultSink>,
    ) -> Result<Self, RoundError> {
        let runtime = Handle::try_current().map_err(|_| RoundError::NoRuntime)?;
        let state = RoundState::new(setup, config, dictionary)?;

        let (tx, rx) = mpsc::channel(COMMAND_QUEUE);
        let save = SaveStatus::default();
        let (published, snapshots) = watch::channel(RoundSnapshot::capture(&state, &save));

        let actor = RoundActor {
            state,
            commands: rx,
            weak: tx.downgrade(),
            published,
            sink,
            save,
            emitted: false,
            clock: None,
            clock_epoch: 0,
            feedback_timer: None,
            feedback_epoch: 0,
            feedback_duration: config.feedback_duration(),
        };
        runtime.spawn(actor.run());

        Ok(Self {
            commands: tx,
            snapshots,
        })
    }

    async fn request(&self, action: PlayerAction) -> Result<Reply, RoundError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command::Player { action, reply })
            .await
            .map_err(|_| RoundError::Closed)?;
        response.await.map_err(|_| RoundError::Closed)
    }

    /// Start the countdown; ignored unless the round is still counting down
    ///
    /// # Errors
    ///
    /// Returns `RoundError::Closed` if the round actor is gone.
    pub async fn start(&self) -> Result<RoundSnapshot, RoundError> {
        Ok(self.request(PlayerAction::Start).await?.snapshot)
    }

    /// Place a hand tile into the first empty slot
    ///
    /// # Errors
    ///
    /// Returns `RoundError::Closed` if the round actor is gone.
    pub async fn tap_hand_tile(&self, id: TileId) -> Result<RoundSnapshot, RoundError> {
        Ok(self.request(PlayerAction::TapHandTile(id)).await?.snapshot)
    }

    /// Return a slot's tile to the hand without compacting the word
    ///
    /// # Errors
    ///
    /// Returns `RoundError::Closed` if the round actor is gone.
    pub async fn tap_word_slot(&self, slot_index: usize) -> Result<RoundSnapshot, RoundError> {
        Ok(self
            .request(PlayerAction::TapWordSlot(slot_index))
            .await?
            .snapshot)
    }

    /// # Errors
    ///
    /// Returns `RoundError::Closed` if the round actor is gone.
    pub async fn clear_word(&self) -> Result<RoundSnapshot, RoundError> {
        Ok(self.request(PlayerAction::ClearWord).await?.snapshot)
    }

    /// Validate, score and record the assembled word
    ///
    /// # Errors
    ///
    /// Returns `RoundError::Closed` if the round actor is gone.
    pub async fn submit_current_word(&self) -> Result<SubmitOutcome, RoundError> {
        Ok(self.request(PlayerAction::Submit).await?.outcome)
    }

    /// End the round now; irreversible
    ///
    /// # Errors
    ///
    /// Returns `RoundError::Closed` if the round actor is gone.
    pub async fn end_game(&self) -> Result<RoundSnapshot, RoundError> {
        Ok(self.request(PlayerAction::EndGame).await?.snapshot)
    }

    #[must_use]
    pub fn snapshot(&self) -> RoundSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified after every state change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RoundSnapshot> {
        self.snapshots.clone()
    }

    /// Wait until the round has reached results and any save attempt has finished
    ///
    /// # Errors
    ///
    /// Returns `RoundError::Closed` if the round actor is gone first.
    pub async fn wait_for_results(&self) -> Result<RoundSnapshot, RoundError> {
        let mut snapshots = self.snapshots.clone();
        let snapshot = snapshots
            .wait_for(|s| s.phase.is_finished() && !s.is_submitting_result)
            .await
            .map_err(|_| RoundError::Closed)?
            .clone();
        Ok(snapshot)
    }
}
