//! Round engine
//!
//! The synchronous `RoundState` holds the rules; `RoundEngine` runs it as a
//! single serialized actor with its countdown, round and feedback timers.

mod emission;
mod engine;
mod state;
mod timer;
mod validation;

pub use emission::{DiscardSink, JsonLinesSink, ResultSink, SinkError};
pub use engine::{RoundEngine, RoundSnapshot};
pub use state::{RoundState, SubmitOutcome, TickOutcome};
pub use timer::ScheduledTask;
pub use validation::{SubmissionError, SubmissionRules};

use thiserror::Error;

use crate::config::ConfigError;
use crate::core::SeedError;

/// Errors raised while creating or driving a round
#[derive(Debug, Error)]
pub enum RoundError {
    #[error(transparent)]
    Seed(#[from] SeedError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Round engine requires a running tokio runtime")]
    NoRuntime,
    #[error("Round has already been shut down")]
    Closed,
}
