//! Result emission
//!
//! A finished non-practice round is handed to a `ResultSink` exactly once.
//! How the sink stores or transmits it is its own business; failures come back
//! as `SinkError` and are reported to the player as a warning only.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::core::RoundResult;

/// Failure reported by a result sink
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("{0}")]
    Rejected(String),
}

/// External collaborator that persists finished rounds
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Persist one finished round
    ///
    /// # Errors
    ///
    /// Returns `SinkError` if the result could not be stored.
    async fn save(&self, result: &RoundResult) -> Result<(), SinkError>;
}

/// Sink that accepts and drops every result
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardSink;

#[async_trait]
impl ResultSink for DiscardSink {
    async fn save(&self, _result: &RoundResult) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Sink that appends each result as one JSON line to a file
#[derive(Debug, Clone)]
pub struct JsonLinesSink {
    path: PathBuf,
}

impl JsonLinesSink {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ResultSink for JsonLinesSink {
    async fn save(&self, result: &RoundResult) -> Result<(), SinkError> {
        let mut line = serde_json::to_vec(result)?;
        line.push(b'\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&line).await?;
        file.flush().await?;
        Ok(())
    }
}
