//! Cancellable scheduled tasks
//!
//! Timers never touch round state. They enqueue a message onto the round's
//! command queue through a weak sender, so they cannot keep a discarded round
//! alive, and they are aborted the moment their handle is dropped.

use std::time::Duration;
use tokio::sync::mpsc::WeakSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Handle to a spawned timer; dropping it cancels the timer immediately
#[derive(Debug)]
pub struct ScheduledTask {
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    /// Send `message()` to `target` every `period`, first after one full period
    ///
    /// Stops once the receiver is gone.
    pub fn every<C, F>(period: Duration, target: WeakSender<C>, mut message: F) -> Self
    where
        C: Send + 'static,
        F: FnMut() -> C + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let Some(sender) = target.upgrade() else {
                    break;
                };
                if sender.send(message()).await.is_err() {
                    break;
                }
            }
        });
        Self { handle }
    }

    /// Send `message` to `target` once after `delay`
    pub fn once<C>(delay: Duration, target: WeakSender<C>, message: C) -> Self
    where
        C: Send + 'static,
    {
        let handle = tokio::spawn(async move {
            time::sleep(delay).await;
            if let Some(sender) = target.upgrade() {
                let _ = sender.send(message).await;
            }
        });
        Self { handle }
    }

    pub fn cancel(self) {
        drop(self);
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
