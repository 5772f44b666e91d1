//! Run tracker
//!
//! Polls a run until it reaches a terminal status or a deadline passes, then
//! fetches its envelope.
//!
//! The loop is driven only by the status returned from each query:
//!
//! - `pending` / `running`: sleep for the poll interval, query again
//! - `completed` / `success`: fetch and return the envelope
//! - `failed` / `error`: try to fetch the envelope; return it if served,
//!   otherwise fail with [`ClientError::TerminalFailure`]
//! - anything else: fail with [`ClientError::UnrecognizedStatus`]
//!
//! The deadline is checked before every status query. A query already in
//! flight when it passes is allowed to finish.

use std::time::Duration;

use hoss_core::domain::envelope::Envelope;
use hoss_core::domain::run::RunStatus;
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

use crate::api::RitualApi;
use crate::error::{ClientError, Result};

/// Waits on runs through any [`RitualApi`]
pub struct RunTracker<'a, A: RitualApi + ?Sized> {
    api: &'a A,
    poll_interval: Duration,
}

impl<'a, A: RitualApi + ?Sized> RunTracker<'a, A> {
    /// Creates a tracker polling at a fixed `poll_interval`
    pub fn new(api: &'a A, poll_interval: Duration) -> Self {
        Self { api, poll_interval }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Wait for `run_id` to finish and return its envelope
    ///
    /// Errors from status queries are returned immediately. Nothing is retried.
    /// A timeout too large to represent as an instant means no deadline.
    pub async fn wait_for_completion(&self, run_id: &str, timeout: Duration) -> Result<Envelope> {
        let deadline = Instant::now().checked_add(timeout);
        let mut polls: u32 = 0;

        while deadline.is_none_or(|deadline| Instant::now() < deadline) {
            let run = self.api.get_run_status(run_id).await?;
            polls += 1;

            match run.status {
                RunStatus::Pending | RunStatus::Running => {
                    debug!(
                        "Run {} is {} (poll #{}), next check in {:?}",
                        run_id, run.status, polls, self.poll_interval
                    );
                    time::sleep(self.poll_interval).await;
                }
                RunStatus::Completed | RunStatus::Success => {
                    info!("Run {} {} after {} poll(s)", run_id, run.status, polls);
                    return self.api.get_envelope(run_id).await;
                }
                status @ (RunStatus::Failed | RunStatus::Error) => {
                    info!("Run {} ended with status {}", run_id, status);
                    return match self.api.get_envelope(run_id).await {
                        Ok(envelope) => Ok(envelope),
                        Err(e) => {
                            warn!("No envelope for failed run {}: {}", run_id, e);
                            Err(ClientError::TerminalFailure {
                                status,
                                source: Box::new(e),
                            })
                        }
                    };
                }
                RunStatus::Unrecognized(raw) => {
                    return Err(ClientError::UnrecognizedStatus(raw));
                }
            }
        }

        warn!(
            "Gave up on run {} after {:?} ({} poll(s))",
            run_id, timeout, polls
        );
        Err(ClientError::Timeout(timeout))
    }
}
