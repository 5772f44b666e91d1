//! Platform API seam
//!
//! The run tracker is written against [`RitualApi`] rather than the HTTP
//! client directly, so the polling logic can be driven by a scripted fake.

use std::time::Duration;

use async_trait::async_trait;
use hoss_core::domain::envelope::Envelope;
use hoss_core::domain::run::Run;
use hoss_core::dto::ritual::RitualInput;

use crate::DemonClient;
use crate::error::Result;
use crate::tracker::RunTracker;

/// Operations the Demon platform exposes for rituals
#[async_trait]
pub trait RitualApi: Send + Sync {
    /// Starts a run of `ritual` and returns its identifier
    async fn start_ritual(&self, ritual: &str, input: RitualInput) -> Result<String>;

    /// Fetches the current state of a run
    async fn get_run_status(&self, run_id: &str) -> Result<Run>;

    /// Fetches the result envelope of a run
    async fn get_envelope(&self, run_id: &str) -> Result<Envelope>;
}

#[async_trait]
impl RitualApi for DemonClient {
    async fn start_ritual(&self, ritual: &str, input: RitualInput) -> Result<String> {
        DemonClient::start_ritual(self, ritual, input).await
    }

    async fn get_run_status(&self, run_id: &str) -> Result<Run> {
        DemonClient::get_run_status(self, run_id).await
    }

    async fn get_envelope(&self, run_id: &str) -> Result<Envelope> {
        DemonClient::get_envelope(self, run_id).await
    }
}

impl DemonClient {
    /// Wait for a run to reach a terminal state and return its envelope
    ///
    /// Polls at the configured interval. See [`RunTracker::wait_for_completion`].
    pub async fn wait_for_ritual(&self, run_id: &str, timeout: Duration) -> Result<Envelope> {
        RunTracker::new(self, self.config.poll_interval)
            .wait_for_completion(run_id, timeout)
            .await
    }
}
