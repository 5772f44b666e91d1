//! Run status and envelope endpoints

use hoss_core::domain::envelope::Envelope;
use hoss_core::domain::run::Run;
use reqwest::{Method, StatusCode};
use tracing::debug;

use crate::DemonClient;
use crate::error::Result;

impl DemonClient {
    /// Get the current state of a run
    ///
    /// Single request, never retried here.
    pub async fn get_run_status(&self, run_id: &str) -> Result<Run> {
        let url = format!("{}/api/v1/runs/{}", self.config.base_url, run_id);
        let response = self.request(Method::GET, &url).send().await?;

        let run: Run = self.handle_response(response, &[StatusCode::OK]).await?;
        debug!("Run {} is {}", run_id, run.status);
        Ok(run)
    }

    /// Get the result envelope of a run
    ///
    /// Valid whatever the run status; platforms may publish diagnostic
    /// envelopes for failed runs.
    pub async fn get_envelope(&self, run_id: &str) -> Result<Envelope> {
        let url = format!("{}/api/v1/runs/{}/envelope", self.config.base_url, run_id);
        let response = self.request(Method::GET, &url).send().await?;

        self.handle_response(response, &[StatusCode::OK]).await
    }
}
