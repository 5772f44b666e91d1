//! Ritual submission

use hoss_core::dto::ritual::{RitualInput, RitualStarted, StartRitual};
use reqwest::{Method, StatusCode};
use tracing::{debug, info};

use crate::DemonClient;
use crate::error::{ClientError, Result};

impl DemonClient {
    /// Start a new run of `ritual` with an opaque `input` document
    ///
    /// Issues exactly one request; a failure is returned as-is.
    ///
    /// # Returns
    /// The run identifier assigned by the platform
    ///
    /// # Example
    /// ```no_run
    /// # use hoss_client::{ClientConfig, DemonClient};
    /// # use hoss_core::dto::ritual::RitualInput;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = DemonClient::new(ClientConfig::default())?;
    /// let mut input = RitualInput::new();
    /// input.insert("diagramPath".into(), "/tmp/topology.yaml".into());
    /// let run_id = client.start_ritual("hoss-validate", input).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn start_ritual(&self, ritual: &str, input: RitualInput) -> Result<String> {
        if ritual.is_empty() {
            return Err(ClientError::InvalidRequest(
                "ritual name cannot be empty".to_string(),
            ));
        }

        let url = format!("{}/api/v1/rituals/{}/runs", self.config.base_url, ritual);
        debug!("Starting ritual {} at {}", ritual, url);

        let response = self
            .request(Method::POST, &url)
            .json(&StartRitual { input })
            .send()
            .await?;

        let started: RitualStarted = self
            .handle_response(response, &[StatusCode::OK, StatusCode::CREATED])
            .await?;

        if started.run_id.is_empty() {
            return Err(ClientError::Parse(
                "start response carried an empty runId".to_string(),
            ));
        }

        info!("Ritual {} started as run {}", ritual, started.run_id);
        Ok(started.run_id)
    }
}
