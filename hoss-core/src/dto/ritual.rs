//! Ritual DTOs for talking to the platform

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::run::RunStatus;

/// Arbitrary input document handed to a ritual
pub type RitualInput = Map<String, Value>;

/// Body of `POST /api/v1/rituals/{ritual}/runs`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartRitual {
    pub input: RitualInput,
}

/// Response to a ritual start request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RitualStarted {
    pub run_id: String,
    #[serde(default)]
    pub status: Option<RunStatus>,
    #[serde(default)]
    pub ritual: Option<String>,
}
