//! Run domain types
//!
//! A run is one execution of a ritual on the Demon platform. Runs are
//! created and mutated only by the platform; the client observes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::envelope::Envelope;

/// Snapshot of a remote ritual run as reported by `GET /api/v1/runs/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    /// Opaque identifier assigned by the platform
    pub run_id: String,

    /// Server-authoritative status
    pub status: RunStatus,

    /// Ritual this run executes
    #[serde(default)]
    pub ritual: String,

    /// Informational; as sent by the platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Informational; as sent by the platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    /// Envelope inlined by the platform, if it chose to publish one here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub envelope: Option<Envelope>,
}

impl Run {
    /// Creation time, if present and valid RFC 3339
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.created_at.as_deref())
    }

    /// Last update time, if present and valid RFC 3339
    pub fn updated_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.updated_at.as_deref())
    }
}

fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Run status as reported by the platform
///
/// The platform uses two spellings for each terminal outcome
/// (`completed`/`success` and `failed`/`error`). Both are kept as distinct
/// variants since this looks like an upstream inconsistency that should stay
/// visible rather than be normalised away here.
///
/// Any other value is kept verbatim in [`RunStatus::Unrecognized`], which is
/// neither terminal nor non-terminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RunStatus {
    Pending,
    Running,
    Completed,
    Success,
    Failed,
    Error,
    Unrecognized(String),
}

impl RunStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RunStatus::Pending => "pending",
            RunStatus::Running => "running",
            RunStatus::Completed => "completed",
            RunStatus::Success => "success",
            RunStatus::Failed => "failed",
            RunStatus::Error => "error",
            RunStatus::Unrecognized(raw) => raw,
        }
    }

    /// `pending` or `running`: the run may still change
    pub fn is_in_progress(&self) -> bool {
        matches!(self, RunStatus::Pending | RunStatus::Running)
    }

    /// `completed` or `success`
    pub fn is_succeeded(&self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Success)
    }

    /// `failed` or `error`
    pub fn is_failed(&self) -> bool {
        matches!(self, RunStatus::Failed | RunStatus::Error)
    }

    /// Whether no further transitions will occur
    pub fn is_terminal(&self) -> bool {
        self.is_succeeded() || self.is_failed()
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, RunStatus::Unrecognized(_))
    }
}

impl From<&str> for RunStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "pending" => RunStatus::Pending,
            "running" => RunStatus::Running,
            "completed" => RunStatus::Completed,
            "success" => RunStatus::Success,
            "failed" => RunStatus::Failed,
            "error" => RunStatus::Error,
            other => RunStatus::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for RunStatus {
    fn from(raw: String) -> Self {
        match RunStatus::from(raw.as_str()) {
            RunStatus::Unrecognized(_) => RunStatus::Unrecognized(raw),
            known => known,
        }
    }
}

impl From<RunStatus> for String {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
