//! Result envelope
//!
//! The envelope is the result document a run publishes. Its schema belongs to
//! the ritual; only the top-level `status` field is understood here.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open-ended result document returned by `GET /api/v1/runs/{id}/envelope`
///
/// Must be a JSON object. Every field other than `status` is forwarded
/// verbatim to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Envelope(Map<String, Value>);

impl Envelope {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// The `status` field as a string, if present
    pub fn raw_status(&self) -> Option<&str> {
        self.0.get("status").and_then(Value::as_str)
    }

    /// The `status` field, if present and one of `ok`, `warning`, `error`
    pub fn status(&self) -> Option<EnvelopeStatus> {
        self.raw_status().and_then(EnvelopeStatus::parse)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Envelope {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Outcome reported in an envelope's `status` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Ok,
    Warning,
    Error,
}

impl EnvelopeStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "ok" => Some(EnvelopeStatus::Ok),
            "warning" => Some(EnvelopeStatus::Warning),
            "error" => Some(EnvelopeStatus::Error),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnvelopeStatus::Ok => "ok",
            EnvelopeStatus::Warning => "warning",
            EnvelopeStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for EnvelopeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
