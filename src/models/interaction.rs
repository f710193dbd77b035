use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

use super::RecordId;

/// Confidence above which an answer counts as faithful.
pub const PASS_THRESHOLD: f64 = 0.7;

/// Derived faithfulness indicator stored with every interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    /// Derives the verdict from an answer's confidence (`> 0.7` passes).
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > PASS_THRESHOLD {
            Self::Pass
        } else {
            Self::Fail
        }
    }

    pub fn is_pass(self) -> bool {
        matches!(self, Self::Pass)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => f.pad("PASS"),
            Self::Fail => f.pad("FAIL"),
        }
    }
}

/// One row of the interaction log.
///
/// Field order is the column order of the CSV file. Evidence identifiers are
/// stored as a JSON-encoded array inside a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionLogEntry {
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    #[serde(rename = "user_task_type")]
    pub task_type: String,
    #[serde(rename = "retrieval_conf")]
    pub retrieval_method: String,
    pub latency_ms: f64,
    #[serde(with = "json_list")]
    pub evidence_ids: Vec<RecordId>,
    pub confidence: f64,
    #[serde(rename = "faithfulness_indicator")]
    pub verdict: Verdict,
}

impl InteractionLogEntry {
    /// Builds a log entry, rounding latency to two decimals and deriving
    /// the verdict from `confidence`.
    pub fn new(
        timestamp: OffsetDateTime,
        task_type: impl Into<String>,
        retrieval_method: impl Into<String>,
        latency_ms: f64,
        evidence_ids: Vec<RecordId>,
        confidence: f64,
    ) -> Self {
        Self {
            timestamp,
            task_type: task_type.into(),
            retrieval_method: retrieval_method.into(),
            latency_ms: (latency_ms * 100.0).round() / 100.0,
            evidence_ids,
            confidence,
            verdict: Verdict::from_confidence(confidence),
        }
    }
}

mod json_list {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::models::RecordId;

    pub fn serialize<S: Serializer>(ids: &[RecordId], serializer: S) -> Result<S::Ok, S::Error> {
        let encoded = serde_json::to_string(ids).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&encoded)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<RecordId>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        serde_json::from_str(&raw).map_err(serde::de::Error::custom)
    }
}
