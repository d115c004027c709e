use std::fmt;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Verdict of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Status {
    Pass,
    Fail,
    Warning,
    Info,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pass => "Pass",
            Status::Fail => "Fail",
            Status::Warning => "Warning",
            Status::Info => "Info",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "pass" => Some(Status::Pass),
            "fail" => Some(Status::Fail),
            "warning" => Some(Status::Warning),
            "info" => Some(Status::Info),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Graded severity for checks that band their evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// Status a severity band is reported under.
    pub fn status(self) -> Status {
        match self {
            Severity::High => Status::Fail,
            Severity::Medium => Status::Warning,
            Severity::Low => Status::Info,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::High => f.write_str("high"),
            Severity::Medium => f.write_str("medium"),
            Severity::Low => f.write_str("low"),
        }
    }
}

/// Immutable outcome of one check against one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub id: String,
    pub dataset_id: String,
    /// Name of the rule that produced the finding.
    pub check: String,
    /// Method group, e.g. `Completeness`.
    pub category: String,
    pub status: Status,
    /// Human readable evidence (counts, percentages, column/row references).
    pub details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    pub timestamp: DateTime<Utc>,
}
