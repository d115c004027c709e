use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::finding::{Finding, Status};
use crate::method::Method;

/// Per-status counts for a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Summary {
    pub pass: u64,
    pub fail: u64,
    pub warning: u64,
    pub info: u64,
    pub total: u64,
}

impl Summary {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut summary = Summary::default();
        for finding in findings {
            summary.record(finding.status);
        }
        summary
    }

    pub fn record(&mut self, status: Status) {
        match status {
            Status::Pass => self.pass += 1,
            Status::Fail => self.fail += 1,
            Status::Warning => self.warning += 1,
            Status::Info => self.info += 1,
        }
        self.total += 1;
    }

    /// `total` equals the sum of the per-status counts.
    pub fn is_consistent(&self) -> bool {
        self.pass + self.fail + self.warning + self.info == self.total
    }

    /// Nothing failed and nothing warned.
    pub fn is_clean(&self) -> bool {
        self.fail == 0 && self.warning == 0
    }
}

/// Immutable snapshot of one validation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub dataset_id: String,
    /// Dataset name at build time; later renames do not rewrite it.
    pub dataset_name: String,
    pub timestamp: DateTime<Utc>,
    /// Methods run, in invocation order.
    #[serde(default)]
    pub methods: Vec<Method>,
    pub results: Vec<Finding>,
    pub summary: Summary,
}
