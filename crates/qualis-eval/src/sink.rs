use qualis_core::{Dataset, Finding, Method, Severity, Status};
use uuid::Uuid;

use crate::model::RunContext;

/// Collects the findings of one method and stamps them for the run.
#[derive(Debug)]
pub struct FindingSink<'a> {
    dataset_id: &'a str,
    method: Method,
    ctx: &'a RunContext,
    findings: Vec<Finding>,
}

impl<'a> FindingSink<'a> {
    pub fn new(dataset: &'a Dataset, method: Method, ctx: &'a RunContext) -> Self {
        Self {
            dataset_id: &dataset.id,
            method,
            ctx,
            findings: Vec::new(),
        }
    }

    pub fn push(&mut self, check: &str, status: Status, details: impl Into<String>) {
        self.stamp(check, status, None, details.into());
    }

    /// Push a finding whose status follows from its severity band.
    pub fn push_graded(&mut self, check: &str, severity: Severity, details: impl Into<String>) {
        self.stamp(check, severity.status(), Some(severity), details.into());
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }

    fn stamp(&mut self, check: &str, status: Status, severity: Option<Severity>, details: String) {
        let key = format!("{}/{}", self.method, self.findings.len());
        let id = Uuid::new_v5(&self.ctx.run_id, key.as_bytes());
        self.findings.push(Finding {
            id: id.to_string(),
            dataset_id: self.dataset_id.to_string(),
            check: check.to_string(),
            category: self.method.category().to_string(),
            status,
            details,
            severity,
            timestamp: self.ctx.started_at,
        });
    }
}
