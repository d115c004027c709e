//! Queries over stored reports: latest, comparisons, fleet totals.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use qualis_core::Report;
use serde::{Deserialize, Serialize};

use crate::builder::quality_score;
use crate::errors::EvalError;

/// Delta between the two most recent reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub latest_id: String,
    pub latest_dataset_name: String,
    pub previous_id: String,
    pub previous_dataset_name: String,
    /// `latest.fail - previous.fail`; negative means fewer failures.
    pub fail_delta: i64,
    pub pass_delta: i64,
    pub warning_delta: i64,
    pub score_delta: f64,
}

/// Totals across every stored report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    pub report_count: usize,
    /// Pass + fail + warning; info findings are not checks here.
    pub total_checks: u64,
    pub total_failures: u64,
    pub total_warnings: u64,
    pub total_info: u64,
    pub average_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub report_id: String,
    pub timestamp: DateTime<Utc>,
    pub score: f64,
    pub pass: u64,
    pub fail: u64,
    pub warning: u64,
}

/// Dataset status, derived from its latest report on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationStatus {
    NotValidated,
    Validated,
    IssuesFound,
}

impl ValidationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationStatus::NotValidated => "Not Validated",
            ValidationStatus::Validated => "Validated",
            ValidationStatus::IssuesFound => "Issues Found",
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn chronological(a: &Report, b: &Report) -> Ordering {
    a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id))
}

/// Most recent report; equal timestamps resolve to the later id.
pub fn latest_report(reports: &[Report]) -> Option<&Report> {
    reports.iter().max_by(|a, b| chronological(a, b))
}

pub fn latest_for_dataset<'a>(reports: &'a [Report], dataset_id: &str) -> Option<&'a Report> {
    reports
        .iter()
        .filter(|report| report.dataset_id == dataset_id)
        .max_by(|a, b| chronological(a, b))
}

/// Report with the most failures; ties go to the most recent.
pub fn most_errors(reports: &[Report]) -> Option<&Report> {
    reports.iter().max_by(|a, b| {
        a.summary
            .fail
            .cmp(&b.summary.fail)
            .then_with(|| chronological(a, b))
    })
}

/// Compare the two most recent reports, whatever their datasets.
pub fn compare_latest(reports: &[Report]) -> Result<ComparisonResult, EvalError> {
    if reports.len() < 2 {
        return Err(EvalError::InsufficientData {
            available: reports.len(),
        });
    }
    let mut ordered = reports.iter().collect::<Vec<_>>();
    ordered.sort_by(|a, b| chronological(b, a));
    let (latest, previous) = (ordered[0], ordered[1]);

    Ok(ComparisonResult {
        latest_id: latest.id.clone(),
        latest_dataset_name: latest.dataset_name.clone(),
        previous_id: previous.id.clone(),
        previous_dataset_name: previous.dataset_name.clone(),
        fail_delta: delta(latest.summary.fail, previous.summary.fail),
        pass_delta: delta(latest.summary.pass, previous.summary.pass),
        warning_delta: delta(latest.summary.warning, previous.summary.warning),
        score_delta: quality_score(&latest.summary) - quality_score(&previous.summary),
    })
}

fn delta(latest: u64, previous: u64) -> i64 {
    latest as i64 - previous as i64
}

pub fn fleet_summary(reports: &[Report]) -> FleetSummary {
    let mut fleet = FleetSummary {
        report_count: reports.len(),
        ..FleetSummary::default()
    };
    let mut score_sum = 0.0;
    for report in reports {
        let summary = &report.summary;
        fleet.total_checks += summary.pass + summary.fail + summary.warning;
        fleet.total_failures += summary.fail;
        fleet.total_warnings += summary.warning;
        fleet.total_info += summary.info;
        score_sum += quality_score(summary);
    }
    if !reports.is_empty() {
        fleet.average_score = score_sum / reports.len() as f64;
    }
    fleet
}

/// Chronological score history of one dataset.
pub fn trend(reports: &[Report], dataset_id: &str) -> Vec<TrendPoint> {
    let mut history = reports
        .iter()
        .filter(|report| report.dataset_id == dataset_id)
        .collect::<Vec<_>>();
    history.sort_by(|a, b| chronological(a, b));
    history
        .into_iter()
        .map(|report| TrendPoint {
            report_id: report.id.clone(),
            timestamp: report.timestamp,
            score: quality_score(&report.summary),
            pass: report.summary.pass,
            fail: report.summary.fail,
            warning: report.summary.warning,
        })
        .collect()
}

pub fn validation_status(reports: &[Report], dataset_id: &str) -> ValidationStatus {
    match latest_for_dataset(reports, dataset_id) {
        None => ValidationStatus::NotValidated,
        Some(report) if report.summary.is_clean() => ValidationStatus::Validated,
        Some(_) => ValidationStatus::IssuesFound,
    }
}
