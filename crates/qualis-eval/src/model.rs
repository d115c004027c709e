use std::collections::BTreeMap;

use chrono::{DateTime, SubsecRound, Utc};
use qualis_core::{Dataset, Method};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tunable thresholds and caller-supplied rules for the check routines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckOptions {
    /// Present values sampled per column for type inference.
    pub sample_size: usize,
    /// Missing share (percent) above which completeness is high severity.
    pub completeness_high_pct: f64,
    /// Missing share (percent) above which completeness is medium severity.
    pub completeness_medium_pct: f64,
    /// Tukey fence multiplier applied to the interquartile range.
    pub outlier_iqr_multiplier: f64,
    /// Numeric values required before outliers are computed.
    pub min_numeric_values: usize,
    /// Share of values that must match a text format for it to apply.
    pub text_format_min_share: f64,
    /// Share of rows that must satisfy a cross-column relation for it to apply.
    pub cross_column_min_share: f64,
    /// Numeric columns considered for cross-column relations.
    pub cross_column_max_columns: usize,
    /// Per-row findings emitted before violations are summarized.
    pub max_row_findings: usize,
    pub lookup_case_insensitive: bool,
    /// Allowed values per column for `ValueLookup`.
    pub lookups: BTreeMap<String, Vec<String>>,
    /// Full-match regular expressions per column for `RegexPattern`.
    pub patterns: BTreeMap<String, String>,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            sample_size: 100,
            completeness_high_pct: 20.0,
            completeness_medium_pct: 5.0,
            outlier_iqr_multiplier: 1.5,
            min_numeric_values: 4,
            text_format_min_share: 0.5,
            cross_column_min_share: 0.8,
            cross_column_max_columns: 12,
            max_row_findings: 10,
            lookup_case_insensitive: false,
            lookups: BTreeMap::new(),
            patterns: BTreeMap::new(),
        }
    }
}

/// Identity and clock of one validation run.
///
/// Findings are stamped from the context, so the same context over the same
/// dataset reproduces the same findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunContext {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
}

impl RunContext {
    /// Fresh run id, current time truncated to milliseconds.
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now().trunc_subsecs(3),
        }
    }

    pub fn at(run_id: Uuid, started_at: DateTime<Utc>) -> Self {
        Self { run_id, started_at }
    }

    /// Context fixed by the dataset and method alone: a v5 id over
    /// `<dataset id>/<method>` and the dataset's last update (or upload)
    /// time, falling back to the Unix epoch.
    pub fn derived(dataset: &Dataset, method: Method) -> Self {
        let key = format!("{}/{method}", dataset.id);
        let started_at = dataset
            .last_updated
            .as_deref()
            .or(dataset.date_uploaded.as_deref())
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|at| at.with_timezone(&Utc).trunc_subsecs(3))
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        Self {
            run_id: Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes()),
            started_at,
        }
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}
