use std::fmt;

use qualis_core::{Dataset, Finding, Method, Report, Summary};
use serde::{Deserialize, Serialize};

use crate::model::RunContext;

/// Assemble the report for one run.
///
/// The run id becomes the report id and the run start its timestamp; the
/// dataset name is copied so later renames leave the report untouched.
pub fn build_report(
    dataset: &Dataset,
    findings: Vec<Finding>,
    methods: &[Method],
    ctx: &RunContext,
) -> Report {
    let summary = Summary::from_findings(&findings);
    Report {
        id: ctx.run_id.to_string(),
        dataset_id: dataset.id.clone(),
        dataset_name: dataset.name.clone(),
        timestamp: ctx.started_at,
        methods: methods.to_vec(),
        results: findings,
        summary,
    }
}

/// `10 * (pass + 0.5 * warning) / total`, clamped to `[0, 10]`; `0` for an
/// empty summary. Info findings count toward `total`.
pub fn quality_score(summary: &Summary) -> f64 {
    if summary.total == 0 {
        return 0.0;
    }
    let earned = summary.pass as f64 + 0.5 * summary.warning as f64;
    (10.0 * earned / summary.total as f64).clamp(0.0, 10.0)
}

/// Letter band of a quality score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: f64) -> Self {
        if score >= 9.0 {
            Grade::A
        } else if score >= 8.0 {
            Grade::B
        } else if score >= 7.0 {
            Grade::C
        } else if score >= 5.0 {
            Grade::D
        } else {
            Grade::F
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn grade(summary: &Summary) -> Grade {
    Grade::from_score(quality_score(summary))
}
