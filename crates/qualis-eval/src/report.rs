use chrono::SecondsFormat;
use qualis_core::{Report, Status};

use crate::builder::{Grade, quality_score};
use crate::checks::format_number;

/// Render a deterministic markdown report.
pub fn render_report(report: &Report, max_findings_per_category: usize) -> String {
    let score = quality_score(&report.summary);
    let mut lines = Vec::new();

    lines.push(format!("# Validation Report: {}", report.dataset_name));
    lines.push(String::new());
    lines.push("## Run summary".to_string());
    lines.push(format!("- report_id: {}", report.id));
    lines.push(format!("- dataset_id: {}", report.dataset_id));
    lines.push(format!(
        "- timestamp: {}",
        report.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    ));
    let methods = report
        .methods
        .iter()
        .map(|method| method.as_str())
        .collect::<Vec<_>>();
    if !methods.is_empty() {
        lines.push(format!("- methods: {}", methods.join(", ")));
    }
    lines.push(format!(
        "- quality_score: {} ({})",
        format_number(score, 1),
        Grade::from_score(score)
    ));
    lines.push(String::new());

    lines.push("## Status counts".to_string());
    lines.push("| status | count |".to_string());
    lines.push("| --- | --- |".to_string());
    lines.push(format!("| pass | {} |", report.summary.pass));
    lines.push(format!("| fail | {} |", report.summary.fail));
    lines.push(format!("| warning | {} |", report.summary.warning));
    lines.push(format!("| info | {} |", report.summary.info));
    lines.push(format!("| total | {} |", report.summary.total));
    lines.push(String::new());

    let mut categories: Vec<&str> = Vec::new();
    for finding in &report.results {
        if !categories.contains(&finding.category.as_str()) {
            categories.push(&finding.category);
        }
    }
    if !categories.is_empty() {
        lines.push("## Findings".to_string());
        for category in categories {
            lines.push(format!("### {category}"));
            let findings = report
                .results
                .iter()
                .filter(|finding| finding.category == category)
                .collect::<Vec<_>>();
            for finding in findings.iter().take(max_findings_per_category) {
                let severity = finding
                    .severity
                    .map(|severity| format!(" ({severity})"))
                    .unwrap_or_default();
                lines.push(format!(
                    "- [{}]{} {}: {}",
                    finding.status, severity, finding.check, finding.details
                ));
            }
            let hidden = findings.len().saturating_sub(max_findings_per_category);
            if hidden > 0 {
                lines.push(format!("- ... {hidden} more"));
            }
            lines.push(String::new());
        }
    }

    lines.push("## Recommendations".to_string());
    lines.extend(recommendations(report));
    lines.join("\n")
}

fn recommendations(report: &Report) -> Vec<String> {
    let mut lines = Vec::new();
    let has = |category: &str, status: Status| {
        report
            .results
            .iter()
            .any(|finding| finding.category == category && finding.status == status)
    };
    if has("Completeness", Status::Fail) || has("Completeness", Status::Warning) {
        lines.push("- fill or drop columns with many missing values.".to_string());
    }
    if has("Schema", Status::Warning) || has("Format", Status::Warning) {
        lines.push("- normalize mixed types and date formats before loading.".to_string());
    }
    if has("Lookup", Status::Fail) || has("Pattern", Status::Fail) {
        lines.push("- correct values rejected by lookup or pattern rules.".to_string());
    }
    if has("Cross-Column", Status::Fail) {
        lines.push("- recompute derived columns that disagree with their inputs.".to_string());
    }
    if report.summary.is_clean() {
        lines.push("- no failures or warnings; compare future runs for drift.".to_string());
    } else if lines.is_empty() {
        lines.push(format!(
            "- review {} failed and {} warning findings.",
            report.summary.fail, report.summary.warning
        ));
    }
    lines
}
