use std::collections::BTreeSet;

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::report::{Report, Summary};
use crate::template::Template;

/// Validate the structural invariants of a dataset.
///
/// This checks:
/// - duplicate headers
/// - `rowCount` / `columnCount` against the actual content
/// - row keys that are not declared headers
pub fn validate_dataset(dataset: &Dataset) -> Result<()> {
    if dataset.id.trim().is_empty() {
        return Err(Error::InvalidDataset("dataset id is empty".to_string()));
    }

    let mut headers = BTreeSet::new();
    for header in &dataset.headers {
        if !headers.insert(header.as_str()) {
            return Err(Error::InvalidDataset(format!(
                "duplicate header: {header}"
            )));
        }
    }

    if dataset.row_count != dataset.content.len() {
        return Err(Error::InvalidDataset(format!(
            "rowCount {} does not match {} rows of content",
            dataset.row_count,
            dataset.content.len()
        )));
    }

    if dataset.column_count != dataset.headers.len() {
        return Err(Error::InvalidDataset(format!(
            "columnCount {} does not match {} headers",
            dataset.column_count,
            dataset.headers.len()
        )));
    }

    for (idx, row) in dataset.content.iter().enumerate() {
        if let Some(key) = row.keys().find(|key| !headers.contains(key.as_str())) {
            return Err(Error::InvalidDataset(format!(
                "row {} has undeclared column: {key}",
                idx + 1
            )));
        }
    }

    Ok(())
}

/// Validate a template before it is stored or run.
pub fn validate_template(template: &Template) -> Result<()> {
    if template.id.trim().is_empty() {
        return Err(Error::InvalidTemplate("template id is empty".to_string()));
    }
    if template.name.trim().is_empty() {
        return Err(Error::InvalidTemplate(format!(
            "template '{}' has an empty name",
            template.id
        )));
    }
    if template.validation_methods.is_empty() {
        return Err(Error::InvalidTemplate(format!(
            "template '{}' has no validation methods",
            template.id
        )));
    }

    let mut seen = BTreeSet::new();
    for method in &template.validation_methods {
        if !seen.insert(*method) {
            return Err(Error::InvalidTemplate(format!(
                "template '{}' lists {method} more than once",
                template.id
            )));
        }
    }

    Ok(())
}

/// Validate that a report summary agrees with its results.
pub fn validate_report(report: &Report) -> Result<()> {
    let recomputed = Summary::from_findings(&report.results);
    if recomputed != report.summary {
        return Err(Error::InvalidReport(format!(
            "report '{}' summary {:?} does not match its {} results",
            report.id,
            report.summary,
            report.results.len()
        )));
    }
    if let Some(finding) = report
        .results
        .iter()
        .find(|finding| finding.dataset_id != report.dataset_id)
    {
        return Err(Error::InvalidReport(format!(
            "finding '{}' belongs to dataset '{}', not '{}'",
            finding.id, finding.dataset_id, report.dataset_id
        )));
    }
    Ok(())
}
