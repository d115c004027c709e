use async_trait::async_trait;

use qualis_core::{Dataset, Report, Template, validate_dataset};

use crate::error::StoreResult;

/// Persistence contract for validation reports.
///
/// `save` is all-or-nothing: when it returns an error no partial report is
/// visible to `list` or `get`.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Persist a report and return the stored copy.
    async fn save(&self, report: Report) -> StoreResult<Report>;

    /// All stored reports, oldest first.
    async fn list(&self) -> StoreResult<Vec<Report>>;

    /// Fetch one report, `StoreError::NotFound` when absent.
    async fn get(&self, id: &str) -> StoreResult<Report>;

    /// Remove a report. Returns `false` when nothing was removed; never errors.
    async fn delete(&self, id: &str) -> bool;
}

/// Persistence contract for method templates.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    async fn save_template(&self, template: Template) -> StoreResult<Template>;

    /// All stored templates ordered by name, then id.
    async fn list_templates(&self) -> StoreResult<Vec<Template>>;

    async fn get_template(&self, id: &str) -> StoreResult<Template>;

    async fn delete_template(&self, id: &str) -> bool;
}

/// Registry of datasets shared publicly, keyed by dataset id.
///
/// Publishing an id that is already listed replaces the stored copy.
#[async_trait]
pub trait DatasetRegistry: Send + Sync {
    /// Store `dataset` with `is_public` set and return the stored copy.
    async fn publish_dataset(&self, dataset: Dataset) -> StoreResult<Dataset>;

    /// All public datasets ordered by id.
    async fn list_public_datasets(&self) -> StoreResult<Vec<Dataset>>;

    /// Withdraw a dataset. Returns `false` when it was not listed.
    async fn unpublish_dataset(&self, id: &str) -> bool;
}

pub(crate) fn sort_reports(reports: &mut [Report]) {
    reports.sort_by(|a, b| (a.timestamp, &a.id).cmp(&(b.timestamp, &b.id)));
}

pub(crate) fn sort_templates(templates: &mut [Template]) {
    templates.sort_by(|a, b| (&a.name, &a.id).cmp(&(&b.name, &b.id)));
}

pub(crate) fn mark_public(mut dataset: Dataset) -> StoreResult<Dataset> {
    validate_dataset(&dataset)?;
    dataset.is_public = true;
    Ok(dataset)
}
