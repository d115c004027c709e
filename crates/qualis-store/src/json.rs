use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use qualis_core::{Dataset, Report, Template, validate_report, validate_template};

use crate::adapter::{
    DatasetRegistry, ReportStore, TemplateStore, mark_public, sort_reports, sort_templates,
};
use crate::atomic::write_json_atomic;
use crate::error::{StoreError, StoreResult};

/// Directory of JSON documents: `<root>/reports/<id>.json`,
/// `<root>/templates/<id>.json` and `<root>/public/<id>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    reports_dir: PathBuf,
    templates_dir: PathBuf,
    public_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            reports_dir: root.join("reports"),
            templates_dir: root.join("templates"),
            public_dir: root.join("public"),
        }
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }
}

#[async_trait]
impl ReportStore for JsonFileStore {
    async fn save(&self, report: Report) -> StoreResult<Report> {
        validate_report(&report)?;
        let path = document_path(&self.reports_dir, &report.id)?;
        let report = blocking(move || {
            write_json_atomic(&path, &report)?;
            Ok(report)
        })
        .await?;
        tracing::debug!(event = "report_written", report_id = %report.id);
        Ok(report)
    }

    async fn list(&self) -> StoreResult<Vec<Report>> {
        let dir = self.reports_dir.clone();
        let mut reports = blocking(move || read_documents::<Report>(&dir, "report")).await?;
        sort_reports(&mut reports);
        Ok(reports)
    }

    async fn get(&self, id: &str) -> StoreResult<Report> {
        let path = lookup_path(&self.reports_dir, "report", id)?;
        let id = id.to_string();
        blocking(move || read_document(&path, "report", &id)).await
    }

    async fn delete(&self, id: &str) -> bool {
        match document_path(&self.reports_dir, id) {
            Ok(path) => remove_document(path, "report", id).await,
            Err(_) => false,
        }
    }
}

#[async_trait]
impl TemplateStore for JsonFileStore {
    async fn save_template(&self, template: Template) -> StoreResult<Template> {
        validate_template(&template)?;
        let path = document_path(&self.templates_dir, &template.id)?;
        blocking(move || {
            write_json_atomic(&path, &template)?;
            Ok(template)
        })
        .await
    }

    async fn list_templates(&self) -> StoreResult<Vec<Template>> {
        let dir = self.templates_dir.clone();
        let mut templates = blocking(move || read_documents::<Template>(&dir, "template")).await?;
        sort_templates(&mut templates);
        Ok(templates)
    }

    async fn get_template(&self, id: &str) -> StoreResult<Template> {
        let path = lookup_path(&self.templates_dir, "template", id)?;
        let id = id.to_string();
        blocking(move || read_document(&path, "template", &id)).await
    }

    async fn delete_template(&self, id: &str) -> bool {
        match document_path(&self.templates_dir, id) {
            Ok(path) => remove_document(path, "template", id).await,
            Err(_) => false,
        }
    }
}

#[async_trait]
impl DatasetRegistry for JsonFileStore {
    async fn publish_dataset(&self, dataset: Dataset) -> StoreResult<Dataset> {
        let dataset = mark_public(dataset)?;
        let path = document_path(&self.public_dir, &dataset.id)?;
        let dataset = blocking(move || {
            write_json_atomic(&path, &dataset)?;
            Ok(dataset)
        })
        .await?;
        tracing::info!(event = "dataset_published", dataset_id = %dataset.id);
        Ok(dataset)
    }

    async fn list_public_datasets(&self) -> StoreResult<Vec<Dataset>> {
        let dir = self.public_dir.clone();
        let mut datasets = blocking(move || read_documents::<Dataset>(&dir, "dataset")).await?;
        datasets.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(datasets)
    }

    async fn unpublish_dataset(&self, id: &str) -> bool {
        let removed = match document_path(&self.public_dir, id) {
            Ok(path) => remove_document(path, "dataset", id).await,
            Err(_) => false,
        };
        if removed {
            tracing::info!(event = "dataset_unpublished", dataset_id = %id);
        } else {
            tracing::warn!(event = "dataset_not_public", dataset_id = %id);
        }
        removed
    }
}

async fn blocking<T, F>(task: F) -> StoreResult<T>
where
    F: FnOnce() -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| StoreError::Task(err.to_string()))?
}

fn document_path(dir: &Path, id: &str) -> StoreResult<PathBuf> {
    let valid = !id.is_empty()
        && id != "."
        && id != ".."
        && !id.contains(['/', '\\'])
        && !id.starts_with('.');
    if !valid {
        return Err(StoreError::InvalidId(id.to_string()));
    }
    Ok(dir.join(format!("{id}.json")))
}

fn lookup_path(dir: &Path, kind: &'static str, id: &str) -> StoreResult<PathBuf> {
    document_path(dir, id).map_err(|_| StoreError::NotFound {
        kind,
        id: id.to_string(),
    })
}

fn read_document<T: DeserializeOwned>(path: &Path, kind: &'static str, id: &str) -> StoreResult<T> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(StoreError::NotFound {
                kind,
                id: id.to_string(),
            });
        }
        Err(err) => return Err(err.into()),
    };
    Ok(serde_json::from_str(&contents)?)
}

fn read_documents<T: DeserializeOwned>(
    dir: &Path,
    kind: &'static str,
) -> StoreResult<Vec<T>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };

    let mut documents = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        let parsed = std::fs::read_to_string(&path)
            .map_err(StoreError::from)
            .and_then(|contents| serde_json::from_str::<T>(&contents).map_err(StoreError::from));
        match parsed {
            Ok(document) => documents.push(document),
            Err(err) => {
                tracing::warn!(
                    event = "document_unreadable",
                    kind = kind,
                    path = %path.display(),
                    error = %err
                );
            }
        }
    }
    Ok(documents)
}

async fn remove_document(path: PathBuf, kind: &'static str, id: &str) -> bool {
    let removed = tokio::task::spawn_blocking(move || std::fs::remove_file(path)).await;
    match removed {
        Ok(Ok(())) => true,
        Ok(Err(err)) if err.kind() == io::ErrorKind::NotFound => false,
        Ok(Err(err)) => {
            tracing::warn!(event = "delete_failed", kind = kind, id = %id, error = %err);
            false
        }
        Err(err) => {
            tracing::warn!(event = "delete_failed", kind = kind, id = %id, error = %err);
            false
        }
    }
}
