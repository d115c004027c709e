use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use qualis_core::{Dataset, Report, Template, validate_report, validate_template};

use crate::adapter::{
    DatasetRegistry, ReportStore, TemplateStore, mark_public, sort_reports, sort_templates,
};
use crate::error::{StoreError, StoreResult};

/// Process-local store backed by ordered maps.
#[derive(Debug, Default)]
pub struct MemoryStore {
    reports: RwLock<BTreeMap<String, Report>>,
    templates: RwLock<BTreeMap<String, Template>>,
    public: RwLock<BTreeMap<String, Dataset>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportStore for MemoryStore {
    async fn save(&self, report: Report) -> StoreResult<Report> {
        validate_report(&report)?;
        let mut reports = self.reports.write().await;
        reports.insert(report.id.clone(), report.clone());
        Ok(report)
    }

    async fn list(&self) -> StoreResult<Vec<Report>> {
        let mut reports = self.reports.read().await.values().cloned().collect::<Vec<_>>();
        sort_reports(&mut reports);
        Ok(reports)
    }

    async fn get(&self, id: &str) -> StoreResult<Report> {
        self.reports
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                kind: "report",
                id: id.to_string(),
            })
    }

    async fn delete(&self, id: &str) -> bool {
        self.reports.write().await.remove(id).is_some()
    }
}

#[async_trait]
impl TemplateStore for MemoryStore {
    async fn save_template(&self, template: Template) -> StoreResult<Template> {
        validate_template(&template)?;
        let mut templates = self.templates.write().await;
        templates.insert(template.id.clone(), template.clone());
        Ok(template)
    }

    async fn list_templates(&self) -> StoreResult<Vec<Template>> {
        let mut templates = self
            .templates
            .read()
            .await
            .values()
            .cloned()
            .collect::<Vec<_>>();
        sort_templates(&mut templates);
        Ok(templates)
    }

    async fn get_template(&self, id: &str) -> StoreResult<Template> {
        self.templates
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                kind: "template",
                id: id.to_string(),
            })
    }

    async fn delete_template(&self, id: &str) -> bool {
        self.templates.write().await.remove(id).is_some()
    }
}

#[async_trait]
impl DatasetRegistry for MemoryStore {
    async fn publish_dataset(&self, dataset: Dataset) -> StoreResult<Dataset> {
        let dataset = mark_public(dataset)?;
        let mut public = self.public.write().await;
        public.insert(dataset.id.clone(), dataset.clone());
        Ok(dataset)
    }

    async fn list_public_datasets(&self) -> StoreResult<Vec<Dataset>> {
        Ok(self.public.read().await.values().cloned().collect())
    }

    async fn unpublish_dataset(&self, id: &str) -> bool {
        self.public.write().await.remove(id).is_some()
    }
}
