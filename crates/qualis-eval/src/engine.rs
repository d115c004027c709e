use std::time::Instant;

use qualis_core::{Dataset, Method, Report, validate_dataset};
use qualis_store::ReportStore;

use crate::builder::{build_report, quality_score};
use crate::errors::EvalError;
use crate::model::{CheckOptions, RunContext};
use crate::registry::run_method;

/// Runs selected methods over a dataset and assembles the report.
#[derive(Debug, Clone, Default)]
pub struct ValidationEngine {
    options: CheckOptions,
}

impl ValidationEngine {
    pub fn new(options: CheckOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CheckOptions {
        &self.options
    }

    /// Run `methods` in order under `ctx` and build the report without saving it.
    ///
    /// Repeated methods run once. The first routine error aborts the run.
    pub fn evaluate(
        &self,
        dataset: &Dataset,
        methods: &[Method],
        ctx: &RunContext,
    ) -> Result<Report, EvalError> {
        let methods = dedup_methods(methods);
        if methods.is_empty() {
            return Err(EvalError::NoMethods);
        }
        validate_dataset(dataset)?;
        if dataset.is_empty() {
            return Err(EvalError::EmptyDataset(dataset.id.clone()));
        }

        let mut findings = Vec::new();
        for method in &methods {
            match run_method(dataset, *method, &self.options, ctx) {
                Ok(method_findings) => findings.extend(method_findings),
                Err(err) => {
                    tracing::warn!(
                        event = "method_failed",
                        dataset_id = %dataset.id,
                        method = %method,
                        error = %err
                    );
                    return Err(err);
                }
            }
        }
        Ok(build_report(dataset, findings, &methods, ctx))
    }

    /// Evaluate under a fresh run context and persist the report.
    pub async fn run(
        &self,
        store: &dyn ReportStore,
        dataset: &Dataset,
        methods: &[Method],
    ) -> Result<Report, EvalError> {
        let start = Instant::now();
        let ctx = RunContext::new();
        tracing::info!(
            event = "validation_started",
            run_id = %ctx.run_id,
            dataset_id = %dataset.id,
            methods = methods.len()
        );

        let report = self.evaluate(dataset, methods, &ctx)?;
        let report = store.save(report).await?;

        tracing::info!(
            event = "report_saved",
            report_id = %report.id,
            dataset_id = %report.dataset_id,
            findings = report.summary.total,
            fail = report.summary.fail,
            warning = report.summary.warning,
            score = quality_score(&report.summary),
            elapsed_ms = start.elapsed().as_millis() as u64
        );
        Ok(report)
    }
}

/// Validate `dataset` with `methods` and save the resulting report.
pub async fn run_validation(
    store: &dyn ReportStore,
    dataset: &Dataset,
    methods: &[Method],
    options: &CheckOptions,
) -> Result<Report, EvalError> {
    ValidationEngine::new(options.clone())
        .run(store, dataset, methods)
        .await
}

/// Same as [`run_validation`] with method identifiers parsed first.
pub async fn run_validation_ids(
    store: &dyn ReportStore,
    dataset: &Dataset,
    method_ids: &[&str],
    options: &CheckOptions,
) -> Result<Report, EvalError> {
    let methods = parse_methods(method_ids)?;
    run_validation(store, dataset, &methods, options).await
}

pub fn parse_methods<S: AsRef<str>>(method_ids: &[S]) -> Result<Vec<Method>, EvalError> {
    method_ids
        .iter()
        .map(|id| id.as_ref().parse::<Method>().map_err(EvalError::from))
        .collect()
}

fn dedup_methods(methods: &[Method]) -> Vec<Method> {
    let mut unique = Vec::with_capacity(methods.len());
    for method in methods {
        if !unique.contains(method) {
            unique.push(*method);
        }
    }
    unique
}
