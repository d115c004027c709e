use std::time::Instant;

use qualis_core::{Dataset, Finding, Method};

use crate::checks;
use crate::errors::EvalError;
use crate::model::{CheckOptions, RunContext};
use crate::sink::FindingSink;

/// Run one method by identifier with default options.
///
/// The context is derived from the dataset and method, so repeated calls
/// return identical findings, ids and timestamps included.
pub fn run(dataset: &Dataset, method_id: &str) -> Result<Vec<Finding>, EvalError> {
    let method = method_id.parse::<Method>()?;
    run_method(
        dataset,
        method,
        &CheckOptions::default(),
        &RunContext::derived(dataset, method),
    )
}

/// Run one method by identifier under caller-supplied options and context.
pub fn run_with(
    dataset: &Dataset,
    method_id: &str,
    options: &CheckOptions,
    ctx: &RunContext,
) -> Result<Vec<Finding>, EvalError> {
    let method = method_id.parse::<Method>()?;
    run_method(dataset, method, options, ctx)
}

/// Dispatch a method to its check routine.
///
/// The same dataset, options and context always produce the same findings.
pub fn run_method(
    dataset: &Dataset,
    method: Method,
    options: &CheckOptions,
    ctx: &RunContext,
) -> Result<Vec<Finding>, EvalError> {
    if dataset.is_empty() {
        return Err(EvalError::EmptyDataset(dataset.id.clone()));
    }

    let start = Instant::now();
    let mut sink = FindingSink::new(dataset, method, ctx);
    match method {
        Method::Basic => checks::basic::run(dataset, &mut sink),
        Method::Advanced => checks::advanced::run(dataset, options, &mut sink),
        Method::SchemaValidation => checks::schema::run_schema(dataset, options, &mut sink),
        Method::FormatChecks => checks::schema::run_format(dataset, options, &mut sink),
        Method::ValueLookup => checks::lookup::run_lookup(dataset, options, &mut sink)?,
        Method::DataCompleteness => checks::completeness::run(dataset, options, &mut sink),
        Method::DataQuality => checks::quality::run(dataset, options, &mut sink),
        Method::StatisticalAnalysis => checks::statistics::run(dataset, options, &mut sink),
        Method::TextAnalysis => checks::text::run(dataset, options, &mut sink),
        Method::CrossColumn => checks::cross_column::run(dataset, options, &mut sink),
        Method::RegexPattern => checks::lookup::run_pattern(dataset, options, &mut sink)?,
    }

    tracing::debug!(
        event = "method_finished",
        dataset_id = %dataset.id,
        method = %method,
        findings = sink.len(),
        elapsed_ms = start.elapsed().as_millis() as u64
    );
    Ok(sink.into_findings())
}
