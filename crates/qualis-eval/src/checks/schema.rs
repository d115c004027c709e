use qualis_core::{Dataset, Status};

use super::infer::{TypeSample, sample_column};
use super::percent;
use crate::model::CheckOptions;
use crate::sink::FindingSink;

const TYPE_CHECK: &str = "Data Type Consistency";

/// `SchemaValidation`: one verdict per non-empty column.
pub(crate) fn run_schema(dataset: &Dataset, options: &CheckOptions, sink: &mut FindingSink<'_>) {
    for header in &dataset.headers {
        let sample = sample_column(dataset, header, options.sample_size);
        if sample.sampled == 0 {
            continue;
        }
        match sample.dominant() {
            Some(kind) if sample.is_consistent() => sink.push(
                TYPE_CHECK,
                Status::Pass,
                format!(
                    "Column {header}: consistent data type ({kind}) in {} sampled values",
                    sample.sampled
                ),
            ),
            _ => push_inconsistent(header, &sample, sink),
        }
    }
}

/// `FormatChecks`: only problems are reported.
pub(crate) fn run_format(dataset: &Dataset, options: &CheckOptions, sink: &mut FindingSink<'_>) {
    for header in &dataset.headers {
        let sample = sample_column(dataset, header, options.sample_size);
        if sample.sampled == 0 {
            continue;
        }
        if !sample.is_consistent() {
            push_inconsistent(header, &sample, sink);
        }
        if sample.date_formats.len() > 1 {
            sink.push(
                "Date Format Consistency",
                Status::Warning,
                format!(
                    "Column {header}: mixed date formats ({} formats: {}) in {} sampled values",
                    sample.date_formats.len(),
                    sample.describe_date_formats(),
                    sample.sampled
                ),
            );
        }

        let mut present = 0usize;
        let mut padded = 0usize;
        for (_, value) in dataset.present(header) {
            present += 1;
            if let Some(text) = value.as_text() {
                if text.trim() != text {
                    padded += 1;
                }
            }
        }
        if padded > 0 {
            sink.push(
                "Whitespace",
                Status::Warning,
                format!(
                    "Column {header}: {padded} values with leading or trailing whitespace ({}%)",
                    percent(padded, present)
                ),
            );
        }
    }
}

fn push_inconsistent(header: &str, sample: &TypeSample, sink: &mut FindingSink<'_>) {
    sink.push(
        TYPE_CHECK,
        Status::Warning,
        format!(
            "Column {header}: inconsistent data types ({}) in {} sampled values",
            sample.describe_kinds(),
            sample.sampled
        ),
    );
}
