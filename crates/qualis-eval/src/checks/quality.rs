use qualis_core::{Dataset, Status};

use super::{percent, row_list};
use crate::model::CheckOptions;
use crate::sink::FindingSink;

const PLACEHOLDERS: &[&str] = &[
    "n/a",
    "na",
    "null",
    "none",
    "-",
    "?",
    "unknown",
    "undefined",
    "nan",
];

pub(crate) fn is_placeholder(text: &str) -> bool {
    let normalized = text.trim().to_lowercase();
    PLACEHOLDERS.contains(&normalized.as_str())
}

pub(crate) fn run(dataset: &Dataset, options: &CheckOptions, sink: &mut FindingSink<'_>) {
    for header in &dataset.headers {
        let mut present = 0usize;
        let mut placeholders = 0usize;
        for (_, value) in dataset.present(header) {
            present += 1;
            if value.as_text().is_some_and(is_placeholder) {
                placeholders += 1;
            }
        }
        if placeholders > 0 {
            sink.push(
                "Placeholder Values",
                Status::Warning,
                format!(
                    "Column {header}: {placeholders} placeholder values ({}%)",
                    percent(placeholders, present)
                ),
            );
        }
    }

    let short_rows = dataset
        .content
        .iter()
        .enumerate()
        .filter(|(_, row)| dataset.headers.iter().any(|header| !row.contains_key(header)))
        .map(|(idx, _)| idx)
        .collect::<Vec<_>>();
    if short_rows.is_empty() {
        sink.push(
            "Row Width",
            Status::Pass,
            format!(
                "All {} rows define every column",
                dataset.content.len()
            ),
        );
    } else {
        sink.push(
            "Row Width",
            Status::Warning,
            format!(
                "{} rows missing one or more columns ({})",
                short_rows.len(),
                row_list(&short_rows, options.max_row_findings)
            ),
        );
    }
}
