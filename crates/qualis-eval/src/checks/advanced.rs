use std::collections::{BTreeSet, HashMap};

use qualis_core::{Dataset, Status};

use super::{percent, quote, row_list, value_key};
use crate::model::CheckOptions;
use crate::sink::FindingSink;

pub(crate) fn run(dataset: &Dataset, options: &CheckOptions, sink: &mut FindingSink<'_>) {
    duplicate_rows(dataset, options, sink);
    constant_columns(dataset, sink);
    key_candidate(dataset, sink);
}

fn duplicate_rows(dataset: &Dataset, options: &CheckOptions, sink: &mut FindingSink<'_>) {
    let rows = dataset.content.len();
    let mut first_seen: HashMap<String, usize> = HashMap::new();
    let mut duplicates = Vec::new();

    for (idx, row) in dataset.content.iter().enumerate() {
        let key = dataset
            .headers
            .iter()
            .map(|header| value_key(dataset.cell(row, header)))
            .collect::<Vec<_>>()
            .join("|");
        if first_seen.contains_key(&key) {
            duplicates.push(idx);
        } else {
            first_seen.insert(key, idx);
        }
    }

    if duplicates.is_empty() {
        sink.push(
            "Duplicate Rows",
            Status::Pass,
            format!("No duplicate rows in {rows} rows"),
        );
    } else {
        sink.push(
            "Duplicate Rows",
            Status::Warning,
            format!(
                "{} duplicate rows ({}%): {}",
                duplicates.len(),
                percent(duplicates.len(), rows),
                row_list(&duplicates, options.max_row_findings)
            ),
        );
    }
}

fn constant_columns(dataset: &Dataset, sink: &mut FindingSink<'_>) {
    for header in &dataset.headers {
        let mut distinct = BTreeSet::new();
        let mut present = 0usize;
        let mut sample = None;
        for (_, value) in dataset.present(header) {
            present += 1;
            distinct.insert(value_key(value));
            sample.get_or_insert(value);
            if distinct.len() > 1 {
                break;
            }
        }
        if present >= 2 && distinct.len() == 1 {
            if let Some(value) = sample {
                sink.push(
                    "Constant Column",
                    Status::Warning,
                    format!(
                        "Column {header}: all {present} present values are '{}'",
                        quote(value)
                    ),
                );
            }
        }
    }
}

fn key_candidate(dataset: &Dataset, sink: &mut FindingSink<'_>) {
    let rows = dataset.content.len();
    if rows < 2 {
        return;
    }
    for header in &dataset.headers {
        let mut distinct = BTreeSet::new();
        let complete_and_unique = dataset
            .column(header)
            .all(|value| !value.is_missing() && distinct.insert(value_key(value)));
        if complete_and_unique {
            sink.push(
                "Unique Key Candidate",
                Status::Info,
                format!("Column {header}: unique and complete across {rows} rows"),
            );
            return;
        }
    }
}
