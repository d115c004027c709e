use std::collections::BTreeSet;

use qualis_core::{Dataset, Status};

use crate::sink::FindingSink;

pub(crate) fn run(dataset: &Dataset, sink: &mut FindingSink<'_>) {
    let rows = dataset.content.len();
    let row_status = if rows > 0 { Status::Info } else { Status::Fail };
    sink.push("Row Count", row_status, format!("Dataset contains {rows} rows"));

    let columns = dataset.headers.len();
    let column_status = if columns > 0 { Status::Pass } else { Status::Fail };
    sink.push(
        "Column Count",
        column_status,
        format!("Dataset contains {columns} columns"),
    );

    let mut seen = BTreeSet::new();
    let mut duplicates = Vec::new();
    for header in &dataset.headers {
        if !seen.insert(header.as_str()) && !duplicates.contains(&header.as_str()) {
            duplicates.push(header.as_str());
        }
    }
    if duplicates.is_empty() {
        sink.push(
            "Header Uniqueness",
            Status::Pass,
            format!("All {columns} headers are unique"),
        );
    } else {
        sink.push(
            "Header Uniqueness",
            Status::Fail,
            format!("Duplicate headers: {}", duplicates.join(", ")),
        );
    }

    for header in &dataset.headers {
        let present = dataset.present(header).count();
        if present == 0 {
            sink.push(
                "Column Presence",
                Status::Fail,
                format!("Column {header}: all {rows} values are missing"),
            );
        } else {
            sink.push(
                "Column Presence",
                Status::Pass,
                format!("Column {header}: {present} of {rows} values present"),
            );
        }
    }
}
