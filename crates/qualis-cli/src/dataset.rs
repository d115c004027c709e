use std::path::Path;

use chrono::{SecondsFormat, Utc};
use qualis_core::{Dataset, DatasetKind, Row, Value, validate_dataset};

use crate::CliError;

/// Load a dataset from `.json` (dataset document or bare row array) or `.csv`.
pub fn load_dataset(path: &Path) -> Result<Dataset, CliError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    let dataset = match extension.as_str() {
        "json" => load_json(path)?,
        "csv" => load_csv(path)?,
        other => {
            return Err(CliError::InvalidArgument(format!(
                "unsupported dataset format '{other}' for {}",
                path.display()
            )));
        }
    };
    validate_dataset(&dataset)?;
    tracing::debug!(
        event = "dataset_loaded",
        dataset_id = %dataset.id,
        rows = dataset.row_count,
        columns = dataset.column_count
    );
    Ok(dataset)
}

fn load_json(path: &Path) -> Result<Dataset, CliError> {
    let contents = std::fs::read_to_string(path)?;
    let document: serde_json::Value = serde_json::from_str(&contents)?;
    if document.is_object() {
        return Ok(serde_json::from_value(document)?);
    }

    let rows: Vec<Row> = serde_json::from_value(document)?;
    let mut headers: Vec<String> = Vec::new();
    for row in &rows {
        for key in row.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    let dataset = Dataset::new(file_stem(path), file_name(path), headers, rows)
        .with_kind(DatasetKind::Json);
    Ok(with_file_metadata(dataset, contents.len()))
}

fn load_csv(path: &Path) -> Result<Dataset, CliError> {
    let bytes = std::fs::metadata(path)?.len() as usize;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers = reader
        .headers()?
        .iter()
        .map(|header| header.trim().to_string())
        .collect::<Vec<_>>();

    let mut content = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() > headers.len() {
            return Err(CliError::InvalidArgument(format!(
                "{}: line {} has {} fields, header has {}",
                path.display(),
                idx + 2,
                record.len(),
                headers.len()
            )));
        }
        // Short records leave trailing columns absent.
        let row = headers
            .iter()
            .zip(record.iter())
            .map(|(header, cell)| (header.clone(), Value::infer(cell)))
            .collect::<Row>();
        content.push(row);
    }

    let dataset =
        Dataset::new(file_stem(path), file_name(path), headers, content).with_kind(DatasetKind::Csv);
    Ok(with_file_metadata(dataset, bytes))
}

fn with_file_metadata(mut dataset: Dataset, bytes: usize) -> Dataset {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    dataset.size = Some(human_size(bytes));
    dataset.date_uploaded = Some(now.clone());
    dataset.last_updated = Some(now);
    dataset
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_stem(path))
}

/// `512 B`, `1.2 KB`, `3.4 MB`.
pub fn human_size(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let mut dir = std::env::temp_dir();
        dir.push(format!("qualis_cli_dataset_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join(name);
        std::fs::write(&path, contents).expect("write dataset");
        path
    }

    #[test]
    fn loads_csv_with_inferred_cells() {
        let path = temp_file("people.csv", "id,name,age,active\n1,Ana,34,true\n2,Bo,,false\n3,Cy\n");
        let dataset = load_dataset(&path).expect("load csv");

        assert_eq!(dataset.id, "people");
        assert_eq!(dataset.name, "people.csv");
        assert_eq!(dataset.kind, Some(DatasetKind::Csv));
        assert_eq!(dataset.headers, vec!["id", "name", "age", "active"]);
        assert_eq!(dataset.row_count, 3);
        assert_eq!(dataset.content[0]["age"], Value::Number(34.0));
        assert_eq!(dataset.content[0]["active"], Value::Bool(true));
        assert_eq!(dataset.content[1]["age"], Value::Null);
        assert!(!dataset.content[2].contains_key("age"), "short row leaves columns absent");
    }

    #[test]
    fn rejects_csv_rows_wider_than_header() {
        let path = temp_file("wide.csv", "a,b\n1,2,3\n");
        assert!(matches!(
            load_dataset(&path),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn loads_bare_json_row_arrays() {
        let path = temp_file(
            "orders.json",
            r#"[{"id": 1, "total": 9.5}, {"id": 2, "note": "gift", "total": null}]"#,
        );
        let dataset = load_dataset(&path).expect("load json rows");

        assert_eq!(dataset.id, "orders");
        assert_eq!(dataset.kind, Some(DatasetKind::Json));
        assert_eq!(dataset.headers, vec!["id", "total", "note"]);
        assert_eq!(dataset.content[1]["total"], Value::Null);
    }

    #[test]
    fn loads_dataset_documents() {
        let path = temp_file(
            "doc.json",
            r#"{"id": "ds-9", "name": "Sales", "type": "CSV", "headers": ["region"],
                "content": [{"region": "EU"}], "rowCount": 1, "columnCount": 1}"#,
        );
        let dataset = load_dataset(&path).expect("load document");
        assert_eq!(dataset.id, "ds-9");
        assert_eq!(dataset.kind, Some(DatasetKind::Csv));
    }

    #[test]
    fn sizes_are_human_readable() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(1536), "1.5 KB");
        assert_eq!(human_size(3 * 1024 * 1024), "3.0 MB");
    }
}
