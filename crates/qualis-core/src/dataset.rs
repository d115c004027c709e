use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// One dataset row keyed by header name.
pub type Row = BTreeMap<String, Value>;

static MISSING: Value = Value::Null;

/// In-memory dataset handed to the engine by ingestion.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Stable identifier referenced by findings and reports.
    pub id: String,
    /// Display name, snapshotted into reports at build time.
    pub name: String,
    /// Source format the dataset was ingested from.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<DatasetKind>,
    /// Ordered, unique column names.
    pub headers: Vec<String>,
    /// Ordered rows; keys are a subset of `headers`.
    pub content: Vec<Row>,
    pub row_count: usize,
    pub column_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_uploaded: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    /// Human readable size (e.g. `1.2 KB`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<DatasetSource>,
}

/// Format a dataset was ingested from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub enum DatasetKind {
    #[serde(rename = "CSV")]
    Csv,
    Excel,
    #[serde(rename = "JSON")]
    Json,
    Database,
}

impl DatasetKind {
    /// Delimited or table-shaped sources, as opposed to nested documents.
    pub fn is_tabular(self) -> bool {
        !matches!(self, DatasetKind::Json)
    }
}

/// Origin of a dataset imported from a database table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSource {
    #[serde(rename = "type")]
    pub kind: String,
    pub connection_name: String,
    pub table_name: String,
}

impl Dataset {
    /// Build a dataset with counts derived from `headers` and `content`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        headers: Vec<String>,
        content: Vec<Row>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: None,
            row_count: content.len(),
            column_count: headers.len(),
            headers,
            content,
            date_uploaded: None,
            last_updated: None,
            size: None,
            is_public: false,
            source: None,
        }
    }

    pub fn with_kind(mut self, kind: DatasetKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// No rows or no columns to inspect.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() || self.content.is_empty()
    }

    /// Sources without a kind are treated as tabular.
    pub fn is_tabular(&self) -> bool {
        self.kind.map(DatasetKind::is_tabular).unwrap_or(true)
    }

    /// Value of `header` in `row`; an absent key reads as `Value::Null`.
    pub fn cell<'a>(&self, row: &'a Row, header: &str) -> &'a Value {
        row.get(header).unwrap_or(&MISSING)
    }

    /// All values of a column in row order, absent keys included as null.
    pub fn column<'a>(&'a self, header: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.content
            .iter()
            .map(move |row| row.get(header).unwrap_or(&MISSING))
    }

    /// Present (non-missing) values of a column with their 0-based row index.
    pub fn present<'a>(
        &'a self,
        header: &'a str,
    ) -> impl Iterator<Item = (usize, &'a Value)> + 'a {
        self.column(header)
            .enumerate()
            .filter(|(_, value)| !value.is_missing())
    }
}
