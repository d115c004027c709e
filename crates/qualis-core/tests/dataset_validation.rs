use std::collections::BTreeMap;

use qualis_core::{
    Dataset, DatasetKind, Error, Method, Row, Template, Value, validate_dataset, validate_template,
};

fn row(pairs: &[(&str, Value)]) -> Row {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect::<BTreeMap<_, _>>()
}

fn people() -> Dataset {
    Dataset::new(
        "ds-people",
        "people",
        vec!["name".to_string(), "age".to_string()],
        vec![
            row(&[("name", "Ana".into()), ("age", 31.0.into())]),
            row(&[("name", "Rui".into())]),
        ],
    )
}

#[test]
fn counts_are_derived_from_content() {
    let dataset = people();
    assert_eq!(dataset.row_count, 2);
    assert_eq!(dataset.column_count, 2);
    assert!(validate_dataset(&dataset).is_ok());
}

#[test]
fn absent_keys_read_as_null() {
    let dataset = people();
    let ages = dataset.column("age").cloned().collect::<Vec<_>>();
    assert_eq!(ages, vec![Value::Number(31.0), Value::Null]);
    assert_eq!(dataset.present("age").count(), 1);
}

#[test]
fn rejects_duplicate_headers() {
    let mut dataset = people();
    dataset.headers.push("age".to_string());
    dataset.column_count = 3;
    let err = validate_dataset(&dataset).expect_err("duplicate header");
    assert!(matches!(err, Error::InvalidDataset(message) if message.contains("duplicate header")));
}

#[test]
fn rejects_count_mismatch() {
    let mut dataset = people();
    dataset.row_count = 5;
    assert!(validate_dataset(&dataset).is_err());
}

#[test]
fn rejects_undeclared_row_keys() {
    let mut dataset = people();
    dataset.content[1].insert("email".to_string(), "rui@example.com".into());
    let err = validate_dataset(&dataset).expect_err("undeclared key");
    assert!(err.to_string().contains("row 2"));
}

#[test]
fn deserializes_original_dataset_shape() {
    let json = r#"{
        "id": "db_orders_2024-05-01",
        "name": "orders",
        "type": "Database",
        "columnCount": 2,
        "rowCount": 1,
        "dateUploaded": "2024-05-01",
        "status": "Not Validated",
        "size": "20 B",
        "lastUpdated": "2024-05-01",
        "content": [{"qty": 2, "paid": false}],
        "headers": ["qty", "paid"],
        "isPublic": false,
        "source": {"type": "database", "connectionName": "shop", "tableName": "orders"}
    }"#;
    let dataset: Dataset = serde_json::from_str(json).expect("parse dataset");
    assert_eq!(dataset.kind, Some(DatasetKind::Database));
    assert!(dataset.is_tabular());
    assert_eq!(dataset.content[0]["qty"], Value::Number(2.0));
    assert_eq!(dataset.content[0]["paid"], Value::Bool(false));
    assert_eq!(
        dataset.source.as_ref().map(|source| source.table_name.as_str()),
        Some("orders")
    );
    assert!(validate_dataset(&dataset).is_ok());
}

#[test]
fn template_requires_methods_and_dedups() {
    let err = Template::new("tpl_a", "empty", "", []).expect_err("empty template");
    assert!(matches!(err, Error::InvalidTemplate(_)));

    let template = Template::new(
        "tpl_b",
        "daily",
        "completeness first",
        [Method::DataCompleteness, Method::Basic, Method::DataCompleteness],
    )
    .expect("valid template");
    assert_eq!(
        template.validation_methods,
        vec![Method::DataCompleteness, Method::Basic]
    );
    assert!(validate_template(&template).is_ok());
}
