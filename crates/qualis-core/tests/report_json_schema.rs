use chrono::{TimeZone, Utc};
use jsonschema::JSONSchema;
use qualis_core::{Finding, Method, Report, Status, Summary, Template};
use schemars::schema_for;

fn sample_report() -> Report {
    let timestamp = Utc
        .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    let results = vec![
        Finding {
            id: "f-1".to_string(),
            dataset_id: "ds-1".to_string(),
            check: "Missing Values".to_string(),
            category: "Completeness".to_string(),
            status: Status::Info,
            details: "Column age: 2 missing values (20%)".to_string(),
            severity: Some(qualis_core::Severity::Low),
            timestamp,
        },
        Finding {
            id: "f-2".to_string(),
            dataset_id: "ds-1".to_string(),
            check: "Row Count".to_string(),
            category: "Basic".to_string(),
            status: Status::Info,
            details: "Dataset contains 10 rows".to_string(),
            severity: None,
            timestamp,
        },
    ];
    Report {
        id: "rpt-1".to_string(),
        dataset_id: "ds-1".to_string(),
        dataset_name: "people".to_string(),
        timestamp,
        methods: vec![Method::DataCompleteness, Method::Basic],
        summary: Summary::from_findings(&results),
        results,
    }
}

#[test]
fn serialized_report_matches_generated_schema() {
    let schema = serde_json::to_value(schema_for!(Report)).expect("serialize schema");
    let compiled = JSONSchema::compile(&schema).expect("compile report schema");

    let report = serde_json::to_value(sample_report()).expect("serialize report");
    assert!(compiled.is_valid(&report), "report does not match its schema");
}

#[test]
fn serialized_template_matches_generated_schema() {
    let schema = serde_json::to_value(schema_for!(Template)).expect("serialize schema");
    let compiled = JSONSchema::compile(&schema).expect("compile template schema");

    let template = Template::new("tpl_1", "nightly", "", [Method::Basic, Method::CrossColumn])
        .expect("valid template");
    let json = serde_json::to_value(template).expect("serialize template");
    assert!(compiled.is_valid(&json));
}

#[test]
fn report_uses_camel_case_contract_fields() {
    let json = serde_json::to_value(sample_report()).expect("serialize report");
    assert_eq!(json["datasetId"], "ds-1");
    assert_eq!(json["datasetName"], "people");
    assert_eq!(json["summary"]["total"], 2);
    assert_eq!(json["results"][0]["status"], "Info");
    assert_eq!(json["results"][0]["severity"], "low");
    assert!(json["results"][1].get("severity").is_none());
    assert_eq!(json["methods"][0], "DataCompleteness");
}
