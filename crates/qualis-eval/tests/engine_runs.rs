use qualis_core::{Dataset, Method, Row, Status, Value};
use qualis_eval::{
    CheckOptions, EvalError, RunContext, ValidationEngine, quality_score, run_validation,
    run_validation_ids,
};
use qualis_store::{MemoryStore, ReportStore};

fn inventory() -> Dataset {
    let headers = ["sku", "qty", "price", "total"];
    let rows = [
        ("A-1", 2.0, 10.0, 20.0),
        ("A-2", 3.0, 20.0, 60.0),
        ("A-3", 4.0, 30.0, 120.0),
        ("A-4", 5.0, 40.0, 200.0),
        ("A-5", 6.0, 50.0, 999.0),
    ];
    let content = rows
        .iter()
        .map(|(sku, qty, price, total)| {
            let mut row = Row::new();
            row.insert("sku".to_string(), Value::from(*sku));
            row.insert("qty".to_string(), Value::from(*qty));
            row.insert("price".to_string(), Value::from(*price));
            row.insert("total".to_string(), Value::from(*total));
            row
        })
        .collect();
    Dataset::new(
        "ds-inventory",
        "inventory",
        headers.iter().map(|header| header.to_string()).collect(),
        content,
    )
}

#[tokio::test]
async fn run_validation_saves_a_consistent_report() {
    let store = MemoryStore::new();
    let dataset = inventory();
    let methods = [Method::Basic, Method::DataCompleteness, Method::CrossColumn];

    let report = run_validation(&store, &dataset, &methods, &CheckOptions::default())
        .await
        .expect("run validation");

    assert_eq!(report.dataset_id, "ds-inventory");
    assert_eq!(report.dataset_name, "inventory");
    assert_eq!(report.methods, methods.to_vec());
    let summary = report.summary;
    assert_eq!(summary.total as usize, report.results.len());
    assert_eq!(
        summary.pass + summary.fail + summary.warning + summary.info,
        summary.total
    );
    assert_eq!(summary.fail, 1, "only the cross-column mismatch fails");
    assert!(report
        .results
        .iter()
        .all(|finding| finding.timestamp == report.timestamp));

    let stored = store.get(&report.id).await.expect("report persisted");
    assert_eq!(stored, report);
}

#[tokio::test]
async fn each_run_produces_fresh_ids() {
    let store = MemoryStore::new();
    let dataset = inventory();
    let options = CheckOptions::default();

    let first = run_validation(&store, &dataset, &[Method::Basic], &options)
        .await
        .expect("first run");
    let second = run_validation(&store, &dataset, &[Method::Basic], &options)
        .await
        .expect("second run");

    assert_ne!(first.id, second.id);
    for (a, b) in first.results.iter().zip(&second.results) {
        assert_ne!(a.id, b.id);
        assert_eq!(a.details, b.details);
    }
    assert_eq!(store.list().await.expect("list").len(), 2);
}

#[tokio::test]
async fn repeated_methods_run_once() {
    let engine = ValidationEngine::new(CheckOptions::default());
    let report = engine
        .evaluate(
            &inventory(),
            &[Method::Basic, Method::Basic, Method::DataQuality],
            &RunContext::new(),
        )
        .expect("evaluate");

    assert_eq!(report.methods, vec![Method::Basic, Method::DataQuality]);
    let mut ids = report
        .results
        .iter()
        .map(|finding| finding.id.as_str())
        .collect::<Vec<_>>();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), report.results.len(), "finding ids are unique");
}

#[tokio::test]
async fn invalid_pattern_aborts_without_saving() {
    let store = MemoryStore::new();
    let mut options = CheckOptions::default();
    options.patterns.insert("sku".to_string(), "A-(".to_string());

    let err = run_validation(
        &store,
        &inventory(),
        &[Method::Basic, Method::RegexPattern],
        &options,
    )
    .await
    .expect_err("invalid regex");

    assert!(matches!(
        err,
        EvalError::InvalidOptions {
            method: Method::RegexPattern,
            ..
        }
    ));
    assert!(store.list().await.expect("list").is_empty());
}

#[tokio::test]
async fn unknown_method_ids_are_rejected_before_running() {
    let store = MemoryStore::new();
    let err = run_validation_ids(
        &store,
        &inventory(),
        &["Basic", "Telepathy"],
        &CheckOptions::default(),
    )
    .await
    .expect_err("unknown method");

    assert!(matches!(err, EvalError::UnknownMethod(name) if name == "Telepathy"));
    assert!(store.list().await.expect("list").is_empty());
}

#[tokio::test]
async fn empty_selection_and_empty_dataset_fail() {
    let store = MemoryStore::new();
    let err = run_validation(&store, &inventory(), &[], &CheckOptions::default())
        .await
        .expect_err("no methods");
    assert!(matches!(err, EvalError::NoMethods));

    let empty = Dataset::new("ds-empty", "empty", Vec::new(), Vec::new());
    let err = run_validation(&store, &empty, &[Method::Basic], &CheckOptions::default())
        .await
        .expect_err("empty dataset");
    assert!(matches!(err, EvalError::EmptyDataset(_)));
}

#[tokio::test]
async fn deleting_unknown_report_returns_false() {
    let store = MemoryStore::new();
    let report = run_validation(&store, &inventory(), &[Method::Basic], &CheckOptions::default())
        .await
        .expect("run");

    assert!(!store.delete("missing-report").await);
    assert!(store.delete(&report.id).await);
    assert!(!store.delete(&report.id).await);
}

#[test]
fn all_methods_run_over_a_clean_dataset() {
    let mut options = CheckOptions::default();
    options.lookups.insert(
        "sku".to_string(),
        ["A-1", "A-2", "A-3", "A-4", "A-5"]
            .iter()
            .map(|sku| sku.to_string())
            .collect(),
    );
    options
        .patterns
        .insert("sku".to_string(), r"A-\d".to_string());

    let report = ValidationEngine::new(options)
        .evaluate(&inventory(), &Method::ALL, &RunContext::new())
        .expect("evaluate");

    assert!(report.summary.is_consistent());
    let fails = report
        .results
        .iter()
        .filter(|finding| finding.status == Status::Fail)
        .map(|finding| finding.details.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        fails,
        vec!["Column total: 1 rows inconsistent with qty * price (row 5)"]
    );
    let score = quality_score(&report.summary);
    assert!(score > 0.0 && score < 10.0);
}
