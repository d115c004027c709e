use chrono::{Duration, TimeZone, Utc};
use qualis_core::{Finding, Report, Status, Summary};
use qualis_eval::{
    EvalError, Grade, ValidationStatus, compare_latest, findings_to_csv, fleet_summary,
    grade, latest_for_dataset, latest_report, most_errors, quality_score, read_findings_csv,
    render_report, trend, validation_status,
};

fn summary(pass: u64, fail: u64, warning: u64, info: u64) -> Summary {
    Summary {
        pass,
        fail,
        warning,
        info,
        total: pass + fail + warning + info,
    }
}

fn report(id: &str, dataset_id: &str, minutes: i64, summary: Summary) -> Report {
    let timestamp = Utc
        .with_ymd_and_hms(2024, 5, 10, 8, 0, 0)
        .single()
        .expect("valid timestamp")
        + Duration::minutes(minutes);
    Report {
        id: id.to_string(),
        dataset_id: dataset_id.to_string(),
        dataset_name: format!("{dataset_id} name"),
        timestamp,
        methods: Vec::new(),
        results: Vec::new(),
        summary,
    }
}

#[test]
fn quality_score_matches_worked_example() {
    assert_eq!(quality_score(&summary(7, 2, 1, 0)), 7.5);
    assert_eq!(grade(&summary(7, 2, 1, 0)), Grade::C);
    assert_eq!(quality_score(&summary(0, 0, 0, 0)), 0.0);
    assert_eq!(quality_score(&summary(10, 0, 0, 0)), 10.0);
}

#[test]
fn quality_score_is_monotonic_in_passes() {
    let mut previous = quality_score(&summary(0, 3, 2, 1));
    for pass in 1..50 {
        let score = quality_score(&summary(pass, 3, 2, 1));
        assert!(score >= previous, "score dropped at pass={pass}");
        previous = score;
    }
}

#[test]
fn compare_latest_reports_deltas() {
    let reports = vec![
        report("rpt-old", "ds-1", 0, summary(5, 4, 0, 0)),
        report("rpt-new", "ds-1", 30, summary(8, 1, 0, 0)),
    ];

    let comparison = compare_latest(&reports).expect("two reports");
    assert_eq!(comparison.latest_id, "rpt-new");
    assert_eq!(comparison.previous_id, "rpt-old");
    assert_eq!(comparison.fail_delta, -3);
    assert_eq!(comparison.pass_delta, 3);
    assert_eq!(comparison.warning_delta, 0);
    assert!((comparison.score_delta - (80.0 / 9.0 - 50.0 / 9.0)).abs() < 1e-9);
}

#[test]
fn compare_latest_needs_two_reports() {
    let err = compare_latest(&[]).expect_err("no reports");
    assert!(matches!(err, EvalError::InsufficientData { available: 0 }));

    let single = vec![report("rpt-1", "ds-1", 0, summary(1, 0, 0, 0))];
    let err = compare_latest(&single).expect_err("one report");
    assert!(matches!(err, EvalError::InsufficientData { available: 1 }));
}

#[test]
fn latest_and_most_errors_break_ties_by_recency() {
    let reports = vec![
        report("rpt-b", "ds-1", 10, summary(1, 3, 0, 0)),
        report("rpt-a", "ds-2", 20, summary(2, 3, 0, 0)),
        report("rpt-c", "ds-1", 5, summary(4, 1, 0, 0)),
    ];

    assert_eq!(latest_report(&reports).map(|r| r.id.as_str()), Some("rpt-a"));
    assert_eq!(most_errors(&reports).map(|r| r.id.as_str()), Some("rpt-a"));
    assert_eq!(
        latest_for_dataset(&reports, "ds-1").map(|r| r.id.as_str()),
        Some("rpt-b")
    );
    assert!(latest_for_dataset(&reports, "ds-9").is_none());
    assert!(latest_report(&[]).is_none());
}

#[test]
fn fleet_summary_excludes_info_from_checks() {
    let reports = vec![
        report("rpt-1", "ds-1", 0, summary(7, 2, 1, 3)),
        report("rpt-2", "ds-2", 5, summary(4, 0, 0, 2)),
    ];

    let fleet = fleet_summary(&reports);
    assert_eq!(fleet.report_count, 2);
    assert_eq!(fleet.total_checks, 14);
    assert_eq!(fleet.total_failures, 2);
    assert_eq!(fleet.total_warnings, 1);
    assert_eq!(fleet.total_info, 5);

    let empty = fleet_summary(&[]);
    assert_eq!(empty.total_checks, 0);
    assert_eq!(empty.average_score, 0.0);
}

#[test]
fn validation_status_follows_latest_report() {
    let mut reports = vec![report("rpt-1", "ds-1", 0, summary(3, 1, 0, 0))];
    assert_eq!(validation_status(&reports, "ds-1"), ValidationStatus::IssuesFound);
    assert_eq!(validation_status(&reports, "ds-2"), ValidationStatus::NotValidated);

    reports.push(report("rpt-2", "ds-1", 10, summary(4, 0, 0, 2)));
    let status = validation_status(&reports, "ds-1");
    assert_eq!(status, ValidationStatus::Validated);
    assert_eq!(status.to_string(), "Validated");
    assert_eq!(ValidationStatus::NotValidated.to_string(), "Not Validated");
    assert_eq!(ValidationStatus::IssuesFound.to_string(), "Issues Found");
}

#[test]
fn trend_is_chronological_per_dataset() {
    let reports = vec![
        report("rpt-3", "ds-1", 20, summary(10, 0, 0, 0)),
        report("rpt-x", "ds-2", 10, summary(1, 1, 0, 0)),
        report("rpt-1", "ds-1", 0, summary(5, 5, 0, 0)),
    ];

    let points = trend(&reports, "ds-1");
    let ids = points.iter().map(|p| p.report_id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["rpt-1", "rpt-3"]);
    assert_eq!(points[0].score, 5.0);
    assert_eq!(points[1].score, 10.0);
}

fn finding(check: &str, status: Status, details: &str) -> Finding {
    Finding {
        id: format!("f-{check}"),
        dataset_id: "ds-1".to_string(),
        check: check.to_string(),
        category: "Quality".to_string(),
        status,
        details: details.to_string(),
        severity: None,
        timestamp: Utc
            .with_ymd_and_hms(2024, 5, 10, 8, 0, 0)
            .single()
            .expect("valid timestamp")
            + Duration::milliseconds(125),
    }
}

#[test]
fn csv_export_reads_back_identically() {
    let findings = vec![
        finding("Row Count", Status::Info, "Dataset contains 3 rows"),
        finding(
            "Placeholder Values",
            Status::Warning,
            "Column note: values \"n/a\", \"-\" found, see rows 1, 2",
        ),
    ];

    let csv = findings_to_csv(&findings).expect("export");
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some(r#""Check","Status","Details","Timestamp""#)
    );
    assert_eq!(
        lines.next(),
        Some(r#""Row Count","Info","Dataset contains 3 rows","2024-05-10T08:00:00.125Z""#)
    );

    let parsed = read_findings_csv(csv.as_bytes()).expect("read back");
    assert_eq!(parsed.len(), 2);
    for (exported, original) in parsed.iter().zip(&findings) {
        assert_eq!(exported.check, original.check);
        assert_eq!(exported.status, original.status);
        assert_eq!(exported.details, original.details);
        assert_eq!(exported.timestamp, original.timestamp);
    }
}

#[test]
fn csv_import_rejects_foreign_headers() {
    let err = read_findings_csv("Name,Value\na,b\n".as_bytes()).expect_err("bad header");
    assert!(matches!(err, EvalError::InvalidExport(_)));
}

#[test]
fn markdown_report_groups_findings_by_category() {
    let mut report = report("rpt-md", "ds-1", 0, summary(0, 0, 1, 1));
    report.results = vec![
        finding("Row Count", Status::Info, "Dataset contains 3 rows"),
        finding("Placeholder Values", Status::Warning, "Column note: 1 placeholder values (33.3%)"),
    ];

    let markdown = render_report(&report, 10);
    assert!(markdown.starts_with("# Validation Report: ds-1 name"));
    assert!(markdown.contains("- quality_score: 2.5 (F)"));
    assert!(markdown.contains("### Quality"));
    assert!(markdown.contains("- [Warning] Placeholder Values: Column note: 1 placeholder values (33.3%)"));
    assert!(markdown.contains("## Recommendations"));
}
