//! Validation engine: check routines, report building and report queries.

pub mod builder;
pub mod checks;
pub mod compare;
pub mod engine;
pub mod errors;
pub mod export;
pub mod model;
pub mod registry;
pub mod report;
pub mod sink;

pub use builder::{Grade, build_report, grade, quality_score};
pub use compare::{
    ComparisonResult, FleetSummary, TrendPoint, ValidationStatus, compare_latest, fleet_summary,
    latest_for_dataset, latest_report, most_errors, trend, validation_status,
};
pub use engine::{ValidationEngine, parse_methods, run_validation, run_validation_ids};
pub use errors::EvalError;
pub use export::{ExportedFinding, findings_to_csv, read_findings_csv, write_findings_csv};
pub use model::{CheckOptions, RunContext};
pub use registry::{run, run_method, run_with};
pub use report::render_report;
pub use sink::FindingSink;
