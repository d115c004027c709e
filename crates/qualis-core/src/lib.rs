//! Core contracts for Qualis.
//!
//! This crate defines the dataset model consumed by the validation engine,
//! the finding/report/template types it produces, and the invariant checks
//! shared by the store, the engine and the CLI.

pub mod dataset;
pub mod error;
pub mod finding;
pub mod method;
pub mod report;
pub mod template;
pub mod validation;
pub mod value;

pub use dataset::{Dataset, DatasetKind, DatasetSource, Row};
pub use error::{Error, Result};
pub use finding::{Finding, Severity, Status};
pub use method::Method;
pub use report::{Report, Summary};
pub use template::Template;
pub use validation::{validate_dataset, validate_report, validate_template};
pub use value::Value;

/// Contract version for persisted report documents.
pub const REPORT_VERSION: &str = "0.1";
