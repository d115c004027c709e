use thiserror::Error;

/// Core error type shared across Qualis crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The dataset violates its structural invariants.
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),
    /// The template cannot be stored or run.
    #[error("invalid template: {0}")]
    InvalidTemplate(String),
    /// The report summary disagrees with its results.
    #[error("invalid report: {0}")]
    InvalidReport(String),
    /// A validation method identifier that is not registered.
    #[error("unknown validation method: {0}")]
    UnknownMethod(String),
}

/// Convenience alias for results returned by Qualis crates.
pub type Result<T> = std::result::Result<T, Error>;
