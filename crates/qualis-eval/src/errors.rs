use qualis_core::Method;
use qualis_store::StoreError;
use thiserror::Error;

/// Errors emitted by the validation engine.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("dataset '{0}' has no rows or no columns")]
    EmptyDataset(String),
    #[error("unknown validation method: {0}")]
    UnknownMethod(String),
    #[error("no validation methods selected")]
    NoMethods,
    #[error("invalid options for {method}: {message}")]
    InvalidOptions { method: Method, message: String },
    #[error("persistence failure: {0}")]
    Persistence(#[from] StoreError),
    #[error("insufficient data: {available} report(s) available, at least 2 required")]
    InsufficientData { available: usize },
    #[error("invalid export: {0}")]
    InvalidExport(String),
    #[error("core error: {0}")]
    Core(qualis_core::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<qualis_core::Error> for EvalError {
    fn from(value: qualis_core::Error) -> Self {
        match value {
            qualis_core::Error::UnknownMethod(name) => EvalError::UnknownMethod(name),
            other => EvalError::Core(other),
        }
    }
}
