use std::io;

use thiserror::Error;

/// Errors raised at the persistence boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("rejected document: {0}")]
    Invalid(#[from] qualis_core::Error),
    #[error("invalid id: {0:?}")]
    InvalidId(String),
    #[error("store task failed: {0}")]
    Task(String),
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
