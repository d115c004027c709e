//! Persistence for reports, templates and the public dataset registry.
//!
//! The engine only depends on the [`ReportStore`] and [`TemplateStore`]
//! contracts; this crate ships an in-memory store for tests and embedding and
//! a directory of JSON documents for the CLI.

pub mod adapter;
pub mod atomic;
pub mod error;
pub mod json;
pub mod memory;

pub use adapter::{DatasetRegistry, ReportStore, TemplateStore};
pub use error::{StoreError, StoreResult};
pub use json::JsonFileStore;
pub use memory::MemoryStore;
