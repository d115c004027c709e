mod ids;
mod paths;
mod settings;

pub use ids::new_template_id;
pub use paths::WorkspacePaths;
pub use settings::{WorkspaceSettings, load_or_create_settings, save_settings};

use std::io;

use qualis_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("toml encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
    #[error("write failed: {0}")]
    Write(#[from] StoreError),
    #[error("invalid workspace state: {0}")]
    Invalid(String),
}

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;
