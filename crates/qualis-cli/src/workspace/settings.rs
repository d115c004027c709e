use std::path::PathBuf;

use qualis_core::Method;
use qualis_eval::CheckOptions;
use qualis_store::atomic::write_bytes_atomic;
use serde::{Deserialize, Serialize};

use super::{WorkspaceError, WorkspacePaths, WorkspaceResult};

/// Contents of `config/settings.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceSettings {
    /// Methods run by `validate` when neither `--method` nor `--template` is given.
    pub default_methods: Vec<Method>,
    pub store_dir: PathBuf,
    /// Filter used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Findings shown per category in markdown output.
    pub max_findings_per_category: usize,
    pub checks: CheckOptions,
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            default_methods: vec![
                Method::Basic,
                Method::DataCompleteness,
                Method::SchemaValidation,
                Method::DataQuality,
            ],
            store_dir: PathBuf::from("store"),
            log_level: "info".to_string(),
            max_findings_per_category: 20,
            checks: CheckOptions::default(),
        }
    }
}

pub fn load_or_create_settings(paths: &WorkspacePaths) -> WorkspaceResult<WorkspaceSettings> {
    let path = paths.settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path)?;
        let settings: WorkspaceSettings = toml::from_str(&content)?;
        if settings.default_methods.is_empty() {
            return Err(WorkspaceError::Invalid(format!(
                "{}: default_methods must not be empty",
                path.display()
            )));
        }
        return Ok(settings);
    }

    let settings = WorkspaceSettings::default();
    save_settings(paths, &settings)?;
    Ok(settings)
}

pub fn save_settings(paths: &WorkspacePaths, settings: &WorkspaceSettings) -> WorkspaceResult<()> {
    let path = paths.settings_path();
    let encoded = toml::to_string_pretty(settings)?;
    write_bytes_atomic(&path, encoded.as_bytes()).map_err(WorkspaceError::from)
}
