//! Application configuration.
//!
//! Loaded from an optional TOML file with `MENTOR_*` environment overrides,
//! falling back to defaults everywhere.

use crate::logging::LoggingConfig;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Snapshot storage settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Override for the snapshot directory; None means the platform data dir.
    pub data_dir: Option<PathBuf>,
}

/// Editor behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Debounce window for persisting snapshots after edits, in milliseconds.
    pub autosave_debounce_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            autosave_debounce_ms: 1500,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MentorConfig {
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
    pub editor: EditorConfig,
}

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration: defaults, then the given TOML file (when present),
    /// then `MENTOR_*` environment variables (e.g. `MENTOR_LOGGING__LEVEL`).
    pub fn load(config_file: Option<&Path>) -> Result<MentorConfig, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }
        builder = builder.add_source(Environment::with_prefix("MENTOR").separator("__"));
        builder.build()?.try_deserialize()
    }
}
