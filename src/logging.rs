//! Structured logging via the `tracing` crate.
//!
//! Configurable level, format (text/json), and destination (stderr, stdout,
//! file). The log file defaults to the platform state directory so CLI
//! output stays clean.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Whether logging is enabled
    pub enabled: bool,
    /// Log level: trace, debug, info, warn, error, off
    pub level: String,
    /// Output format: text, json
    pub format: String,
    /// Output destination: stderr, stdout, file
    pub output: String,
    /// Log file path when output is "file"; None means the platform default
    pub file: Option<PathBuf>,
    /// Colored output (text format, terminal destinations only)
    pub color: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            format: "text".to_string(),
            output: "stderr".to_string(),
            file: None,
            color: true,
        }
    }
}

/// Resolve the log file path: `MENTOR_LOG_FILE` env, then the config value,
/// then the platform state directory default.
pub fn resolve_log_file_path(config_file: Option<PathBuf>) -> Result<PathBuf, ApiError> {
    if let Ok(env_path) = std::env::var("MENTOR_LOG_FILE") {
        if !env_path.is_empty() {
            return Ok(PathBuf::from(env_path));
        }
    }
    if let Some(p) = config_file {
        if !p.as_os_str().is_empty() {
            return Ok(p);
        }
    }
    let dirs = directories::ProjectDirs::from("", "mentor", "mentor").ok_or_else(|| {
        ApiError::Config("could not determine platform state directory for log file".to_string())
    })?;
    let state_dir = dirs
        .state_dir()
        .map(PathBuf::from)
        .unwrap_or_else(|| dirs.data_dir().to_path_buf());
    Ok(state_dir.join("mentor.log"))
}

/// Initialize the global subscriber.
///
/// `MENTOR_LOG` (filter) and `MENTOR_LOG_FORMAT` env vars override the
/// config file.
pub fn init_logging(config: &LoggingConfig) -> Result<(), ApiError> {
    if !config.enabled {
        Registry::default().with(EnvFilter::new("off")).init();
        return Ok(());
    }

    let filter = match EnvFilter::try_from_env("MENTOR_LOG") {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(&config.level),
    };

    let format = match std::env::var("MENTOR_LOG_FORMAT") {
        Ok(f) if f == "json" || f == "text" => f,
        _ => config.format.clone(),
    };
    if format != "json" && format != "text" {
        return Err(ApiError::Config(format!(
            "invalid log format '{}' (must be 'json' or 'text')",
            format
        )));
    }

    let (writer, ansi) = match config.output.as_str() {
        "stdout" => (BoxMakeWriter::new(std::io::stdout), config.color),
        "stderr" => (BoxMakeWriter::new(std::io::stderr), config.color),
        "file" => {
            let path = resolve_log_file_path(config.file.clone())?;
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ApiError::Config(format!("failed to create log directory: {}", e))
                })?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| ApiError::Config(format!("failed to open log file {:?}: {}", path, e)))?;
            (BoxMakeWriter::new(file), false)
        }
        other => {
            return Err(ApiError::Config(format!(
                "invalid log output '{}' (must be 'stderr', 'stdout', or 'file')",
                other
            )));
        }
    };

    let base = Registry::default().with(filter);
    if format == "json" {
        base.with(
            fmt::layer()
                .json()
                .with_target(true)
                .with_timer(ChronoUtc::rfc_3339())
                .with_writer(writer),
        )
        .init();
    } else {
        base.with(
            fmt::layer()
                .with_target(true)
                .with_timer(ChronoUtc::rfc_3339())
                .with_ansi(ansi)
                .with_writer(writer),
        )
        .init();
    }

    Ok(())
}
