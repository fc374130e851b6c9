//! Logging System
//!
//! Structured logging via the `tracing` crate. Every shortcut outcome is a
//! log event rather than a channel response, so the subscriber setup here is
//! the only place diagnostics surface. Level and format come from
//! configuration with `CHATNAV_LOG*` environment overrides.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Master switch; `false` skips subscriber installation entirely
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path (when output is "file")
    #[serde(default = "default_log_file")]
    pub file: PathBuf,

    /// Enable colored output (text format, terminal outputs only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("chatnav.log")
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: default_log_file(),
            color: default_true(),
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        const LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];
        if !LEVELS.contains(&self.level.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "invalid log level: {} (must be one of {:?})",
                self.level, LEVELS
            )));
        }
        if self.format != "json" && self.format != "text" {
            return Err(ConfigError::Invalid(format!(
                "invalid log format: {} (must be 'json' or 'text')",
                self.format
            )));
        }
        if !["stdout", "stderr", "file"].contains(&self.output.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "invalid log output: {} (must be 'stdout', 'stderr', or 'file')",
                self.output
            )));
        }
        Ok(())
    }
}

/// Initialize the logging system.
///
/// Priority order: `CHATNAV_LOG` env filter, then the config level, then the
/// "info" default. Must be called at most once per process.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), ConfigError> {
    if let Some(config) = config {
        if !config.enabled {
            return Ok(());
        }
    }

    let filter = build_env_filter(config)?;
    let format = std::env::var("CHATNAV_LOG_FORMAT")
        .ok()
        .filter(|f| f == "json" || f == "text")
        .unwrap_or_else(|| config.map(|c| c.format.clone()).unwrap_or_else(default_format));
    let output = config.map(|c| c.output.clone()).unwrap_or_else(default_output);
    let use_color = config.map(|c| c.color).unwrap_or(true);

    let base = Registry::default().with(filter);

    let open_log_file = || -> Result<std::fs::File, ConfigError> {
        let path = config.map(|c| c.file.clone()).unwrap_or_else(default_log_file);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?)
    };

    if format == "json" {
        match output.as_str() {
            "file" => base
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_writer(open_log_file()?),
                )
                .init(),
            "stdout" => base
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_writer(std::io::stdout),
                )
                .init(),
            _ => base
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_writer(std::io::stderr),
                )
                .init(),
        }
    } else {
        match output.as_str() {
            "file" => base
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_ansi(false)
                        .with_writer(open_log_file()?),
                )
                .init(),
            "stdout" => base
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_ansi(use_color)
                        .with_writer(std::io::stdout),
                )
                .init(),
            _ => base
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_ansi(use_color)
                        .with_writer(std::io::stderr),
                )
                .init(),
        }
    }

    Ok(())
}

/// Build the level filter from the environment or config.
fn build_env_filter(config: Option<&LoggingConfig>) -> Result<EnvFilter, ConfigError> {
    if let Ok(filter) = EnvFilter::try_from_env("CHATNAV_LOG") {
        return Ok(filter);
    }

    let level = config.map(|c| c.level.as_str()).unwrap_or("info");
    Ok(EnvFilter::new(level))
}
