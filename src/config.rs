//! Configuration System
//!
//! Layered configuration for the navigation core: built-in defaults, an
//! optional TOML file, and `CHATNAV_*` environment overrides, validated at
//! load. The strategy table itself is code, not configuration; only the
//! validator thresholds and the logging setup are tunable.

use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatnavConfig {
    /// Conversation-entry validation thresholds
    #[serde(default)]
    pub validator: ValidatorConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Thresholds separating genuine conversation entries from icon-only chrome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Minimum bounding-box width (exclusive), device-independent units
    #[serde(default = "default_min_width")]
    pub min_width: f64,

    /// Minimum bounding-box height (exclusive), device-independent units
    #[serde(default = "default_min_height")]
    pub min_height: f64,
}

fn default_min_width() -> f64 {
    50.0
}

fn default_min_height() -> f64 {
    30.0
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            min_width: default_min_width(),
            min_height: default_min_height(),
        }
    }
}

impl ChatnavConfig {
    /// Load configuration with the standard layering.
    ///
    /// Precedence (highest to lowest): environment variables, the given file
    /// (or the default XDG location if present), defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        match path {
            Some(path) => {
                builder = builder.add_source(File::from(path.to_path_buf()));
            }
            None => {
                if let Some(default_path) = Self::default_path() {
                    builder = builder.add_source(File::from(default_path).required(false));
                }
            }
        }

        builder = builder.add_source(Environment::with_prefix("CHATNAV").separator("__"));

        let config: ChatnavConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Default configuration file location (`$XDG_CONFIG_HOME/chatnav/config.toml`).
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "chatnav").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.validator.min_width < 0.0 || self.validator.min_height < 0.0 {
            return Err(ConfigError::Invalid(
                "validator thresholds must be non-negative".to_string(),
            ));
        }
        self.logging.validate()
    }
}
