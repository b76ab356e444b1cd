//! Configuration loading and validation for the evtjson plugin.
//!
//! The host hands the plugin a free-form config string at init time. It may
//! be empty, a JSON object, or TOML. Developer tooling can instead load a
//! TOML file. Environment variables override either source.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Plugin configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Emit log output. The plugin is silent otherwise.
    #[serde(default)]
    pub verbose: bool,

    /// `tracing` filter directive used when `verbose` is set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Payloads longer than this are treated as absent without parsing.
    /// Unbounded when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_payload_bytes: Option<usize>,
}

fn default_log_filter() -> String {
    "debug".into()
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            log_filter: default_log_filter(),
            max_payload_bytes: None,
        }
    }
}

impl PluginConfig {
    /// Parse the config string passed by the host to `plugin_init`.
    ///
    /// Empty input yields defaults. Input starting with `{` is read as JSON,
    /// anything else as TOML.
    pub fn from_init_string(input: &str) -> Result<Self, ConfigError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        let config: Self = if trimmed.starts_with('{') {
            serde_json::from_str(trimmed).map_err(|e| ConfigError::InitStringError(e.to_string()))?
        } else {
            toml::from_str(trimmed).map_err(|e| ConfigError::InitStringError(e.to_string()))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides:
    /// - `EVTJSON_VERBOSE` (`1`, `true`, `yes` enable; anything else disables)
    /// - `EVTJSON_LOG` (filter directive)
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var("EVTJSON_VERBOSE").ok(),
            std::env::var("EVTJSON_LOG").ok(),
        )
    }

    fn with_overrides(mut self, verbose: Option<String>, log: Option<String>) -> Self {
        if let Some(v) = verbose {
            self.verbose = matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        if let Some(filter) = log.filter(|f| !f.trim().is_empty()) {
            self.log_filter = filter;
        }
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_payload_bytes == Some(0) {
            return Err(ConfigError::ValidationError(
                "max_payload_bytes must be greater than 0".into(),
            ));
        }

        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::ValidationError("log_filter must not be empty".into()));
        }

        Ok(())
    }

    /// Render the default configuration as TOML.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Failed to parse plugin init string: {0}")]
    InitStringError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
