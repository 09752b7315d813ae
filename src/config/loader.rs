use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// `<config dir>/composable-ribs/config.toml`, relative to the working
    /// directory on platforms without a config dir.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("composable-ribs").join("config.toml")
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Parse and validate `path`. A missing file is not an error: hosts that
    /// never ship a config run on defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Rejects an empty log filter and a drain poll interval that is zero or
    /// longer than the drain timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "logging.filter is empty".to_string(),
            });
        }

        let lifecycle = &self.lifecycle;
        if lifecycle.drain_poll_interval_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "lifecycle.drain_poll_interval_ms is zero".to_string(),
            });
        }

        if lifecycle.drain_poll_interval_ms > lifecycle.drain_timeout_ms {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "drain_poll_interval_ms ({}) exceeds drain_timeout_ms ({})",
                    lifecycle.drain_poll_interval_ms, lifecycle.drain_timeout_ms
                ),
            });
        }

        Ok(())
    }
}
