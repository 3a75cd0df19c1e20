// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine configuration
//!
//! Read from `rollcall.toml` in the data directory. Every key is optional.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// File name looked up inside the data directory
pub const CONFIG_FILE: &str = "rollcall.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Written into every journal entry; generated when absent
    pub machine_id: String,
    /// Committed transactions between automatic snapshots (0 disables)
    pub snapshot_interval: u64,
    /// Longest an admission waits for its event's gate
    #[serde(with = "humantime_serde")]
    pub admission_timeout: Duration,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            machine_id: uuid::Uuid::new_v4().to_string(),
            snapshot_interval: 1000,
            admission_timeout: Duration::from_secs(5),
            log_filter: "warn".to_string(),
        }
    }
}

impl Config {
    /// Parse a config document
    pub fn from_toml(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `rollcall.toml` from `data_dir`, falling back to defaults
    pub fn load(data_dir: &Path) -> Result<Self, ConfigError> {
        let path = data_dir.join(CONFIG_FILE);
        match std::fs::read_to_string(&path) {
            Ok(text) => Self::from_toml(&text, &path.display().to_string()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.machine_id.trim().is_empty() {
            return Err(ConfigError::Invalid("machine_id must not be blank".into()));
        }
        if self.admission_timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "admission_timeout must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
