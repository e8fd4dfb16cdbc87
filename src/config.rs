use crate::api::DEFAULT_TIMEOUT_SECS;
use crate::error::ConfigError;
use crate::location::DEFAULT_MAX_REDIRECTS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub resolver: ResolverConfig,
    pub logging: LoggingConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64, // Per-request timeout, covers connect and body read
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ResolverConfig {
    pub max_redirects: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: Option<PathBuf>, // Daily rolling file here; stderr if unset
    pub level: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: None,
            level: "warn".to_string(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Config {
    /// Loads a TOML config from `path`; no path means defaults.
    ///
    /// Callers fall back to [`Config::default`] on error and report it once
    /// logging is up.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Loaded configuration from {}.", path.display());
        Ok(config)
    }
}
