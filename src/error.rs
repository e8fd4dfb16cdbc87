//! Error types for link resolution and configuration.
//!
//! A missed pattern, a redirect without `Location` and an upstream error
//! status are not errors; they resolve to `Ok(None)`. Only the conditions
//! below abort a resolution.

use std::path::PathBuf;

/// Errors that abort a resolution.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The connection failed, timed out, or the body could not be read.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The HTTP client could not be built.
    #[error("http client error: {0}")]
    Client(String),

    /// A URL handed to the fetcher could not be turned into a request.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The service kept redirecting past the configured hop limit.
    #[error("too many redirects (limit {limit})")]
    TooManyRedirects { limit: usize },

    /// The host shut the resolution down before it finished.
    #[error("resolution cancelled")]
    Cancelled,
}

impl ResolveError {
    /// True for transport-level failures (connect, read, timeout, bad url).
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_) | Self::InvalidUrl(_))
    }
}

/// Errors loading the TOML config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
