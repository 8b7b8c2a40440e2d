//! Error types for the explorer

use sdlc_tree::{DecodeError, ValidationError};
use std::path::PathBuf;

/// Configuration could not be loaded
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid TOML for [`crate::config::ExplorerConfig`]
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// `base_url` is not an absolute URL
    #[error("invalid base_url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A value is out of its allowed range
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors surfaced by explorer operations
#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    /// Malformed tree data
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Rejected user input
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Bad configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A link could not be parsed
    #[error("invalid url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Subscriber could not be installed
    #[error("logging setup failed: {0}")]
    Logging(String),

    /// Id is not part of the current projection
    #[error("no node with id {0} in the current view")]
    UnknownNode(usize),
}

impl ExplorerError {
    /// Stable error code for CLI output
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Decode(err) => err.code(),
            Self::Validation(_) => "VALIDATION",
            Self::Config(_) => "CONFIG",
            Self::InvalidUrl { .. } => "INVALID_URL",
            Self::Logging(_) => "LOGGING",
            Self::UnknownNode(_) => "UNKNOWN_NODE",
        }
    }
}
