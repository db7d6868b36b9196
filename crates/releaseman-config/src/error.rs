//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Malformed YAML or unexpected structure.
    #[error("failed to parse release config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The config could not be serialized or written.
    #[error("failed to write release config to {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    /// No home directory to keep the prepared config in.
    #[error("could not determine the user's home directory")]
    NoHomeDir,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
