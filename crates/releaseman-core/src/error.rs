//! Core error types.

use thiserror::Error;

use crate::WorkflowState;

/// Core-related errors.
///
/// Every variant is terminal for the current invocation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] releaseman_config::ConfigError),

    /// Git error outside of diffing.
    #[error("git error: {0}")]
    Git(#[from] releaseman_git::GitError),

    /// A version script could not be run or exited non-zero.
    #[error("version script `{script}` failed: {reason}")]
    Script { script: String, reason: String },

    /// A version string is not dotted-numeric.
    #[error("invalid version `{version}`: {reason}")]
    VersionParse { version: String, reason: String },

    /// A changelog template is malformed or references an unknown value.
    #[error("changelog template error: {0}")]
    Template(#[from] minijinja::Error),

    /// The commits between the two refs could not be listed.
    #[error("cannot diff {from}..{to}: {source}")]
    Diff {
        from: String,
        to: String,
        #[source]
        source: releaseman_git::GitError,
    },

    /// The user answered "no", or a precondition failed in CI mode.
    #[error("aborted: {0}")]
    UserAborted(String),

    /// A required value is missing and cannot be asked for.
    #[error("missing {field}, pass --{flag}")]
    MissingField {
        field: &'static str,
        flag: &'static str,
    },

    /// The workflow was driven out of order.
    #[error("cannot move from {from} to {to}")]
    InvalidTransition {
        from: WorkflowState,
        to: WorkflowState,
    },

    /// Reading interactive input failed.
    #[error("failed to read input: {0}")]
    Prompt(String),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
