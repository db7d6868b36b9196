//! Version bumping and the external version scripts.

use std::fmt;
use std::process::Command;

use tracing::{debug, info};

use crate::{CoreError, CoreResult};

/// Which dotted segment to increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BumpStrategy {
    /// `1.2.3` -> `1.2.4`
    #[default]
    Patch,
    /// `1.2.3` -> `1.3.0`
    Minor,
    /// `1.2.3` -> `2.0.0`
    Major,
}

impl BumpStrategy {
    fn segment(self) -> usize {
        match self {
            Self::Major => 0,
            Self::Minor => 1,
            Self::Patch => 2,
        }
    }
}

impl fmt::Display for BumpStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Major => write!(f, "major"),
            Self::Minor => write!(f, "minor"),
            Self::Patch => write!(f, "patch"),
        }
    }
}

/// Bumps a dotted-numeric version.
///
/// Missing segments are padded with `0`, every segment after the bumped one
/// is reset to `0`, and a leading `v` is kept.
///
/// # Errors
///
/// Returns [`CoreError::VersionParse`] for an empty version or a segment that
/// is not a number.
pub fn bump_version(version: &str, strategy: BumpStrategy) -> CoreResult<String> {
    let parse_err = |reason: String| CoreError::VersionParse {
        version: version.to_string(),
        reason,
    };

    let trimmed = version.trim();
    let (prefix, numeric) = match trimmed.strip_prefix('v') {
        Some(rest) => ("v", rest),
        None => ("", trimmed),
    };
    if numeric.is_empty() {
        return Err(parse_err("empty version".to_string()));
    }

    let mut segments = numeric
        .split('.')
        .map(|segment| {
            segment
                .parse::<u64>()
                .map_err(|_| parse_err(format!("segment `{segment}` is not a number")))
        })
        .collect::<CoreResult<Vec<_>>>()?;

    let idx = strategy.segment();
    if segments.len() <= idx {
        segments.resize(idx + 1, 0);
    }
    segments[idx] = segments[idx]
        .checked_add(1)
        .ok_or_else(|| parse_err(format!("segment {} cannot be incremented", idx + 1)))?;
    for later in &mut segments[idx + 1..] {
        *later = 0;
    }

    let joined = segments
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(".");
    Ok(format!("{prefix}{joined}"))
}

/// Runs the user's get/set version scripts.
pub trait VersionScripts {
    /// Runs `script` and returns its trimmed standard output.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Script`] on spawn failure or non-zero exit.
    fn get_version(&self, script: &str) -> CoreResult<String>;

    /// Runs `script` with `version` as its input. No rollback on failure.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Script`] on spawn failure or non-zero exit.
    fn set_version(&self, script: &str, version: &str) -> CoreResult<()>;
}

/// Environment variable carrying the new version to the set-version script.
pub const NEXT_VERSION_ENV: &str = "next_version";

/// Runs version scripts through `sh -c`.
///
/// The set-version script receives the new version as `$1` and in the
/// `next_version` environment variable.
#[derive(Debug, Clone)]
pub struct ShellScripts {
    shell: String,
}

impl ShellScripts {
    /// Creates a runner using `sh`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shell: "sh".to_string(),
        }
    }

    /// Uses a different shell binary.
    #[must_use]
    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    fn run(&self, script: &str, version: Option<&str>) -> CoreResult<String> {
        let script_err = |reason: String| CoreError::Script {
            script: script.to_string(),
            reason,
        };

        let mut command = Command::new(&self.shell);
        command.arg("-c").arg(script).arg("releaseman");
        if let Some(version) = version {
            command.arg(version).env(NEXT_VERSION_ENV, version);
        }

        debug!(shell = %self.shell, script, "running version script");
        let output = command
            .output()
            .map_err(|e| script_err(format!("failed to start {}: {e}", self.shell)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            let reason = if stderr.is_empty() {
                output.status.to_string()
            } else {
                format!("{}: {stderr}", output.status)
            };
            return Err(script_err(reason));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Default for ShellScripts {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionScripts for ShellScripts {
    fn get_version(&self, script: &str) -> CoreResult<String> {
        let version = self.run(script, None)?;
        info!(%version, "detected current version");
        Ok(version)
    }

    fn set_version(&self, script: &str, version: &str) -> CoreResult<()> {
        self.run(script, Some(version))?;
        info!(%version, "set version");
        Ok(())
    }
}
