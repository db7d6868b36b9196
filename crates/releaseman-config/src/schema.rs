//! Configuration schema.

use serde::{Deserialize, Serialize};

/// Changelog path written by `init`.
pub const DEFAULT_CHANGELOG_PATH: &str = "CHANGELOG.md";

/// Header rendered once at the top of the changelog.
pub const DEFAULT_HEADER_TEMPLATE: &str =
    "## Changelog (Current version: {{ version }})\n\n-----------------\n\n";

/// Block rendered once per commit.
pub const DEFAULT_CONTENT_TEMPLATE: &str =
    "* [{{ short_hash }}] {{ subject }} ({{ author }}, {{ date }})\n";

/// Footer rendered once at the bottom of the changelog.
pub const DEFAULT_FOOTER_TEMPLATE: &str =
    "\n-----------------\n\nGenerated from {{ commit_count }} commits ({{ start_from }}..{{ release_on }})\n";

/// Main configuration structure, the unit of persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Release branches, version and prepared changes.
    #[serde(default)]
    pub release: ReleaseConfig,

    /// Changelog location and templates.
    #[serde(default)]
    pub changelog: ChangelogConfig,
}

/// Release configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Development branch the release is cut from.
    #[serde(rename = "start_from")]
    pub start_from_branch: String,

    /// Branch the release lands on.
    #[serde(rename = "release_on")]
    pub release_on_branch: String,

    /// Version being released.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,

    /// Files changed by `prepare`, to be committed by `create`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<String>,
}

/// Changelog configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Output file path.
    pub path: String,

    /// Template rendered for every commit.
    pub content_template: String,

    /// Template rendered before the commits.
    pub header_template: String,

    /// Template rendered after the commits.
    pub footer_template: String,
}

impl ChangelogConfig {
    /// Returns the changelog configuration written by `init`.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            path: DEFAULT_CHANGELOG_PATH.to_string(),
            content_template: DEFAULT_CONTENT_TEMPLATE.to_string(),
            header_template: DEFAULT_HEADER_TEMPLATE.to_string(),
            footer_template: DEFAULT_FOOTER_TEMPLATE.to_string(),
        }
    }
}

impl Config {
    /// Returns the starter configuration written by `init`: empty branches,
    /// default changelog path and templates.
    #[must_use]
    pub fn starter() -> Self {
        Self {
            release: ReleaseConfig::default(),
            changelog: ChangelogConfig::with_defaults(),
        }
    }

    /// Returns the lines shown to the user for confirmation.
    #[must_use]
    pub fn summary(&self, mode: PrintMode) -> Vec<String> {
        let mut lines = vec![format!(
            " * Start from branch: {}",
            self.release.start_from_branch
        )];
        if mode.shows_release_branch() {
            lines.push(format!(
                " * Release on branch: {}",
                self.release.release_on_branch
            ));
        }
        if !self.release.version.is_empty() {
            lines.push(format!(" * Release version: {}", self.release.version));
        }
        if mode.shows_changelog() {
            lines.push(format!(" * Changelog path: {}", self.changelog.path));
        }
        lines
    }
}

/// Which fields are surfaced for confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMode {
    /// Everything, used by `prepare` and `create`.
    Full,
    /// Fields relevant to `create-changelog`.
    Changelog,
    /// Fields relevant to `create-release`.
    Release,
}

impl PrintMode {
    /// Whether the release branch is part of this mode.
    #[must_use]
    pub fn shows_release_branch(self) -> bool {
        matches!(self, Self::Full | Self::Release)
    }

    /// Whether the changelog path is part of this mode.
    #[must_use]
    pub fn shows_changelog(self) -> bool {
        matches!(self, Self::Full | Self::Changelog)
    }
}
