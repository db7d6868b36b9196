//! Core library for Releaseman.
//!
//! This crate provides the release workflow: the `prepare` step that bumps
//! the version and regenerates the changelog, and the finishing steps that
//! commit, tag and fast-forward the release branch.

mod changelog;
mod changes;
mod error;
mod mode;
mod prompt;
mod state;
mod version;
mod workflow;

pub use changelog::{ChangelogGenerator, ReleaseInfo, generate_changelog};
pub use changes::diff_changes;
pub use error::{CoreError, CoreResult};
pub use mode::RunMode;
pub use prompt::Prompter;
pub use state::WorkflowState;
pub use version::{BumpStrategy, ShellScripts, VersionScripts, bump_version};
pub use workflow::{Workflow, WorkflowOptions};
