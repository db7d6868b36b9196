//! Command handlers.

pub mod create;
pub mod init;
pub mod prepare;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use releaseman_config::{Config, ConfigOverrides, DEFAULT_CONFIG_PATH, prepared_config_path};
use releaseman_core::{BumpStrategy, CoreResult, RunMode, ShellScripts, Workflow, WorkflowOptions};
use releaseman_git::Repository;
use tracing::debug;

use crate::prompt::LinePrompter;

/// Bump strategy argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BumpArg {
    /// `1.2.3` -> `1.2.4`
    Patch,
    /// `1.2.3` -> `1.3.0`
    Minor,
    /// `1.2.3` -> `2.0.0`
    Major,
}

impl From<BumpArg> for BumpStrategy {
    fn from(arg: BumpArg) -> Self {
        match arg {
            BumpArg::Patch => BumpStrategy::Patch,
            BumpArg::Minor => BumpStrategy::Minor,
            BumpArg::Major => BumpStrategy::Major,
        }
    }
}

/// Flags shared by every release command.
#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Release config file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Branch the release starts from
    #[arg(long = "start_from")]
    pub start_from: Option<String>,

    /// Version to release
    #[arg(long)]
    pub version: Option<String>,

    /// Which part of the detected version to increment
    #[arg(long, value_enum, default_value_t = BumpArg::Patch)]
    pub bump_version: BumpArg,

    /// Script printing the current version
    #[arg(long)]
    pub get_version_script: Option<String>,

    /// Script writing the new version into the project
    #[arg(long)]
    pub set_version_script: Option<String>,

    /// Changelog file to (re)generate
    #[arg(long)]
    pub changelog_path: Option<String>,
}

/// Flags for the commands that publish a release.
#[derive(Debug, Args)]
pub struct ReleaseArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Branch the release lands on
    #[arg(long = "release_on")]
    pub release_on: Option<String>,
}

impl CommonArgs {
    fn options(&self, mode: RunMode) -> Result<WorkflowOptions> {
        let prepared_path =
            prepared_config_path().context("failed to locate the prepared config")?;
        Ok(WorkflowOptions {
            mode,
            config_path: self.config.clone(),
            prepared_path,
            overrides: ConfigOverrides {
                start_from_branch: self.start_from.clone(),
                release_on_branch: None,
                version: self.version.clone(),
                changelog_path: self.changelog_path.clone(),
            },
            bump: self.bump_version.into(),
            get_version_script: self.get_version_script.clone(),
            set_version_script: self.set_version_script.clone(),
        })
    }
}

impl ReleaseArgs {
    fn options(&self, mode: RunMode) -> Result<WorkflowOptions> {
        let mut options = self.common.options(mode)?;
        options.overrides.release_on_branch.clone_from(&self.release_on);
        Ok(options)
    }
}

/// Runs one workflow step against the repository in the current directory.
fn run_workflow(
    name: &str,
    options: WorkflowOptions,
    step: impl FnOnce(&mut Workflow<'_>) -> CoreResult<Config>,
) -> Result<Config> {
    let repo = Repository::discover(".").context("failed to open git repository")?;
    debug!(path = %repo.path().display(), "opened repository");
    let scripts = ShellScripts::new();
    let mut prompter = LinePrompter::stdio();

    let mut workflow = Workflow::new(&repo, &scripts, &mut prompter, options);
    step(&mut workflow).with_context(|| format!("{name} failed"))
}
