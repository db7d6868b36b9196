//! Finishing commands: `create`, `create-release` and `create-changelog`.

use anyhow::Result;
use releaseman_config::Config;
use releaseman_core::RunMode;
use tracing::info;

use super::{CommonArgs, ReleaseArgs, run_workflow};

/// Runs the create command.
pub fn run(args: &ReleaseArgs, mode: RunMode) -> Result<()> {
    let config = run_workflow("create", args.options(mode)?, |wf| wf.create())?;
    report_release(&config);
    Ok(())
}

/// Runs the create-release command.
pub fn run_release(args: &ReleaseArgs, mode: RunMode) -> Result<()> {
    let config = run_workflow("create-release", args.options(mode)?, |wf| {
        wf.create_release()
    })?;
    report_release(&config);
    Ok(())
}

/// Runs the create-changelog command.
pub fn run_changelog(args: &CommonArgs, mode: RunMode) -> Result<()> {
    let config = run_workflow(
        "create-changelog",
        args.options(mode)?,
        |wf| wf.create_changelog(),
    )?;
    info!(path = %config.changelog.path, "changelog created");
    Ok(())
}

fn report_release(config: &Config) {
    info!(
        version = %config.release.version,
        branch = %config.release.release_on_branch,
        "release created"
    );
}
