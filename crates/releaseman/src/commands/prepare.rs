//! Prepare command.

use anyhow::Result;
use releaseman_core::RunMode;
use tracing::info;

use super::{ReleaseArgs, run_workflow};

/// Runs the prepare command.
pub fn run(args: &ReleaseArgs, mode: RunMode) -> Result<()> {
    let config = run_workflow("prepare", args.options(mode)?, |wf| wf.prepare())?;

    info!(
        version = %config.release.version,
        changes = config.release.changes.len(),
        "release prepared"
    );
    for path in &config.release.changes {
        info!(%path, "changed");
    }

    println!("Review the changes, then run: releaseman create");
    Ok(())
}
