//! Initialize command.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use releaseman_config::{Config, DEFAULT_CONFIG_PATH, save_config};
use tracing::info;

/// Arguments for the init command.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Where to write the config
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,
}

/// Runs the init command.
pub fn run(args: &InitArgs) -> Result<()> {
    if args.config.exists() && !args.force {
        bail!(
            "{} already exists, use --force to overwrite",
            args.config.display()
        );
    }

    save_config(&Config::starter(), &args.config)
        .with_context(|| format!("failed to write {}", args.config.display()))?;

    info!(path = %args.config.display(), "created release config");
    println!("Created {}", args.config.display());
    Ok(())
}
