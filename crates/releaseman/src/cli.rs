//! CLI definition.

use anyhow::Result;
use clap::builder::BoolishValueParser;
use clap::{Parser, Subcommand};
use releaseman_core::RunMode;

use crate::commands;

/// Prepare and finalize releases: version bump, changelog, commit, tag.
#[derive(Debug, Parser)]
#[command(name = "releaseman")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log filter, e.g. `debug` or `releaseman_core=trace`
    #[arg(short, long, env = "LOGLEVEL", default_value = "info", global = true)]
    pub loglevel: String,

    /// Never prompt; abort on missing input or uncommitted changes
    #[arg(long, env = "CI", global = true, value_parser = BoolishValueParser::new())]
    pub ci: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Bump the version, regenerate the changelog and save the release config
    Prepare(commands::ReleaseArgs),

    /// Finish a release: commit, tag and fast-forward the release branch
    Create(commands::ReleaseArgs),

    /// Regenerate the changelog only
    CreateChangelog(commands::CommonArgs),

    /// Commit, tag and fast-forward without touching the changelog
    CreateRelease(commands::ReleaseArgs),

    /// Write a starter release config
    Init(commands::init::InitArgs),
}

impl Cli {
    /// Runs the CLI command.
    pub fn run(self) -> Result<()> {
        let mode = RunMode::from_ci(self.ci);
        match self.command {
            Commands::Prepare(args) => commands::prepare::run(&args, mode),
            Commands::Create(args) => commands::create::run(&args, mode),
            Commands::CreateChangelog(args) => commands::create::run_changelog(&args, mode),
            Commands::CreateRelease(args) => commands::create::run_release(&args, mode),
            Commands::Init(args) => commands::init::run(&args),
        }
    }
}
