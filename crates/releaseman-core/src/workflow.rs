//! Release workflow controller.
//!
//! `prepare` resolves the release parameters, runs the set-version script,
//! regenerates the changelog and saves the resulting config (with the files
//! it changed) to the prepared-config path. The finishing commands pick that
//! config up, or do the same steps themselves when no prepare ran, and then
//! commit, tag and fast-forward the release branch.

use std::path::PathBuf;

use releaseman_config::{
    Config, ConfigOverrides, PrintMode, load_or_default, remove_prepared_config, save_config,
};
use releaseman_git::GitProvider;
use tracing::{debug, info, warn};

use crate::{
    BumpStrategy, CoreError, CoreResult, Prompter, RunMode, VersionScripts, WorkflowState,
    bump_version, diff_changes, generate_changelog,
};

/// Inputs shared by every workflow command.
#[derive(Debug, Clone, Default)]
pub struct WorkflowOptions {
    /// Interactive or CI.
    pub mode: RunMode,
    /// User release config (`--config`).
    pub config_path: PathBuf,
    /// Where `prepare` leaves its config for the finishing commands.
    pub prepared_path: PathBuf,
    /// Values given on the command line.
    pub overrides: ConfigOverrides,
    /// How to derive the next version from the detected one.
    pub bump: BumpStrategy,
    /// Prints the current version.
    pub get_version_script: Option<String>,
    /// Writes the new version into the project.
    pub set_version_script: Option<String>,
}

/// One release invocation.
pub struct Workflow<'a> {
    git: &'a dyn GitProvider,
    scripts: &'a dyn VersionScripts,
    prompter: &'a mut dyn Prompter,
    options: WorkflowOptions,
    state: WorkflowState,
}

impl<'a> Workflow<'a> {
    /// Creates an idle workflow.
    pub fn new(
        git: &'a dyn GitProvider,
        scripts: &'a dyn VersionScripts,
        prompter: &'a mut dyn Prompter,
        options: WorkflowOptions,
    ) -> Self {
        Self {
            git,
            scripts,
            prompter,
            options,
            state: WorkflowState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> WorkflowState {
        self.state
    }

    /// Runs the prepare step and returns the saved config.
    ///
    /// # Errors
    ///
    /// Any failure aborts the workflow. Side effects already made (version
    /// script, changelog file) are not rolled back.
    pub fn prepare(&mut self) -> CoreResult<Config> {
        self.guarded(Self::run_prepare)
    }

    /// Regenerates the changelog from the prepared config, or from the config
    /// file when nothing was prepared. The prepared config is kept.
    ///
    /// # Errors
    ///
    /// Any failure aborts the workflow.
    pub fn create_changelog(&mut self) -> CoreResult<Config> {
        self.guarded(|wf| wf.run_finalize(PrintMode::Changelog))
    }

    /// Commits the release changes, tags the version and fast-forwards the
    /// release branch.
    ///
    /// # Errors
    ///
    /// Any failure aborts the workflow.
    pub fn create_release(&mut self) -> CoreResult<Config> {
        self.guarded(|wf| wf.run_finalize(PrintMode::Release))
    }

    /// Like [`Workflow::create_release`], but also regenerates the changelog
    /// when no prepare step ran.
    ///
    /// # Errors
    ///
    /// Any failure aborts the workflow.
    pub fn create(&mut self) -> CoreResult<Config> {
        self.guarded(|wf| wf.run_finalize(PrintMode::Full))
    }

    fn guarded<T>(&mut self, step: impl FnOnce(&mut Self) -> CoreResult<T>) -> CoreResult<T> {
        let result = step(self);
        if let Err(e) = &result
            && !self.state.is_terminal()
        {
            debug!(from = %self.state, error = %e, "aborting workflow");
            self.state = WorkflowState::Aborted;
        }
        result
    }

    fn advance(&mut self, to: WorkflowState) -> CoreResult<()> {
        self.state = self.state.transition(to)?;
        debug!(state = %self.state, "workflow state changed");
        Ok(())
    }

    fn run_prepare(&mut self) -> CoreResult<Config> {
        self.advance(WorkflowState::Preparing)?;

        let before = self.git.changed_files()?;
        self.check_uncommitted(&before)?;

        let base = load_or_default(&self.options.config_path)?;
        let mut config = self.options.overrides.merge(base);
        self.fill(&mut config, PrintMode::Full, true)?;
        self.confirm(&config, PrintMode::Full)?;

        self.apply_version(&config)?;
        generate_changelog(self.git, &config)?;

        let after = self.git.changed_files()?;
        config.release.changes = diff_changes(&after, &before);
        info!(count = config.release.changes.len(), "collected release changes");

        save_config(&config, &self.options.prepared_path)?;
        info!(path = %self.options.prepared_path.display(), "saved prepared config");

        self.advance(WorkflowState::Prepared)?;
        Ok(config)
    }

    fn run_finalize(&mut self, mode: PrintMode) -> CoreResult<Config> {
        let prepared = self.options.prepared_path.exists();
        let base = if prepared {
            info!(path = %self.options.prepared_path.display(), "using prepared config");
            self.advance(WorkflowState::Prepared)?;
            load_or_default(&self.options.prepared_path)?
        } else {
            load_or_default(&self.options.config_path)?
        };
        self.advance(WorkflowState::Finalizing)?;

        let mut config = self.options.overrides.merge(base);
        let releasing = mode != PrintMode::Changelog;
        let run_steps = releasing && !prepared && config.release.changes.is_empty();

        let before = if run_steps {
            let before = self.git.changed_files()?;
            self.check_uncommitted(&before)?;
            before
        } else {
            Vec::new()
        };

        self.fill(&mut config, mode, !prepared)?;
        self.confirm(&config, mode)?;

        if releasing {
            if run_steps {
                self.apply_version(&config)?;
                if mode == PrintMode::Full {
                    generate_changelog(self.git, &config)?;
                }
                let after = self.git.changed_files()?;
                config.release.changes = diff_changes(&after, &before);
            }
            self.publish(&config)?;
            remove_prepared_config(&self.options.prepared_path)?;
        } else {
            generate_changelog(self.git, &config)?;
        }

        self.advance(WorkflowState::Done)?;
        Ok(config)
    }

    fn check_uncommitted(&mut self, changes: &[String]) -> CoreResult<()> {
        if changes.is_empty() {
            return Ok(());
        }

        warn!(count = changes.len(), "working tree has uncommitted changes");
        for path in changes {
            info!(%path, "uncommitted");
        }

        if !self.options.mode.is_interactive() {
            return Err(CoreError::UserAborted(
                "uncommitted changes in the working tree".to_string(),
            ));
        }
        if self
            .prompter
            .confirm("There are uncommitted changes. Continue anyway?", false)?
        {
            Ok(())
        } else {
            Err(CoreError::UserAborted("uncommitted changes".to_string()))
        }
    }

    /// Fills missing fields in order: start branch, release branch, version,
    /// changelog path.
    fn fill(
        &mut self,
        config: &mut Config,
        mode: PrintMode,
        detect_version: bool,
    ) -> CoreResult<()> {
        self.require(
            &mut config.release.start_from_branch,
            "start branch",
            "start_from",
        )?;
        if mode.shows_release_branch() {
            self.require(
                &mut config.release.release_on_branch,
                "release branch",
                "release_on",
            )?;
        }
        if detect_version {
            self.detect_version(config)?;
        }
        self.require(&mut config.release.version, "release version", "version")?;
        if mode.shows_changelog() {
            self.require(&mut config.changelog.path, "changelog path", "changelog-path")?;
        }
        Ok(())
    }

    fn detect_version(&self, config: &mut Config) -> CoreResult<()> {
        let Some(script) = &self.options.get_version_script else {
            return Ok(());
        };

        let current = self.scripts.get_version(script)?;
        let next = bump_version(&current, self.options.bump)?;
        if !config.release.version.is_empty() && config.release.version != next {
            warn!(
                given = %config.release.version,
                detected = %current,
                %next,
                "ignoring given version in favour of the bumped one"
            );
        }
        info!(%current, %next, bump = %self.options.bump, "bumped version");
        config.release.version = next;
        Ok(())
    }

    fn require(
        &mut self,
        value: &mut String,
        field: &'static str,
        flag: &'static str,
    ) -> CoreResult<()> {
        if !value.is_empty() {
            return Ok(());
        }
        if !self.options.mode.is_interactive() {
            return Err(CoreError::MissingField { field, flag });
        }

        let answer = self.prompter.ask(&format!("Enter the {field}"))?;
        if answer.is_empty() {
            return Err(CoreError::MissingField { field, flag });
        }
        *value = answer;
        Ok(())
    }

    fn confirm(&mut self, config: &Config, mode: PrintMode) -> CoreResult<()> {
        info!("release configuration:");
        for line in config.summary(mode) {
            info!("{line}");
        }

        if !self.options.mode.is_interactive() {
            return Ok(());
        }
        if self.prompter.confirm("Are you ready to continue?", true)? {
            Ok(())
        } else {
            Err(CoreError::UserAborted("declined by user".to_string()))
        }
    }

    fn apply_version(&self, config: &Config) -> CoreResult<()> {
        match &self.options.set_version_script {
            Some(script) => self.scripts.set_version(script, &config.release.version),
            None => Ok(()),
        }
    }

    fn publish(&self, config: &Config) -> CoreResult<()> {
        let release = &config.release;
        let message = commit_message(&release.version);

        match self.git.commit_paths(&release.changes, &message)? {
            Some(id) => info!(commit = %id, %message, "committed release changes"),
            None => info!("no release changes to commit"),
        }

        self.git.tag_head(&release.version)?;
        info!(tag = %release.version, "tagged release");

        self.git
            .fast_forward_to_head(&release.release_on_branch)
            .map_err(|source| CoreError::Diff {
                from: "HEAD".to_string(),
                to: release.release_on_branch.clone(),
                source,
            })?;
        info!(branch = %release.release_on_branch, "release branch updated");
        Ok(())
    }
}

/// `v<version>`, without doubling a `v` the version already carries.
fn commit_message(version: &str) -> String {
    if version.starts_with('v') {
        version.to_string()
    } else {
        format!("v{version}")
    }
}
