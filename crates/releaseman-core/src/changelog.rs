//! Changelog generation.
//!
//! The changelog is always regenerated in full from the commits between the
//! two configured refs: header, one content block per commit, footer. Only
//! values derived from the refs and the config reach the templates, so two
//! runs against the same refs produce identical bytes.

use minijinja::{Environment, UndefinedBehavior, Value, context};
use releaseman_config::{
    ChangelogConfig, Config, DEFAULT_CONTENT_TEMPLATE, DEFAULT_FOOTER_TEMPLATE,
    DEFAULT_HEADER_TEMPLATE, write_atomic,
};
use releaseman_git::{Commit, GitProvider};
use tracing::{debug, info};

use crate::{CoreError, CoreResult};

/// Release values available to every template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    /// Version being released.
    pub version: String,
    /// Ref the diff starts from.
    pub start_from: String,
    /// Ref the diff ends at.
    pub release_on: String,
}

impl ReleaseInfo {
    /// Extracts the release values from a resolved config. An unset release
    /// branch means `HEAD`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let release_on = match config.release.release_on_branch.as_str() {
            "" => HEAD.to_string(),
            branch => branch.to_string(),
        };
        Self {
            version: config.release.version.clone(),
            start_from: config.release.start_from_branch.clone(),
            release_on,
        }
    }
}

const HEAD: &str = "HEAD";
const HEADER: &str = "header";
const CONTENT: &str = "content";
const FOOTER: &str = "footer";

/// Renders changelog text from commits.
pub struct ChangelogGenerator<'a> {
    env: Environment<'a>,
}

impl<'a> ChangelogGenerator<'a> {
    /// Creates a generator from the configured templates, falling back to the
    /// built-in template for any that is empty.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Template`] if a template does not parse.
    pub fn new(config: &'a ChangelogConfig) -> CoreResult<Self> {
        fn pick<'s>(configured: &'s str, fallback: &'static str) -> &'s str {
            if configured.is_empty() {
                fallback
            } else {
                configured
            }
        }

        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.add_template(HEADER, pick(&config.header_template, DEFAULT_HEADER_TEMPLATE))?;
        env.add_template(CONTENT, pick(&config.content_template, DEFAULT_CONTENT_TEMPLATE))?;
        env.add_template(FOOTER, pick(&config.footer_template, DEFAULT_FOOTER_TEMPLATE))?;

        Ok(Self { env })
    }

    /// Renders the full changelog.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Template`] if rendering fails, e.g. on an unknown
    /// placeholder.
    pub fn render(&self, release: &ReleaseInfo, commits: &[Commit]) -> CoreResult<String> {
        let shared = context! {
            version => &release.version,
            start_from => &release.start_from,
            release_on => &release.release_on,
            commit_count => commits.len(),
        };

        let mut out = self.render_one(HEADER, shared.clone())?;
        for commit in commits {
            let ctx = context! {
                hash => &commit.hash,
                short_hash => commit.short_hash(),
                subject => commit.subject(),
                body => commit.body().unwrap_or_default(),
                message => commit.message.trim_end(),
                author => &commit.author,
                email => &commit.email,
                date => commit.date.format("%Y-%m-%d").to_string(),
                files => &commit.files,
                ..shared.clone()
            };
            out.push_str(&self.render_one(CONTENT, ctx)?);
        }
        out.push_str(&self.render_one(FOOTER, shared)?);

        Ok(out)
    }

    fn render_one(&self, name: &str, ctx: Value) -> CoreResult<String> {
        Ok(self.env.get_template(name)?.render(ctx)?)
    }
}

/// Regenerates the changelog file for a resolved config.
///
/// Lists the commits reachable from the release branch but not from the
/// start branch, renders them and overwrites the configured path.
///
/// # Errors
///
/// Returns [`CoreError::Diff`] if either ref cannot be resolved,
/// [`CoreError::Template`] on template problems and a config write error if
/// the file cannot be written.
pub fn generate_changelog(git: &dyn GitProvider, config: &Config) -> CoreResult<String> {
    let release = ReleaseInfo::from_config(config);
    let generator = ChangelogGenerator::new(&config.changelog)?;

    let commits = git
        .commits_between(&release.start_from, &release.release_on)
        .map_err(|source| CoreError::Diff {
            from: release.start_from.clone(),
            to: release.release_on.clone(),
            source,
        })?;
    debug!(count = commits.len(), "collected commits for changelog");

    let changelog = generator.render(&release, &commits)?;
    write_atomic(&config.changelog.path, changelog.as_bytes())?;

    info!(
        path = %config.changelog.path,
        commits = commits.len(),
        "generated changelog"
    );
    Ok(changelog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use releaseman_config::ReleaseConfig;
    use releaseman_git::{GitError, GitResult};
    use std::fs;
    use tempfile::TempDir;

    struct StaticGit {
        commits: Vec<Commit>,
    }

    impl GitProvider for StaticGit {
        fn changed_files(&self) -> GitResult<Vec<String>> {
            Ok(Vec::new())
        }

        fn commits_between(&self, from: &str, to: &str) -> GitResult<Vec<Commit>> {
            for name in [from, to] {
                if !["develop", "master", "HEAD"].contains(&name) {
                    return Err(GitError::RefNotFound(name.to_string()));
                }
            }
            Ok(self.commits.clone())
        }

        fn commit_paths(&self, _paths: &[String], _message: &str) -> GitResult<Option<String>> {
            Ok(None)
        }

        fn tag_head(&self, _name: &str) -> GitResult<()> {
            Ok(())
        }

        fn fast_forward_to_head(&self, _branch: &str) -> GitResult<()> {
            Ok(())
        }
    }

    fn commits() -> Vec<Commit> {
        vec![
            Commit::new(
                "1111111aaaaaaa",
                "Add export command\n\nLong description",
                "Alice",
                "alice@example.com",
                Utc.with_ymd_and_hms(2024, 3, 2, 10, 0, 0).unwrap(),
            )
            .with_files(vec!["src/export.rs".to_string(), "README.md".to_string()]),
            Commit::new(
                "2222222bbbbbbb",
                "Fix crash on empty input",
                "Bob",
                "bob@example.com",
                Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
            ),
        ]
    }

    fn release() -> ReleaseInfo {
        ReleaseInfo {
            version: "1.3.0".to_string(),
            start_from: "develop".to_string(),
            release_on: "master".to_string(),
        }
    }

    fn config_at(dir: &TempDir, changelog: ChangelogConfig) -> Config {
        Config {
            release: ReleaseConfig {
                start_from_branch: "develop".to_string(),
                release_on_branch: "master".to_string(),
                version: "1.3.0".to_string(),
                changes: Vec::new(),
            },
            changelog: ChangelogConfig {
                path: dir.path().join("CHANGELOG.md").display().to_string(),
                ..changelog
            },
        }
    }

    #[test]
    fn test_render_default_templates() {
        let config = ChangelogConfig::default();
        let generator = ChangelogGenerator::new(&config).unwrap();
        let out = generator.render(&release(), &commits()).unwrap();

        assert_eq!(
            out,
            "## Changelog (Current version: 1.3.0)\n\n-----------------\n\n\
             * [1111111] Add export command (Alice, 2024-03-02)\n\
             * [2222222] Fix crash on empty input (Bob, 2024-03-01)\n\
             \n-----------------\n\n\
             Generated from 2 commits (develop..master)\n"
        );
    }

    #[test]
    fn test_render_custom_templates_with_files() {
        let config = ChangelogConfig {
            header_template: "# {{ version }}\n".to_string(),
            content_template:
                "- {{ subject }} by {{ author }} <{{ email }}>{% for f in files %} [{{ f }}]{% endfor %}\n"
                    .to_string(),
            footer_template: "({{ commit_count }})\n".to_string(),
            ..ChangelogConfig::default()
        };
        let generator = ChangelogGenerator::new(&config).unwrap();

        let out = generator.render(&release(), &commits()).unwrap();

        assert_eq!(
            out,
            "# 1.3.0\n\
             - Add export command by Alice <alice@example.com> [src/export.rs] [README.md]\n\
             - Fix crash on empty input by Bob <bob@example.com>\n\
             (2)\n"
        );
    }

    #[test]
    fn test_render_body() {
        let config = ChangelogConfig {
            header_template: "H\n".to_string(),
            content_template: "{{ subject }}|{{ body }}\n".to_string(),
            footer_template: "F\n".to_string(),
            ..ChangelogConfig::default()
        };
        let generator = ChangelogGenerator::new(&config).unwrap();

        let out = generator.render(&release(), &commits()).unwrap();

        assert_eq!(
            out,
            "H\nAdd export command|Long description\nFix crash on empty input|\nF\n"
        );
    }

    #[test]
    fn test_render_no_commits() {
        let config = ChangelogConfig {
            header_template: "H\n".to_string(),
            content_template: "C\n".to_string(),
            footer_template: "F\n".to_string(),
            ..ChangelogConfig::default()
        };
        let generator = ChangelogGenerator::new(&config).unwrap();

        assert_eq!(generator.render(&release(), &[]).unwrap(), "H\nF\n");
    }

    #[test]
    fn test_malformed_template() {
        let config = ChangelogConfig {
            content_template: "{{ subject ".to_string(),
            ..ChangelogConfig::default()
        };
        assert!(matches!(
            ChangelogGenerator::new(&config),
            Err(CoreError::Template(_))
        ));
    }

    #[test]
    fn test_unknown_placeholder() {
        let config = ChangelogConfig {
            content_template: "{{ no_such_field }}".to_string(),
            ..ChangelogConfig::default()
        };
        let generator = ChangelogGenerator::new(&config).unwrap();

        let result = generator.render(&release(), &commits());
        assert!(matches!(result, Err(CoreError::Template(_))));
    }

    #[test]
    fn test_generate_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_at(&temp_dir, ChangelogConfig::default());
        let git = StaticGit { commits: commits() };

        let out = generate_changelog(&git, &config).unwrap();

        assert_eq!(fs::read_to_string(&config.changelog.path).unwrap(), out);
    }

    #[test]
    fn test_generate_overwrites_existing_content() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_at(&temp_dir, ChangelogConfig::default());
        fs::write(&config.changelog.path, "stale content\n").unwrap();
        let git = StaticGit { commits: commits() };

        generate_changelog(&git, &config).unwrap();

        let content = fs::read_to_string(&config.changelog.path).unwrap();
        assert!(!content.contains("stale content"));
    }

    #[test]
    fn test_generate_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_at(&temp_dir, ChangelogConfig::default());
        let git = StaticGit { commits: commits() };

        generate_changelog(&git, &config).unwrap();
        let first = fs::read(&config.changelog.path).unwrap();
        generate_changelog(&git, &config).unwrap();
        let second = fs::read(&config.changelog.path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_unknown_ref() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = config_at(&temp_dir, ChangelogConfig::default());
        config.release.release_on_branch = "missing".to_string();
        let git = StaticGit { commits: commits() };

        let result = generate_changelog(&git, &config);

        assert!(matches!(result, Err(CoreError::Diff { to, .. }) if to == "missing"));
        assert!(!temp_dir.path().join("CHANGELOG.md").exists());
    }

    #[test]
    fn test_release_info_defaults_to_head() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = config_at(&temp_dir, ChangelogConfig::default());
        config.release.release_on_branch.clear();

        let info = ReleaseInfo::from_config(&config);
        assert_eq!(info.release_on, "HEAD");

        let git = StaticGit { commits: commits() };
        let out = generate_changelog(&git, &config).unwrap();
        assert!(out.contains("(develop..HEAD)"));
    }

    #[test]
    fn test_template_error_leaves_file_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_at(
            &temp_dir,
            ChangelogConfig {
                footer_template: "{% if %}".to_string(),
                ..ChangelogConfig::default()
            },
        );
        fs::write(&config.changelog.path, "previous\n").unwrap();
        let git = StaticGit { commits: commits() };

        assert!(generate_changelog(&git, &config).is_err());
        assert_eq!(
            fs::read_to_string(&config.changelog.path).unwrap(),
            "previous\n"
        );
    }
}
