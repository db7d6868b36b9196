//! Git repository wrapper.

use std::path::Path;

use chrono::{TimeZone, Utc};
use git2::{BranchType, ObjectType, Oid, Repository as Git2Repo, Sort, Status, StatusOptions};
use tracing::{debug, info};

use crate::{Commit, GitError, GitProvider, GitResult};

/// A Git repository wrapper.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Finds the repository containing `start`, walking up parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if no repository is found.
    pub fn discover(start: impl AsRef<Path>) -> GitResult<Self> {
        let start = start.as_ref();
        let inner =
            Git2Repo::discover(start).map_err(|_| GitError::NotARepo(start.to_path_buf()))?;
        Ok(Self { inner })
    }

    /// Returns the repository root path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.workdir().unwrap_or_else(|| self.inner.path())
    }

    /// Resolves a branch, tag or revision to a commit id.
    fn resolve(&self, spec: &str) -> GitResult<Oid> {
        self.inner
            .revparse_single(spec)
            .and_then(|object| object.peel_to_commit())
            .map(|commit| commit.id())
            .map_err(|_| GitError::RefNotFound(spec.to_string()))
    }

    /// Lists paths touched by a commit relative to its first parent.
    fn commit_files(&self, commit: &git2::Commit<'_>) -> GitResult<Vec<String>> {
        let tree = commit.tree()?;
        let parent_tree = match commit.parent_count() {
            0 => None,
            _ => Some(commit.parent(0)?.tree()?),
        };
        let diff = self
            .inner
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?;

        Ok(diff
            .deltas()
            .filter_map(|delta| {
                delta
                    .new_file()
                    .path()
                    .or_else(|| delta.old_file().path())
                    .map(|p| p.to_string_lossy().into_owned())
            })
            .collect())
    }
}

impl GitProvider for Repository {
    fn changed_files(&self) -> GitResult<Vec<String>> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self.inner.statuses(Some(&mut opts))?;
        let mut files: Vec<String> = statuses
            .iter()
            .filter(|entry| entry.status() != Status::CURRENT)
            .filter_map(|entry| entry.path().map(String::from))
            .collect();
        files.sort();
        files.dedup();

        debug!(count = files.len(), "read working tree status");
        Ok(files)
    }

    fn commits_between(&self, from: &str, to: &str) -> GitResult<Vec<Commit>> {
        let from_oid = self.resolve(from)?;
        let to_oid = self.resolve(to)?;

        let mut revwalk = self.inner.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(to_oid)?;
        revwalk.hide(from_oid)?;

        let mut commits = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            let commit = self.inner.find_commit(oid)?;
            let author = commit.author();

            let entry = Commit::new(
                oid.to_string(),
                commit.message().unwrap_or(""),
                author.name().unwrap_or("Unknown"),
                author.email().unwrap_or(""),
                Utc.timestamp_opt(commit.time().seconds(), 0)
                    .single()
                    .unwrap_or_default(),
            )
            .with_files(self.commit_files(&commit)?);

            commits.push(entry);
        }

        debug!(from, to, count = commits.len(), "listed commits between refs");
        Ok(commits)
    }

    fn commit_paths(&self, paths: &[String], message: &str) -> GitResult<Option<String>> {
        let workdir = self.inner.workdir().ok_or(GitError::Bare)?;
        let mut index = self.inner.index()?;

        for path in paths {
            let relative = Path::new(path);
            if workdir.join(relative).exists() {
                index.add_path(relative)?;
            } else {
                index.remove_path(relative)?;
            }
        }
        index.write()?;

        let tree_id = index.write_tree()?;
        let parent = self.inner.head().ok().and_then(|h| h.peel_to_commit().ok());
        if parent.as_ref().is_some_and(|p| p.tree_id() == tree_id) {
            debug!("nothing staged, skipping commit");
            return Ok(None);
        }

        let tree = self.inner.find_tree(tree_id)?;
        let sig = self.inner.signature()?;
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
        let oid = self
            .inner
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)?;

        info!(hash = %oid, subject = message, "created commit");
        Ok(Some(oid.to_string()))
    }

    fn tag_head(&self, name: &str) -> GitResult<()> {
        let head = self.inner.head()?.peel(ObjectType::Commit)?;
        self.inner.tag_lightweight(name, &head, false)?;
        info!(tag = name, "created tag");
        Ok(())
    }

    fn fast_forward_to_head(&self, branch: &str) -> GitResult<()> {
        let head = self.inner.head()?;
        if head.is_branch() && head.shorthand() == Some(branch) {
            return Ok(());
        }
        let head_id = head.peel_to_commit()?.id();

        let mut reference = self
            .inner
            .find_branch(branch, BranchType::Local)
            .map_err(|_| GitError::RefNotFound(branch.to_string()))?
            .into_reference();
        let tip = reference.peel_to_commit()?.id();

        if tip == head_id {
            return Ok(());
        }
        if !self.inner.graph_descendant_of(head_id, tip)? {
            return Err(GitError::NotFastForward {
                branch: branch.to_string(),
                target: head_id.to_string(),
            });
        }

        reference.set_target(head_id, &format!("releaseman: fast-forward {branch}"))?;
        info!(branch, target = %head_id, "fast-forwarded branch");
        Ok(())
    }
}
