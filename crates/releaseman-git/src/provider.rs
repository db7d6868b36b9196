//! The git seam used by the release workflow.

use crate::{Commit, GitResult};

/// Everything the release workflow asks of git.
///
/// [`crate::Repository`] implements this against a real repository; tests
/// substitute in-memory fakes.
pub trait GitProvider {
    /// Returns the paths with uncommitted changes (staged, unstaged or
    /// untracked), relative to the repository root, sorted by path.
    ///
    /// # Errors
    ///
    /// Returns an error if the status cannot be read.
    fn changed_files(&self) -> GitResult<Vec<String>>;

    /// Returns the commits reachable from `to` but not from `from`, newest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GitError::RefNotFound`] if either ref does not resolve.
    fn commits_between(&self, from: &str, to: &str) -> GitResult<Vec<Commit>>;

    /// Stages `paths` and commits them on HEAD. Returns the new commit hash,
    /// or `None` when nothing ended up staged.
    ///
    /// # Errors
    ///
    /// Returns an error if staging or committing fails.
    fn commit_paths(&self, paths: &[String], message: &str) -> GitResult<Option<String>>;

    /// Creates a lightweight tag at HEAD.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag exists or cannot be created.
    fn tag_head(&self, name: &str) -> GitResult<()>;

    /// Moves `branch` forward to HEAD. A no-op when the branch already points
    /// at HEAD.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GitError::NotFastForward`] if HEAD does not descend
    /// from the branch tip.
    fn fast_forward_to_head(&self, branch: &str) -> GitResult<()>;
}
