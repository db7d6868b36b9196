//! Git error types.

use thiserror::Error;

/// Git-related errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not a git repository.
    #[error("not a git repository: {0}")]
    NotARepo(std::path::PathBuf),

    /// A branch, tag or revision could not be resolved.
    #[error("cannot resolve ref: {0}")]
    RefNotFound(String),

    /// The release branch cannot be fast-forwarded to the release commit.
    #[error("branch {branch} cannot be fast-forwarded to {target}")]
    NotFastForward { branch: String, target: String },

    /// Repository has no working directory.
    #[error("repository is bare")]
    Bare,

    /// Git2 error.
    #[error("git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Result type for git operations.
pub type GitResult<T> = Result<T, GitError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_not_a_repo_display() {
        let err = GitError::NotARepo(PathBuf::from("/tmp/not-git"));
        assert_eq!(err.to_string(), "not a git repository: /tmp/not-git");
    }

    #[test]
    fn test_ref_not_found_display() {
        let err = GitError::RefNotFound("develop".to_string());
        assert_eq!(err.to_string(), "cannot resolve ref: develop");
    }

    #[test]
    fn test_not_fast_forward_display() {
        let err = GitError::NotFastForward {
            branch: "master".to_string(),
            target: "abc1234".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "branch master cannot be fast-forwarded to abc1234"
        );
    }

    #[test]
    fn test_git2_error_conversion() {
        let git2_err = git2::Error::from_str("test error");
        let err: GitError = git2_err.into();
        assert!(matches!(err, GitError::Git2(_)));
        assert!(err.to_string().contains("test error"));
    }
}
