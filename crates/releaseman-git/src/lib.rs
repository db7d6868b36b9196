//! Git abstraction layer for Releaseman.
//!
//! This crate provides the Git operations the release workflow relies on:
//! - Working tree status (changed files)
//! - Commits between two refs
//! - Committing, tagging and fast-forwarding for the finishing step

mod commit;
mod error;
mod provider;
mod repository;

pub use commit::Commit;
pub use error::{GitError, GitResult};
pub use provider::GitProvider;
pub use repository::Repository;
