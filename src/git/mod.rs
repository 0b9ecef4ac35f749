//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the Git operations
//! that the bump pipeline needs, allowing for a real implementation backed
//! by the `git2` crate and an in-memory mock for testing.
//!
//! Most code should depend on the [Repository] trait rather than concrete
//! implementations:
//!
//! - [repository::Git2Repository]: real implementation using `git2`
//! - [mock::MockRepository]: in-memory implementation for tests

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use git2::Oid;

/// A tag together with the commit it points at and that commit's timestamp.
///
/// The record with the latest `committed_at` is the current release
/// baseline; tag-creation order and lexical order are irrelevant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    /// The tag name (e.g., "v1.2.3")
    pub name: String,
    /// The commit the tag resolves to
    pub target: Oid,
    /// Commit timestamp, seconds since epoch
    pub committed_at: i64,
}

/// Committer identity resolved from git configuration.
///
/// Never invented: either read from repository-local config or copied there
/// from global config by the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Identity {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Which git configuration file to consult for identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    Local,
    Global,
}

/// Common git operation trait for abstraction
///
/// Abstracts the version-control collaborator so the version-increment and
/// file-rewrite logic can be exercised against a mock. All implementors must
/// be `Send + Sync`.
///
/// Methods return [crate::error::Result] and map underlying failures (like
/// `git2::Error`) to the appropriate [crate::error::BumpError] variants.
pub trait Repository: Send + Sync {
    /// All tags in the repository with their target commit and timestamp.
    fn list_tags(&self) -> Result<Vec<TagRecord>>;

    /// Short (8-character) hash of the current HEAD commit.
    fn head_short_hash(&self) -> Result<String>;

    /// Read `user.name`/`user.email` from the given configuration scope.
    ///
    /// Returns `Ok(None)` when either key is absent in that scope.
    fn read_identity(&self, scope: ConfigScope) -> Result<Option<Identity>>;

    /// Write the identity into repository-local configuration so that
    /// future runs resolve it locally.
    fn write_local_identity(&self, identity: &Identity) -> Result<()>;

    /// Pending working-tree changes, untracked files included.
    ///
    /// One human-readable line per change, in `git status` spirit. An empty
    /// list means the tree is clean.
    fn worktree_changes(&self) -> Result<Vec<String>>;

    /// Create an annotated tag at the current HEAD carrying `message`.
    ///
    /// A name collision is an error; no partial tag is left behind.
    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Stage all working-tree changes (new, modified, deleted files) and
    /// create a single commit with `message`.
    fn commit_all(&self, message: &str) -> Result<()>;

    /// Push the current branch to `remote`.
    fn push_branch(&self, remote: &str) -> Result<()>;

    /// Push all tags (not branches) to `remote`.
    fn push_tags(&self, remote: &str) -> Result<()>;
}
