//! Version-control abstraction layer
//!
//! The workflow never talks to git directly; it goes through the
//! [VersionControl] trait so the orchestration logic stays independent of the
//! invocation mechanics and can be unit-tested with a fake. Implementations:
//!
//! - [repository::Git2Vcs]: the real thing, backed by the `git2` crate
//! - [mock::MockVcs]: an in-memory fake for tests
//!
//! The workflow is fully synchronous and single-operator (one invocation at a
//! time against one working tree), so the trait carries no `Send`/`Sync`
//! bounds and every method blocks until the underlying operation finishes.

pub mod mock;
pub mod repository;

pub use mock::MockVcs;
pub use repository::Git2Vcs;

use crate::error::Result;

/// Narrow capability interface over the underlying version-control system.
///
/// Methods return the raw underlying error; the runner maps each failure to
/// the step-specific error variant (`StageFailed`, `CommitFailed`, ...) so the
/// delegate's diagnostic text is surfaced verbatim.
pub trait VersionControl {
    /// Short two-column working tree summary, one line per changed path.
    /// Empty string when the tree is clean.
    fn status_summary(&self) -> Result<String>;

    /// Whether the index differs from HEAD.
    fn has_staged_changes(&self) -> Result<bool>;

    /// Paths currently staged, for commit-failure diagnostics.
    fn staged_files(&self) -> Result<Vec<String>>;

    /// Stage every working tree change, including new and deleted files.
    fn stage_all(&self) -> Result<()>;

    /// Create one commit from the index with the given message.
    fn commit(&self, message: &str) -> Result<()>;

    /// Push a branch to a remote. Never forced, never retried.
    fn push_branch(&self, remote: &str, branch: &str) -> Result<()>;

    /// Whether a tag with this name exists locally.
    fn tag_exists(&self, name: &str) -> Result<bool>;

    /// Create an annotated tag at HEAD with the given message.
    fn create_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Delete a local tag.
    fn delete_tag(&self, name: &str) -> Result<()>;

    /// Force-push a single tag to a remote, so a recreated tag replaces the
    /// old one.
    fn push_tag(&self, name: &str, remote: &str) -> Result<()>;
}
