use thiserror::Error;

/// Unified error type for git-release operations.
///
/// Each workflow step that can fail has its own variant so the CLI can report
/// exactly where a release stopped. Operator cancellations are not errors;
/// they surface as [crate::runner::Outcome::Cancelled].
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("not a git repository (searched upward from '{root}')")]
    NotARepository { root: String },

    #[error("no message file found for version '{version}'")]
    VersionNotFound { version: String, known: Vec<String> },

    #[error("invalid version identifier '{0}', expected v<major>.<minor>.<patch>[-suffix]")]
    InvalidVersion(String),

    #[error("failed to stage changes: {0}")]
    StageFailed(String),

    #[error("commit failed: {0}")]
    CommitFailed(String),

    #[error("failed to push branch '{branch}' to '{remote}': {detail}")]
    PushFailed {
        remote: String,
        branch: String,
        detail: String,
    },

    #[error("failed to create tag '{tag}': {detail}")]
    TagCreateFailed { tag: String, detail: String },

    #[error("failed to push tag '{tag}' to '{remote}': {detail}")]
    TagPushFailed {
        tag: String,
        remote: String,
        detail: String,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Optional operator hint printed under the error message.
    ///
    /// `VersionNotFound` lists the versions that do have a message file so the
    /// operator can pick one or author the missing file.
    pub fn remediation(&self) -> Option<String> {
        match self {
            ReleaseError::VersionNotFound { known, .. } => {
                if known.is_empty() {
                    Some(
                        "No message files found; author <version>.txt in the message directory first"
                            .to_string(),
                    )
                } else {
                    Some(format!("Known versions: {}", known.join(", ")))
                }
            }
            _ => None,
        }
    }
}
