//! Release workflow orchestration.
//!
//! [ReleaseRunner] wires the version-control capability, the operator prompt,
//! the reporter, and the message store into the sequential, human-confirmed
//! release workflow: stage → commit → push → tag. Every step validates its
//! own preconditions, fails fast with a step-specific error, and a failure
//! short-circuits everything after it. Completed steps are never rolled back;
//! recovery is a manual re-invocation.

use crate::error::{ReleaseError, Result};
use crate::store::MessageStore;
use crate::ui::{Prompt, Reporter};
use crate::vcs::VersionControl;
use crate::version::VersionId;
use crate::warning::WorkflowWarning;

/// Terminal outcome of an operator-confirmed operation.
///
/// Declining a confirmation is a clean early exit, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Cancelled,
}

pub struct ReleaseRunner<V, P, R> {
    vcs: V,
    prompt: P,
    reporter: R,
    store: MessageStore,
}

impl<V: VersionControl, P: Prompt, R: Reporter> ReleaseRunner<V, P, R> {
    pub fn new(vcs: V, prompt: P, reporter: R, store: MessageStore) -> Self {
        ReleaseRunner {
            vcs,
            prompt,
            reporter,
            store,
        }
    }

    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    pub fn vcs(&self) -> &V {
        &self.vcs
    }

    /// Versions that have a prepared message file, sorted. No side effects.
    pub fn list_versions(&self) -> Result<Vec<VersionId>> {
        self.store.list()
    }

    /// Print the working tree summary.
    pub fn show_status(&self) -> Result<()> {
        let summary = self.vcs.status_summary()?;
        if summary.is_empty() {
            self.reporter.info("Working tree clean");
        } else {
            self.reporter.info(&format!("Working tree:\n{}", summary));
        }
        Ok(())
    }

    /// Stage every working tree change.
    pub fn stage_all(&self) -> Result<()> {
        self.vcs
            .stage_all()
            .map_err(|e| ReleaseError::StageFailed(e.to_string()))?;
        self.reporter.success("Staged all working tree changes");
        Ok(())
    }

    /// Commit staged changes with the full contents of the version's message
    /// file.
    ///
    /// If nothing is staged, stages everything first (auto-stage-on-empty).
    /// A commit failure carries the staged file list and status summary so
    /// the operator can debug the delegate's diagnostic.
    pub fn commit(&self, version: &VersionId) -> Result<()> {
        let message = self.store.read(version)?;

        if !self.vcs.has_staged_changes()? {
            self.reporter
                .warning(&WorkflowWarning::NothingStaged.to_string());
            self.vcs
                .stage_all()
                .map_err(|e| ReleaseError::StageFailed(e.to_string()))?;
        }

        if let Err(e) = self.vcs.commit(&message) {
            let mut detail = e.to_string();
            if let Ok(staged) = self.vcs.staged_files() {
                if !staged.is_empty() {
                    detail.push_str(&format!("\nstaged files:\n  {}", staged.join("\n  ")));
                }
            }
            if let Ok(summary) = self.vcs.status_summary() {
                if !summary.is_empty() {
                    detail.push_str(&format!("\nworking tree:\n{}", summary));
                }
            }
            return Err(ReleaseError::CommitFailed(detail));
        }

        self.reporter
            .success(&format!("Committed staged changes for {}", version));
        Ok(())
    }

    /// Push a branch to a remote. Failures are reported, never retried.
    pub fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.vcs
            .push_branch(remote, branch)
            .map_err(|e| ReleaseError::PushFailed {
                remote: remote.to_string(),
                branch: branch.to_string(),
                detail: e.to_string(),
            })?;
        self.reporter
            .success(&format!("Pushed branch '{}' to '{}'", branch, remote));
        Ok(())
    }

    /// Create an annotated tag for `version` at HEAD and force-push it.
    ///
    /// If the tag already exists locally the operator is asked whether to
    /// delete and recreate it; declining is a no-op, not an error.
    pub fn tag(&self, version: &VersionId, remote: &str) -> Result<Outcome> {
        let message = self.store.read(version)?;
        let name = version.to_string();

        if self.vcs.tag_exists(&name)? {
            self.reporter
                .warning(&WorkflowWarning::TagAlreadyExists { tag: name.clone() }.to_string());
            if !self
                .prompt
                .confirm(&format!("Delete and recreate tag '{}'?", name))?
            {
                self.reporter
                    .info(&format!("Keeping existing tag '{}'", name));
                return Ok(Outcome::Cancelled);
            }
            self.vcs
                .delete_tag(&name)
                .map_err(|e| ReleaseError::TagCreateFailed {
                    tag: name.clone(),
                    detail: e.to_string(),
                })?;
        }

        self.vcs
            .create_tag(&name, &message)
            .map_err(|e| ReleaseError::TagCreateFailed {
                tag: name.clone(),
                detail: e.to_string(),
            })?;
        self.reporter
            .success(&format!("Created annotated tag '{}'", name));

        self.vcs
            .push_tag(&name, remote)
            .map_err(|e| ReleaseError::TagPushFailed {
                tag: name.clone(),
                remote: remote.to_string(),
                detail: e.to_string(),
            })?;
        self.reporter
            .success(&format!("Pushed tag '{}' to '{}'", name, remote));

        Ok(Outcome::Completed)
    }

    /// Run the full release sequence for `version` in strict order:
    /// validate → show status → show plan → confirm → stage → commit →
    /// push → tag. The first failure aborts everything after it; completed
    /// steps stay in place.
    pub fn release(&self, version: &VersionId, remote: &str, branch: &str) -> Result<Outcome> {
        // Fails with VersionNotFound before anything touches the repository.
        self.store.read(version)?;

        self.show_status()?;

        self.reporter.info(&format!("Release plan for {}:", version));
        let steps = [
            "stage all working tree changes".to_string(),
            format!(
                "commit with the message from {}",
                self.store.path_for(version).display()
            ),
            format!("push branch '{}' to '{}'", branch, remote),
            format!("create annotated tag '{}' and push it to '{}'", version, remote),
        ];
        for (i, step) in steps.iter().enumerate() {
            self.reporter.info(&format!("  {}. {}", i + 1, step));
        }
        if let Ok(preview) = self.store.preview(version, 3) {
            self.reporter
                .info(&format!("Message preview:\n  {}", preview.join("\n  ")));
        }

        if !self
            .prompt
            .confirm(&format!("Proceed with release '{}'?", version))?
        {
            self.reporter.info("Release cancelled");
            return Ok(Outcome::Cancelled);
        }

        self.stage_all()?;
        self.commit(version)?;
        self.push(remote, branch)?;
        let outcome = self.tag(version, remote)?;

        if outcome == Outcome::Completed {
            self.reporter
                .success(&format!("Release {} complete", version));
        }
        Ok(outcome)
    }
}
