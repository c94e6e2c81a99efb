use std::path::Path;

use git2::{IndexAddOption, ObjectType, Repository, Status, StatusOptions};

use crate::error::{ReleaseError, Result};
use crate::vcs::VersionControl;

/// Real [VersionControl] implementation backed by libgit2.
pub struct Git2Vcs {
    repo: Repository,
}

impl std::fmt::Debug for Git2Vcs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git2Vcs")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git2Vcs {
    /// Discover the repository containing `root`, walking upward the way the
    /// git CLI does.
    ///
    /// # Returns
    /// * `Ok(Git2Vcs)` - Successfully located and opened the repository
    /// * `Err(NotARepository)` - If no repository is found above `root`
    pub fn discover<P: AsRef<Path>>(root: P) -> Result<Self> {
        let repo = Repository::discover(root.as_ref()).map_err(|_| ReleaseError::NotARepository {
            root: root.as_ref().display().to_string(),
        })?;
        Ok(Git2Vcs { repo })
    }

    /// Wrap an already-open git2 repository.
    pub fn from_git2(repo: Repository) -> Self {
        Git2Vcs { repo }
    }

    fn head_commit(&self) -> Result<Option<git2::Commit<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?)),
            Err(e)
                if e.code() == git2::ErrorCode::UnbornBranch
                    || e.code() == git2::ErrorCode::NotFound =>
            {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn staged_mask() -> Status {
        Status::INDEX_NEW
            | Status::INDEX_MODIFIED
            | Status::INDEX_DELETED
            | Status::INDEX_RENAMED
            | Status::INDEX_TYPECHANGE
    }

    /// Credential chain for remote operations: on-disk SSH keys in order of
    /// preference, then the SSH agent, then whatever default credential
    /// helper applies. Local filesystem remotes never hit this.
    fn remote_callbacks() -> git2::RemoteCallbacks<'static> {
        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                    let key_path = std::path::PathBuf::from(format!("{}/.ssh/{}", home, key));
                    if key_path.exists() {
                        if let Ok(cred) = git2::Cred::ssh_key(
                            username_from_url.unwrap_or("git"),
                            None,
                            &key_path,
                            None,
                        ) {
                            return Ok(cred);
                        }
                    }
                }

                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
                {
                    return Ok(cred);
                }
            }

            git2::Cred::default()
        });
        callbacks
    }
}

impl VersionControl for Git2Vcs {
    fn status_summary(&self) -> Result<String> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true);
        let statuses = self.repo.statuses(Some(&mut opts))?;

        let mut lines = Vec::new();
        for entry in statuses.iter() {
            let status = entry.status();

            if status.contains(Status::WT_NEW) && !status.intersects(Self::staged_mask()) {
                lines.push(format!("?? {}", entry.path().unwrap_or("<non-utf8 path>")));
                continue;
            }

            let index = if status.contains(Status::INDEX_NEW) {
                'A'
            } else if status.contains(Status::INDEX_MODIFIED) {
                'M'
            } else if status.contains(Status::INDEX_DELETED) {
                'D'
            } else if status.contains(Status::INDEX_RENAMED) {
                'R'
            } else {
                ' '
            };
            let worktree = if status.contains(Status::WT_MODIFIED) {
                'M'
            } else if status.contains(Status::WT_DELETED) {
                'D'
            } else {
                ' '
            };
            lines.push(format!(
                "{}{} {}",
                index,
                worktree,
                entry.path().unwrap_or("<non-utf8 path>")
            ));
        }

        Ok(lines.join("\n"))
    }

    fn has_staged_changes(&self) -> Result<bool> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(false);
        let statuses = self.repo.statuses(Some(&mut opts))?;
        Ok(statuses
            .iter()
            .any(|entry| entry.status().intersects(Self::staged_mask())))
    }

    fn staged_files(&self) -> Result<Vec<String>> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(false);
        let statuses = self.repo.statuses(Some(&mut opts))?;
        Ok(statuses
            .iter()
            .filter(|entry| entry.status().intersects(Self::staged_mask()))
            .filter_map(|entry| entry.path().map(str::to_string))
            .collect())
    }

    fn stage_all(&self) -> Result<()> {
        let mut index = self.repo.index()?;
        // add_all picks up new and modified paths; update_all records
        // deletions of already-tracked paths.
        index.add_all(["*"], IndexAddOption::DEFAULT, None)?;
        index.update_all(["*"], None)?;
        index.write()?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.repo.signature()?;

        let parent = self.head_commit()?;
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;
        Ok(())
    }

    fn push_branch(&self, remote: &str, branch: &str) -> Result<()> {
        let mut remote = self.repo.find_remote(remote)?;
        let mut options = git2::PushOptions::new();
        options.remote_callbacks(Self::remote_callbacks());

        let refspec = format!("refs/heads/{}:refs/heads/{}", branch, branch);
        remote.push(&[refspec.as_str()], Some(&mut options))?;
        Ok(())
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        match self.repo.find_reference(&format!("refs/tags/{}", name)) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn create_tag(&self, name: &str, message: &str) -> Result<()> {
        let head = self.repo.head()?.peel(ObjectType::Commit)?;
        let tagger = self.repo.signature()?;
        self.repo.tag(name, &head, &tagger, message, false)?;
        Ok(())
    }

    fn delete_tag(&self, name: &str) -> Result<()> {
        self.repo.tag_delete(name)?;
        Ok(())
    }

    fn push_tag(&self, name: &str, remote: &str) -> Result<()> {
        let mut remote = self.repo.find_remote(remote)?;
        let mut options = git2::PushOptions::new();
        options.remote_callbacks(Self::remote_callbacks());

        // Forced refspec so a recreated tag replaces the old one remotely.
        let refspec = format!("+refs/tags/{}:refs/tags/{}", name, name);
        remote.push(&[refspec.as_str()], Some(&mut options))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_fails_outside_a_repository() {
        let dir = TempDir::new().unwrap();
        let err = Git2Vcs::discover(dir.path()).unwrap_err();
        assert!(matches!(err, ReleaseError::NotARepository { .. }));
    }

    #[test]
    fn test_discover_finds_repository_from_subdirectory() {
        let dir = TempDir::new().unwrap();
        Repository::init(dir.path()).unwrap();
        let nested = dir.path().join("src").join("deep");
        std::fs::create_dir_all(&nested).unwrap();

        assert!(Git2Vcs::discover(&nested).is_ok());
    }
}
