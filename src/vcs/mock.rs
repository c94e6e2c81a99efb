use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::Result;
use crate::vcs::VersionControl;

/// In-memory fake for exercising the runner without a real repository.
///
/// The working tree is two lists of file names (unstaged and staged), history
/// is the list of commit messages, and a tag maps to the commit count at the
/// moment it was created (its "target"). Failure toggles simulate the
/// delegated tool failing at one specific step.
pub struct MockVcs {
    state: RefCell<MockState>,
}

#[derive(Default)]
struct MockState {
    unstaged: Vec<String>,
    staged: Vec<String>,
    commits: Vec<String>,
    tags: HashMap<String, (usize, String)>,
    pushed_branches: Vec<(String, String)>,
    pushed_tags: Vec<(String, String)>,
    fail_stage: bool,
    fail_commit: bool,
    fail_push: bool,
    fail_tag_create: bool,
    fail_tag_push: bool,
}

fn simulated(step: &str) -> crate::error::ReleaseError {
    git2::Error::from_str(&format!("simulated {} failure", step)).into()
}

impl MockVcs {
    pub fn new() -> Self {
        MockVcs {
            state: RefCell::new(MockState::default()),
        }
    }

    pub fn with_unstaged(self, files: &[&str]) -> Self {
        self.state
            .borrow_mut()
            .unstaged
            .extend(files.iter().map(|f| f.to_string()));
        self
    }

    pub fn with_staged(self, files: &[&str]) -> Self {
        self.state
            .borrow_mut()
            .staged
            .extend(files.iter().map(|f| f.to_string()));
        self
    }

    /// Register a tag pointing at the current head (the commit count so far).
    pub fn with_tag(self, name: &str, message: &str) -> Self {
        {
            let mut state = self.state.borrow_mut();
            let head = state.commits.len();
            state
                .tags
                .insert(name.to_string(), (head, message.to_string()));
        }
        self
    }

    pub fn fail_stage(self) -> Self {
        self.state.borrow_mut().fail_stage = true;
        self
    }

    pub fn fail_commit(self) -> Self {
        self.state.borrow_mut().fail_commit = true;
        self
    }

    pub fn fail_push(self) -> Self {
        self.state.borrow_mut().fail_push = true;
        self
    }

    pub fn fail_tag_create(self) -> Self {
        self.state.borrow_mut().fail_tag_create = true;
        self
    }

    pub fn fail_tag_push(self) -> Self {
        self.state.borrow_mut().fail_tag_push = true;
        self
    }

    // Observers for assertions.

    pub fn commits(&self) -> Vec<String> {
        self.state.borrow().commits.clone()
    }

    pub fn commit_count(&self) -> usize {
        self.state.borrow().commits.len()
    }

    /// Commit index a tag points at, if the tag exists.
    pub fn tag_target(&self, name: &str) -> Option<usize> {
        self.state.borrow().tags.get(name).map(|(target, _)| *target)
    }

    pub fn tag_message(&self, name: &str) -> Option<String> {
        self.state
            .borrow()
            .tags
            .get(name)
            .map(|(_, message)| message.clone())
    }

    pub fn pushed_branches(&self) -> Vec<(String, String)> {
        self.state.borrow().pushed_branches.clone()
    }

    pub fn pushed_tags(&self) -> Vec<(String, String)> {
        self.state.borrow().pushed_tags.clone()
    }
}

impl Default for MockVcs {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionControl for MockVcs {
    fn status_summary(&self) -> Result<String> {
        let state = self.state.borrow();
        let mut lines = Vec::new();
        for file in &state.staged {
            lines.push(format!("A  {}", file));
        }
        for file in &state.unstaged {
            lines.push(format!(" M {}", file));
        }
        Ok(lines.join("\n"))
    }

    fn has_staged_changes(&self) -> Result<bool> {
        Ok(!self.state.borrow().staged.is_empty())
    }

    fn staged_files(&self) -> Result<Vec<String>> {
        Ok(self.state.borrow().staged.clone())
    }

    fn stage_all(&self) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_stage {
            return Err(simulated("stage"));
        }
        let unstaged = std::mem::take(&mut state.unstaged);
        state.staged.extend(unstaged);
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_commit {
            return Err(simulated("commit"));
        }
        state.commits.push(message.to_string());
        state.staged.clear();
        Ok(())
    }

    fn push_branch(&self, remote: &str, branch: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_push {
            return Err(simulated("push"));
        }
        state
            .pushed_branches
            .push((remote.to_string(), branch.to_string()));
        Ok(())
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        Ok(self.state.borrow().tags.contains_key(name))
    }

    fn create_tag(&self, name: &str, message: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_tag_create {
            return Err(simulated("tag create"));
        }
        if state.tags.contains_key(name) {
            return Err(git2::Error::from_str(&format!("tag '{}' already exists", name)).into());
        }
        let head = state.commits.len();
        state.tags.insert(name.to_string(), (head, message.to_string()));
        Ok(())
    }

    fn delete_tag(&self, name: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.tags.remove(name).is_none() {
            return Err(git2::Error::from_str(&format!("tag '{}' not found", name)).into());
        }
        Ok(())
    }

    fn push_tag(&self, name: &str, remote: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_tag_push {
            return Err(simulated("tag push"));
        }
        state
            .pushed_tags
            .push((name.to_string(), remote.to_string()));
        Ok(())
    }
}
