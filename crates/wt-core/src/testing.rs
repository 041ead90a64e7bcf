//! In-memory `Vcs` and `InteractionAdapter` doubles for unit tests

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use crate::error::WtError;
use crate::git::Vcs;
use crate::interaction::InteractionAdapter;

/// Scriptable repository: behaviour is driven by the public fields,
/// every mutating call is recorded in order
#[derive(Debug, Default)]
pub struct FakeVcs {
    pub toplevel: PathBuf,
    pub remote: Option<String>,
    pub list_output: String,
    pub status_output: String,
    pub prune_output: String,
    pub tags: Vec<String>,
    pub local_branches: Vec<String>,
    pub remote_branches: Vec<String>,
    /// Names git would reject as branch names
    pub invalid_branches: Vec<String>,
    pub fail_add: bool,
    pub fail_fetch: bool,
    pub fail_remove: bool,
    pub fail_status: bool,
    pub fail_delete_branch: bool,
    pub(crate) calls: RefCell<Vec<String>>,
    pub(crate) created_branches: RefCell<Vec<String>>,
}

impl FakeVcs {
    /// Branches created through `create_branch` or a PR fetch and not deleted since
    pub fn created_branches(&self) -> Vec<String> {
        self.created_branches.borrow().clone()
    }

    fn has_branch(&self, name: &str) -> bool {
        self.local_branches.iter().any(|b| b == name)
            || self.created_branches.borrow().iter().any(|b| b == name)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn fail(command: &str) -> WtError {
        WtError::GitCommand {
            command: command.to_string(),
            stderr: "fatal: scripted failure".to_string(),
        }
    }

    fn materialize(path: &Path) {
        let _ = std::fs::create_dir_all(path);
    }
}

impl Vcs for FakeVcs {
    fn toplevel(&self) -> Result<PathBuf, WtError> {
        Ok(self.toplevel.clone())
    }

    fn remote_url(&self) -> Option<String> {
        self.remote.clone()
    }

    fn worktree_list(&self) -> Result<String, WtError> {
        Ok(self.list_output.clone())
    }

    fn worktree_add(&self, path: &Path, reference: &str) -> Result<(), WtError> {
        self.record(format!("worktree add {} {}", path.display(), reference));
        if self.fail_add || !self.has_branch(reference) {
            return Err(Self::fail("worktree add"));
        }
        Self::materialize(path);
        Ok(())
    }

    fn worktree_add_new_branch(&self, path: &Path, branch: &str) -> Result<(), WtError> {
        self.record(format!("worktree add -b {} {}", branch, path.display()));
        if self.fail_add
            || self.invalid_branches.iter().any(|b| b == branch)
            || self.has_branch(branch)
        {
            return Err(Self::fail("worktree add"));
        }
        Self::materialize(path);
        Ok(())
    }

    fn worktree_add_tracking(
        &self,
        path: &Path,
        branch: &str,
        upstream: &str,
    ) -> Result<(), WtError> {
        self.record(format!(
            "worktree add --track -b {} {} {}",
            branch,
            path.display(),
            upstream
        ));
        if self.fail_add {
            return Err(Self::fail("worktree add"));
        }
        Self::materialize(path);
        Ok(())
    }

    fn worktree_remove_force(&self, path: &Path) -> Result<(), WtError> {
        self.record(format!("worktree remove --force {}", path.display()));
        if self.fail_remove {
            return Err(Self::fail("worktree remove"));
        }
        let _ = std::fs::remove_dir_all(path);
        Ok(())
    }

    fn worktree_prune(&self) -> Result<String, WtError> {
        self.record("worktree prune".to_string());
        Ok(self.prune_output.clone())
    }

    fn fetch_pull_request(&self, number: u64, branch: &str) -> Result<(), WtError> {
        self.record(format!("fetch origin pull/{}/head:{}", number, branch));
        if self.fail_fetch {
            return Err(WtError::FetchFailed {
                number,
                reason: "couldn't find remote ref".to_string(),
            });
        }
        self.created_branches.borrow_mut().push(branch.to_string());
        Ok(())
    }

    fn status_porcelain(&self, _dir: &Path) -> Result<String, WtError> {
        if self.fail_status {
            return Err(Self::fail("status --porcelain"));
        }
        Ok(self.status_output.clone())
    }

    fn tag_exists(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t == name)
    }

    fn remote_branch_exists(&self, remote: &str, branch: &str) -> bool {
        remote == "origin" && self.remote_branches.iter().any(|b| b == branch)
    }

    fn create_branch(&self, name: &str, start: &str) -> Result<(), WtError> {
        self.record(format!("branch {} {}", name, start));
        if self.has_branch(name) || self.invalid_branches.iter().any(|b| b == name) {
            return Err(Self::fail("branch"));
        }
        self.created_branches.borrow_mut().push(name.to_string());
        Ok(())
    }

    fn delete_branch(&self, name: &str) -> Result<(), WtError> {
        self.record(format!("branch -D {}", name));
        if self.fail_delete_branch {
            return Err(Self::fail("branch -D"));
        }
        self.created_branches.borrow_mut().retain(|b| b != name);
        Ok(())
    }
}

/// Adapter that replays scripted answers
#[derive(Debug, Default)]
pub struct ScriptedAdapter {
    pub selections: RefCell<VecDeque<Option<String>>>,
    pub confirmations: RefCell<VecDeque<bool>>,
    pub prompts: RefCell<Vec<String>>,
}

impl ScriptedAdapter {
    pub fn confirming(answer: bool) -> Self {
        let adapter = Self::default();
        adapter.confirmations.borrow_mut().push_back(answer);
        adapter
    }

    pub fn selecting(line: Option<&str>) -> Self {
        let adapter = Self::default();
        adapter
            .selections
            .borrow_mut()
            .push_back(line.map(str::to_string));
        adapter
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.borrow().len()
    }
}

impl InteractionAdapter for ScriptedAdapter {
    fn select_line(&self, prompt: &str, _entries: &[String]) -> Result<Option<String>, WtError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        Ok(self.selections.borrow_mut().pop_front().flatten())
    }

    fn confirm(&self, prompt: &str) -> Result<bool, WtError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        Ok(self.confirmations.borrow_mut().pop_front().unwrap_or(false))
    }
}
