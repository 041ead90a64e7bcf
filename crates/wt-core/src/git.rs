//! Git CLI wrapper
//!
//! All repository mutation goes through the [`Vcs`] trait so that the
//! decision logic in `create`, `pr`, `remove` and `prune` can be exercised
//! against a test double. [`GitCli`] is the real implementation and shells
//! out to `git -C <dir> ...`.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::debug;

use crate::error::WtError;

/// The version-control primitives wt relies on
pub trait Vcs {
    /// Repository toplevel of the working directory the wrapper was opened in
    fn toplevel(&self) -> Result<PathBuf, WtError>;

    /// URL of the `origin` remote, if any
    fn remote_url(&self) -> Option<String>;

    /// Raw `git worktree list --porcelain` output
    fn worktree_list(&self) -> Result<String, WtError>;

    /// `git worktree add <path> <reference>`
    fn worktree_add(&self, path: &Path, reference: &str) -> Result<(), WtError>;

    /// `git worktree add -b <branch> <path>`
    fn worktree_add_new_branch(&self, path: &Path, branch: &str) -> Result<(), WtError>;

    /// `git worktree add --track -b <branch> <path> <upstream>`
    fn worktree_add_tracking(
        &self,
        path: &Path,
        branch: &str,
        upstream: &str,
    ) -> Result<(), WtError>;

    /// `git worktree remove --force <path>`
    fn worktree_remove_force(&self, path: &Path) -> Result<(), WtError>;

    /// `git worktree prune -v`, returning its combined output
    fn worktree_prune(&self) -> Result<String, WtError>;

    /// `git fetch origin pull/<number>/head:<branch>`
    fn fetch_pull_request(&self, number: u64, branch: &str) -> Result<(), WtError>;

    /// `git status --porcelain` run inside `dir`
    fn status_porcelain(&self, dir: &Path) -> Result<String, WtError>;

    /// Whether `refs/tags/<name>` exists
    fn tag_exists(&self, name: &str) -> bool;

    /// Whether `refs/remotes/<remote>/<branch>` exists
    fn remote_branch_exists(&self, remote: &str, branch: &str) -> bool;

    /// `git branch <name> <start>`
    fn create_branch(&self, name: &str, start: &str) -> Result<(), WtError>;

    /// `git branch -D <name>`
    fn delete_branch(&self, name: &str) -> Result<(), WtError>;
}

/// `git` subprocess implementation of [`Vcs`]
#[derive(Debug, Clone)]
pub struct GitCli {
    dir: PathBuf,
}

impl GitCli {
    /// Wrap the repository containing `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Check that `git` itself can be spawned
    pub fn is_installed() -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn output_in(&self, dir: &Path, args: &[&str]) -> Result<Output, WtError> {
        debug!(dir = %dir.display(), args = ?args, "running git");
        Command::new("git")
            .arg("-C")
            .arg(dir)
            .args(args)
            .output()
            .map_err(|e| WtError::from_spawn("git", e))
    }

    fn output(&self, args: &[&str]) -> Result<Output, WtError> {
        self.output_in(&self.dir, args)
    }

    /// Run git and return stdout, mapping a non-zero exit to `GitCommand`
    fn run(&self, args: &[&str]) -> Result<String, WtError> {
        let output = self.output(args)?;
        if !output.status.success() {
            return Err(command_error(args, &output));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn succeeds(&self, args: &[&str]) -> bool {
        self.output(args)
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

fn command_error(args: &[&str], output: &Output) -> WtError {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    debug!(args = ?args, %stderr, "git exited with {}", output.status);
    WtError::GitCommand {
        command: args.iter().take(2).copied().collect::<Vec<_>>().join(" "),
        stderr,
    }
}

fn path_str(path: &Path) -> Result<&str, WtError> {
    path.to_str().ok_or_else(|| {
        WtError::InvalidInput(format!("path is not valid UTF-8: {}", path.display()))
    })
}

impl Vcs for GitCli {
    fn toplevel(&self) -> Result<PathBuf, WtError> {
        let output = self.output(&["rev-parse", "--show-toplevel"])?;
        if !output.status.success() {
            return Err(WtError::NotAGitRepository);
        }
        let top = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if top.is_empty() {
            // bare repository or inside .git
            return Err(WtError::NotAGitRepository);
        }
        Ok(PathBuf::from(top))
    }

    fn remote_url(&self) -> Option<String> {
        self.run(&["remote", "get-url", "origin"])
            .ok()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
    }

    fn worktree_list(&self) -> Result<String, WtError> {
        self.run(&["worktree", "list", "--porcelain"])
    }

    fn worktree_add(&self, path: &Path, reference: &str) -> Result<(), WtError> {
        self.run(&["worktree", "add", path_str(path)?, reference])
            .map(drop)
    }

    fn worktree_add_new_branch(&self, path: &Path, branch: &str) -> Result<(), WtError> {
        self.run(&["worktree", "add", "-b", branch, path_str(path)?])
            .map(drop)
    }

    fn worktree_add_tracking(
        &self,
        path: &Path,
        branch: &str,
        upstream: &str,
    ) -> Result<(), WtError> {
        self.run(&[
            "worktree",
            "add",
            "--track",
            "-b",
            branch,
            path_str(path)?,
            upstream,
        ])
        .map(drop)
    }

    fn worktree_remove_force(&self, path: &Path) -> Result<(), WtError> {
        self.run(&["worktree", "remove", "--force", path_str(path)?])
            .map(drop)
    }

    fn worktree_prune(&self) -> Result<String, WtError> {
        let args = ["worktree", "prune", "-v"];
        let output = self.output(&args)?;
        if !output.status.success() {
            return Err(command_error(&args, &output));
        }
        // prune -v reports on stderr
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(text)
    }

    fn fetch_pull_request(&self, number: u64, branch: &str) -> Result<(), WtError> {
        let refspec = format!("pull/{}/head:{}", number, branch);
        let args = ["fetch", "origin", refspec.as_str()];
        let output = self.output(&args)?;
        if !output.status.success() {
            return Err(WtError::FetchFailed {
                number,
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }

    fn status_porcelain(&self, dir: &Path) -> Result<String, WtError> {
        let args = ["status", "--porcelain"];
        let output = self.output_in(dir, &args)?;
        if !output.status.success() {
            return Err(command_error(&args, &output));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn tag_exists(&self, name: &str) -> bool {
        let tag_ref = format!("refs/tags/{}", name);
        self.succeeds(&["show-ref", "--verify", "--quiet", &tag_ref])
    }

    fn remote_branch_exists(&self, remote: &str, branch: &str) -> bool {
        let remote_ref = format!("refs/remotes/{}/{}", remote, branch);
        self.succeeds(&["show-ref", "--verify", "--quiet", &remote_ref])
    }

    fn create_branch(&self, name: &str, start: &str) -> Result<(), WtError> {
        self.run(&["branch", name, start]).map(drop)
    }

    fn delete_branch(&self, name: &str) -> Result<(), WtError> {
        self.run(&["branch", "-D", name]).map(drop)
    }
}
