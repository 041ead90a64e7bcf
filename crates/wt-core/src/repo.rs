//! Repository context shared by every command

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Config;
use crate::error::WtError;
use crate::git::Vcs;
use crate::listing::{WorktreeRecord, parse_worktree_list, primary_worktree};
use crate::paths::{PathDeriver, repository_identity};

/// The repository a command operates on
#[derive(Debug, Clone)]
pub struct RepoContext {
    /// Toplevel of the checkout the command was started from
    pub toplevel: PathBuf,
    /// Managed path derivation for this repository
    pub paths: PathDeriver,
}

impl RepoContext {
    /// Resolve toplevel and identity; fails with `NotAGitRepository` outside a repository
    pub fn discover(vcs: &dyn Vcs, config: &Config) -> Result<Self, WtError> {
        let toplevel = vcs.toplevel()?;
        let remote = vcs.remote_url();
        let identity = repository_identity(remote.as_deref(), &toplevel);
        debug!(toplevel = %toplevel.display(), %identity, "repository context");
        Ok(Self {
            paths: PathDeriver::new(&config.worktrees_dir, identity),
            toplevel,
        })
    }

    pub fn identity(&self) -> &str {
        self.paths.identity()
    }

    /// Parse the current worktree listing
    pub fn worktrees(&self, vcs: &dyn Vcs) -> Result<Vec<WorktreeRecord>, WtError> {
        Ok(parse_worktree_list(&vcs.worktree_list()?))
    }

    /// Path of the primary checkout: the main worktree, or the toplevel when the repository is bare
    pub fn primary_root(&self, records: &[WorktreeRecord]) -> PathBuf {
        primary_worktree(records)
            .map(|r| r.path.clone())
            .unwrap_or_else(|| self.toplevel.clone())
    }
}

/// Canonicalize when possible so that symlinked temp dirs compare equal
pub fn normalize_path(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
