//! CLI command implementations

pub mod doctor;
pub mod launch;
pub mod list;
pub mod new;
pub mod path;
pub mod pr;
pub mod prune;
pub mod remove;

use std::path::PathBuf;

use anyhow::{Context, Result};
use wt_core::listing::find_record;
use wt_core::{
    Config, GitCli, InteractionAdapter, RepoContext, WorktreeRecord, WtError,
    path_from_selection, require_selection, selection_entries,
};

pub use doctor::run_doctor;
pub use launch::{run_ai, run_edit};
pub use list::run_list;
pub use new::run_new;
pub use path::run_path;
pub use pr::run_pr;
pub use prune::run_prune;
pub use remove::run_remove;

/// Everything a repository command needs, resolved once per invocation
pub struct CommandContext {
    pub config: Config,
    pub git: GitCli,
    pub repo: RepoContext,
    /// Working directory the command was started from
    pub cwd: PathBuf,
}

impl CommandContext {
    /// Load configuration and locate the repository around the current directory
    pub fn open() -> Result<Self> {
        let config = Config::load().context("failed to load configuration")?;
        let cwd = std::env::current_dir().context("failed to determine current directory")?;
        let git = GitCli::new(&cwd);
        let repo = RepoContext::discover(&git, &config)?;
        Ok(Self {
            config,
            git,
            repo,
            cwd,
        })
    }

    pub fn worktrees(&self) -> Result<Vec<WorktreeRecord>, WtError> {
        self.repo.worktrees(&self.git)
    }
}

/// Offer `records` in the picker and return the chosen one
pub fn pick_worktree(
    adapter: &dyn InteractionAdapter,
    records: &[WorktreeRecord],
) -> Result<WorktreeRecord, WtError> {
    let entries = selection_entries(records);
    let line = require_selection(adapter, "worktree>", &entries)?;
    let path = path_from_selection(&line)
        .ok_or_else(|| WtError::InvalidInput(format!("unrecognised selection '{}'", line)))?;
    find_record(records, &path)
        .cloned()
        .ok_or_else(|| WtError::InvalidInput(format!("{} is not a worktree", path.display())))
}
