//! wt-core: worktree resolution and lifecycle engine
//!
//! This crate holds all decision logic behind the `wt` CLI: parsing the git
//! worktree listing, deriving managed paths, resolving references into new
//! worktrees, checking out pull requests, guarded removal and pruning.

/// Core error types for wt operations
pub mod error;

/// Configuration handling
pub mod config;

/// Git CLI wrapper and the `Vcs` trait
pub mod git;

/// `git worktree list --porcelain` parsing and picker entries
pub mod listing;

/// Repository identity and managed paths
pub mod paths;

/// Repository discovery
pub mod repo;

/// Per-worktree change status
pub mod status;

/// Reference resolution and worktree creation
pub mod create;

/// Pull request worktrees
pub mod pr;

/// Guarded removal
pub mod remove;

/// Prune and empty-directory sweep
pub mod prune;

/// Picker and confirmation seam
pub mod interaction;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenience
pub use config::Config;
pub use create::{CreatedWorktree, Strategy, create_worktree};
pub use error::WtError;
pub use git::{GitCli, Vcs};
pub use interaction::{InteractionAdapter, require_selection};
pub use listing::{WorktreeRecord, parse_worktree_list, path_from_selection, selection_entries};
pub use paths::{PathDeriver, repository_identity, sanitize_branch_name};
pub use pr::{
    GhCli, HostingClient, PrWorktree, PullRequestSummary, create_pr_worktree, parse_pr_reference,
};
pub use prune::{PruneReport, prune};
pub use remove::{RemovalOutcome, RemovalRequest, remove_worktree};
pub use repo::{RepoContext, normalize_path};
pub use status::ChangeStatus;
