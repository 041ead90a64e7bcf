//! Guarded worktree removal
//!
//! `Selected -> Rejected | ConfirmationPending -> (Removed | Cancelled)`.
//! The primary checkout and the checkout containing the caller's working
//! directory are never removed. Worktrees with uncommitted changes are only
//! removed after an explicit yes; nothing is mutated before that answer.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::WtError;
use crate::git::Vcs;
use crate::interaction::InteractionAdapter;
use crate::status::{ChangeStatus, probe};

/// Why a worktree may not be removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    PrimaryWorktree,
    CurrentWorktree,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::PrimaryWorktree => f.write_str("is primary worktree"),
            RejectReason::CurrentWorktree => f.write_str("is current worktree"),
        }
    }
}

/// Verdict of the static guard checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Allowed,
    Rejected(RejectReason),
}

/// Pure guard predicate; all paths should already be normalized
pub fn check_removal(target: &Path, primary: &Path, cwd: &Path) -> Guard {
    if target == primary {
        Guard::Rejected(RejectReason::PrimaryWorktree)
    } else if cwd.starts_with(target) {
        Guard::Rejected(RejectReason::CurrentWorktree)
    } else {
        Guard::Allowed
    }
}

/// Inputs describing one removal request
#[derive(Debug, Clone)]
pub struct RemovalRequest<'a> {
    /// Worktree chosen by the user
    pub target: &'a Path,
    /// Primary checkout of the repository
    pub primary: &'a Path,
    /// Working directory of the caller
    pub cwd: &'a Path,
}

/// Terminal states of a removal that was not rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RemovalOutcome {
    Removed {
        path: PathBuf,
        status: ChangeStatus,
        parent_removed: bool,
    },
    Cancelled {
        path: PathBuf,
        status: ChangeStatus,
    },
}

/// Run the removal state machine for one worktree
pub fn remove_worktree(
    vcs: &dyn Vcs,
    adapter: &dyn InteractionAdapter,
    request: &RemovalRequest<'_>,
) -> Result<RemovalOutcome, WtError> {
    let target = request.target.to_path_buf();

    if let Guard::Rejected(reason) = check_removal(request.target, request.primary, request.cwd) {
        return Err(WtError::RemovalForbidden {
            path: target,
            reason: reason.to_string(),
        });
    }

    let status = probe(vcs, request.target);
    if !status.is_clean() {
        let prompt = confirmation_prompt(request.target, &status);
        if !adapter.confirm(&prompt)? {
            info!(path = %target.display(), "removal cancelled");
            return Ok(RemovalOutcome::Cancelled {
                path: target,
                status,
            });
        }
    }

    vcs.worktree_remove_force(request.target)
        .map_err(|e| WtError::RemovalFailed {
            path: target.clone(),
            reason: e.to_string(),
        })?;

    let parent_removed = request
        .target
        .parent()
        .is_some_and(remove_dir_if_empty);

    info!(path = %target.display(), parent_removed, "worktree removed");
    Ok(RemovalOutcome::Removed {
        path: target,
        status,
        parent_removed,
    })
}

fn confirmation_prompt(target: &Path, status: &ChangeStatus) -> String {
    match status {
        ChangeStatus::Missing => format!(
            "{} no longer exists on disk. Remove the worktree record anyway?",
            target.display()
        ),
        ChangeStatus::Unknown => format!(
            "Could not read the status of {}. Remove anyway?",
            target.display()
        ),
        _ => format!(
            "{} has uncommitted changes ({}). Remove anyway?",
            target.display(),
            status
        ),
    }
}

/// Remove `dir` only when it has no entries; failures are ignored
fn remove_dir_if_empty(dir: &Path) -> bool {
    let is_empty = std::fs::read_dir(dir)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false);
    if !is_empty {
        return false;
    }
    match std::fs::remove_dir(dir) {
        Ok(()) => true,
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "could not remove empty parent");
            false
        }
    }
}
