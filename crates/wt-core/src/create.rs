//! Worktree creation from an ambiguous reference
//!
//! A reference may name a tag, an existing local branch, a branch that does
//! not exist yet, or a branch that only exists on `origin`. [`Strategy::ORDER`]
//! fixes the precedence; the first strategy that applies and succeeds wins.
//!
//! `ByTag` and `ByRemoteBranch` only apply when their ref exists, and a
//! failure inside them ends the chain. `ByLocalBranch` and `ByNewBranch`
//! always apply and a failure simply moves on, since a failing
//! `git worktree add` is how we learn which of the two was meant.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::WtError;
use crate::git::Vcs;
use crate::paths::PathDeriver;

const REMOTE: &str = "origin";
const TAG_BRANCH_PREFIX: &str = "tags-";

/// One way of turning a reference into a worktree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// New `tags-<ref>` branch at the tag
    ByTag,
    /// Existing local branch
    ByLocalBranch,
    /// New local branch from the current HEAD
    ByNewBranch,
    /// New local branch tracking `origin/<ref>`
    ByRemoteBranch,
}

impl Strategy {
    /// Resolution order
    pub const ORDER: [Strategy; 4] = [
        Strategy::ByTag,
        Strategy::ByLocalBranch,
        Strategy::ByNewBranch,
        Strategy::ByRemoteBranch,
    ];

    /// Whether this strategy should be attempted for `reference`
    pub fn applies(&self, vcs: &dyn Vcs, reference: &str) -> bool {
        match self {
            Strategy::ByTag => vcs.tag_exists(reference),
            Strategy::ByLocalBranch | Strategy::ByNewBranch => true,
            Strategy::ByRemoteBranch => vcs.remote_branch_exists(REMOTE, reference),
        }
    }

    /// Whether a failed attempt ends resolution instead of moving on
    pub fn is_terminal(&self) -> bool {
        matches!(self, Strategy::ByTag | Strategy::ByRemoteBranch)
    }

    /// Branch the worktree ends up on
    pub fn branch_name(&self, reference: &str) -> String {
        match self {
            Strategy::ByTag => tag_branch_name(reference),
            _ => reference.to_string(),
        }
    }

    /// Create the worktree at `path`, returning the checked-out branch
    pub fn attempt(&self, vcs: &dyn Vcs, path: &Path, reference: &str) -> Result<String, WtError> {
        let branch = self.branch_name(reference);
        match self {
            Strategy::ByTag => {
                vcs.create_branch(&branch, &format!("refs/tags/{}", reference))?;
                if let Err(e) = vcs.worktree_add(path, &branch) {
                    if let Err(cleanup) = vcs.delete_branch(&branch) {
                        debug!(%branch, error = %cleanup, "could not delete tag branch");
                    }
                    return Err(e);
                }
            }
            Strategy::ByLocalBranch => vcs.worktree_add(path, reference)?,
            Strategy::ByNewBranch => vcs.worktree_add_new_branch(path, reference)?,
            Strategy::ByRemoteBranch => {
                let upstream = format!("{}/{}", REMOTE, reference);
                vcs.worktree_add_tracking(path, reference, &upstream)?;
            }
        }
        Ok(branch)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Strategy::ByTag => "created branch from tag",
            Strategy::ByLocalBranch => "checked out existing branch",
            Strategy::ByNewBranch => "created new branch",
            Strategy::ByRemoteBranch => "created branch tracking origin",
        };
        f.write_str(text)
    }
}

/// Branch synthesized for a tag checkout
pub fn tag_branch_name(tag: &str) -> String {
    format!("{}{}", TAG_BRANCH_PREFIX, tag)
}

/// Result of a successful creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedWorktree {
    pub path: PathBuf,
    pub branch: String,
    pub strategy: Strategy,
}

/// Managed path for `reference`; tags land under their `tags-` branch name
pub fn default_path(vcs: &dyn Vcs, paths: &PathDeriver, reference: &str) -> PathBuf {
    if Strategy::ByTag.applies(vcs, reference) {
        paths.branch_path(&tag_branch_name(reference))
    } else {
        paths.branch_path(reference)
    }
}

/// Validate a user-supplied reference
pub fn validate_reference(reference: &str) -> Result<&str, WtError> {
    let trimmed = reference.trim();
    if trimmed.is_empty() {
        return Err(WtError::InvalidInput(
            "branch or tag name must not be empty".to_string(),
        ));
    }
    Ok(trimmed)
}

/// Resolve `reference` into a new worktree
///
/// Uses `explicit_path` when given, otherwise the managed path. Fails with
/// `AlreadyExists` before touching anything when the target is occupied.
pub fn create_worktree(
    vcs: &dyn Vcs,
    paths: &PathDeriver,
    reference: &str,
    explicit_path: Option<&Path>,
) -> Result<CreatedWorktree, WtError> {
    let reference = validate_reference(reference)?;
    let path = match explicit_path {
        Some(p) => p.to_path_buf(),
        None => default_path(vcs, paths, reference),
    };

    if path.exists() {
        return Err(WtError::AlreadyExists { path });
    }
    let created_root = create_parent_dirs(&path)?;

    let mut reasons: Vec<String> = Vec::new();
    for strategy in Strategy::ORDER {
        if !strategy.applies(vcs, reference) {
            continue;
        }
        debug!(?strategy, %reference, "attempting");
        match strategy.attempt(vcs, &path, reference) {
            Ok(branch) => {
                info!(?strategy, %branch, path = %path.display(), "worktree created");
                return Ok(CreatedWorktree {
                    path,
                    branch,
                    strategy,
                });
            }
            Err(e) if strategy.is_terminal() => {
                remove_created_dirs(&path, created_root.as_deref());
                return Err(e);
            }
            Err(e) => {
                debug!(?strategy, error = %e, "strategy did not apply");
                let reason = failure_reason(&e);
                if !reasons.contains(&reason) {
                    reasons.push(reason);
                }
            }
        }
    }

    remove_created_dirs(&path, created_root.as_deref());
    Err(WtError::ReferenceNotFound {
        reference: reference.to_string(),
        detail: reasons.join("; "),
    })
}

/// Last meaningful line of a failed git call, without the `fatal: ` prefix
fn failure_reason(err: &WtError) -> String {
    match err {
        WtError::GitCommand { stderr, .. } => {
            let line = stderr
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .last()
                .unwrap_or_default();
            let line = line.strip_prefix("fatal: ").unwrap_or(line);
            if line.is_empty() {
                err.to_string()
            } else {
                line.to_string()
            }
        }
        other => other.to_string(),
    }
}

/// Create the missing ancestors of `path`; returns the topmost directory created
fn create_parent_dirs(path: &Path) -> Result<Option<PathBuf>, WtError> {
    let Some(parent) = path.parent() else {
        return Ok(None);
    };
    let top = parent
        .ancestors()
        .take_while(|dir| !dir.as_os_str().is_empty() && !dir.exists())
        .last()
        .map(Path::to_path_buf);
    std::fs::create_dir_all(parent)?;
    Ok(top)
}

/// Undo [`create_parent_dirs`], deepest first, stopping at the first non-empty directory
fn remove_created_dirs(path: &Path, top: Option<&Path>) {
    let (Some(parent), Some(top)) = (path.parent(), top) else {
        return;
    };
    for dir in parent.ancestors() {
        if let Err(e) = std::fs::remove_dir(dir) {
            debug!(dir = %dir.display(), error = %e, "kept directory");
            return;
        }
        if dir == top {
            return;
        }
    }
}
