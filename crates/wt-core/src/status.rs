//! Per-worktree change status
//!
//! Classification is coarse: each `git status --porcelain` line
//! is bucketed by its two-letter prefix, and composite states such as `MM`
//! count as both staged and modified.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::git::Vcs;

/// Live change state of one worktree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ChangeStatus {
    /// Worktree directory does not exist
    Missing,
    /// No changes
    Clean,
    /// `git status` failed, e.g. a corrupt `.git` file
    Unknown,
    /// Uncommitted changes
    Dirty {
        modified: usize,
        staged: usize,
        untracked: usize,
    },
}

impl ChangeStatus {
    pub fn is_clean(&self) -> bool {
        matches!(self, ChangeStatus::Clean)
    }
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeStatus::Missing => write!(f, "missing"),
            ChangeStatus::Clean => write!(f, "clean"),
            ChangeStatus::Unknown => write!(f, "unknown"),
            ChangeStatus::Dirty {
                modified,
                staged,
                untracked,
            } => {
                let mut parts = Vec::new();
                if *staged > 0 {
                    parts.push(format!("{} staged", staged));
                }
                if *modified > 0 {
                    parts.push(format!("{} modified", modified));
                }
                if *untracked > 0 {
                    parts.push(format!("{} untracked", untracked));
                }
                if parts.is_empty() {
                    write!(f, "dirty")
                } else {
                    write!(f, "{}", parts.join(", "))
                }
            }
        }
    }
}

/// Classify `git status --porcelain` output
pub fn classify_porcelain(output: &str) -> ChangeStatus {
    let mut modified = 0;
    let mut staged = 0;
    let mut untracked = 0;
    let mut other = 0;

    for line in output.lines().filter(|l| !l.trim().is_empty()) {
        if line.starts_with("??") {
            untracked += 1;
            continue;
        }
        let mut chars = line.chars();
        let index = chars.next().unwrap_or(' ');
        let worktree = chars.next().unwrap_or(' ');

        let mut counted = false;
        if "MADRC".contains(index) {
            staged += 1;
            counted = true;
        }
        if "MD".contains(worktree) {
            modified += 1;
            counted = true;
        }
        if !counted {
            // unmerged and other states still make the tree dirty
            other += 1;
        }
    }

    if modified + staged + untracked + other == 0 {
        ChangeStatus::Clean
    } else {
        ChangeStatus::Dirty {
            modified,
            staged,
            untracked,
        }
    }
}

/// Query the live change status of the worktree at `path`
///
/// Never fails: an unreadable worktree is reported as [`ChangeStatus::Unknown`]
/// so one broken checkout does not hide the others.
pub fn probe(vcs: &dyn Vcs, path: &Path) -> ChangeStatus {
    if !path.is_dir() {
        return ChangeStatus::Missing;
    }
    match vcs.status_porcelain(path) {
        Ok(output) => classify_porcelain(&output),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "status unavailable");
            ChangeStatus::Unknown
        }
    }
}
