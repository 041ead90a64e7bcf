//! Stale worktree cleanup
//!
//! `git worktree prune` drops administrative entries whose directories are
//! gone; afterwards the managed base directory is swept for empty
//! directories left behind by removed worktrees.

use std::path::Path;

use serde::Serialize;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::WtError;
use crate::git::Vcs;

/// What a prune pass did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PruneReport {
    /// Output of `git worktree prune -v`, verbatim
    pub git_output: String,
    /// Number of empty directories removed under the base directory
    pub removed_dirs: usize,
}

/// Prune git's records, then sweep empty directories under `base_dir`
pub fn prune(vcs: &dyn Vcs, base_dir: &Path) -> Result<PruneReport, WtError> {
    let git_output = vcs.worktree_prune()?;
    let removed_dirs = remove_empty_dirs(base_dir)?;
    Ok(PruneReport {
        git_output,
        removed_dirs,
    })
}

/// Remove every empty directory below `root`, deepest first
///
/// Directories emptied by removals further down in the same pass are
/// removed as well. `root` itself is kept; a missing root removes nothing.
pub fn remove_empty_dirs(root: &Path) -> Result<usize, WtError> {
    if !root.is_dir() {
        return Ok(0);
    }

    let mut removed = 0;
    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .contents_first(true);

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        let dir = entry.path();
        let is_empty = std::fs::read_dir(dir)
            .map(|mut entries| entries.next().is_none())
            .unwrap_or(false);
        if is_empty {
            std::fs::remove_dir(dir)?;
            debug!(dir = %dir.display(), "removed empty directory");
            removed += 1;
        }
    }

    Ok(removed)
}
