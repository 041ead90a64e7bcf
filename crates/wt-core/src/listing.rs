//! Parsing of `git worktree list --porcelain`
//!
//! The porcelain format is a sequence of stanzas separated by blank lines:
//!
//! ```text
//! worktree /path/to/main
//! HEAD 4f2a...
//! branch refs/heads/main
//!
//! worktree /path/to/detached
//! HEAD 9c1e...
//! detached
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;

/// One entry of the worktree listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorktreeRecord {
    /// Absolute worktree path (unique key)
    pub path: PathBuf,
    /// Checked-out branch; `None` for a detached HEAD
    pub branch: Option<String>,
    /// Commit the worktree HEAD points at
    pub head: String,
    /// Administrative record of a bare repository
    pub bare: bool,
}

impl WorktreeRecord {
    /// Short human label: branch name or `(detached <short-head>)`
    pub fn label(&self) -> String {
        match &self.branch {
            Some(branch) => branch.clone(),
            None => {
                let short: String = self.head.chars().take(7).collect();
                format!("(detached {})", short)
            }
        }
    }
}

#[derive(Default)]
struct Stanza {
    path: Option<PathBuf>,
    branch: Option<String>,
    head: Option<String>,
    bare: bool,
    touched: bool,
}

impl Stanza {
    fn finish(&mut self) -> Option<WorktreeRecord> {
        let stanza = std::mem::take(self);
        let path = stanza.path?;
        Some(WorktreeRecord {
            path,
            branch: stanza.branch,
            head: stanza.head.unwrap_or_default(),
            bare: stanza.bare,
        })
    }
}

/// Parse the porcelain listing into records, in listing order
///
/// A blank line or the end of input closes a stanza; stanzas without a
/// `worktree` line are dropped.
pub fn parse_worktree_list(output: &str) -> Vec<WorktreeRecord> {
    let mut records = Vec::new();
    let mut stanza = Stanza::default();

    for line in output.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            if stanza.touched {
                records.extend(stanza.finish());
            }
            continue;
        }

        stanza.touched = true;
        if let Some(path) = line.strip_prefix("worktree ") {
            stanza.path = Some(PathBuf::from(path));
        } else if let Some(head) = line.strip_prefix("HEAD ") {
            stanza.head = Some(head.to_string());
        } else if let Some(branch_ref) = line.strip_prefix("branch ") {
            let name = branch_ref.strip_prefix("refs/heads/").unwrap_or(branch_ref);
            stanza.branch = Some(name.to_string());
        } else if line == "bare" {
            stanza.bare = true;
        }
        // detached, locked, prunable: nothing to record
    }

    if stanza.touched {
        records.extend(stanza.finish());
    }

    records
}

/// Records shown to the user (bare records excluded)
pub fn visible(records: &[WorktreeRecord]) -> impl Iterator<Item = &WorktreeRecord> {
    records.iter().filter(|r| !r.bare)
}

/// The primary worktree: the first record, unless the repository is bare
pub fn primary_worktree(records: &[WorktreeRecord]) -> Option<&WorktreeRecord> {
    records.first().filter(|r| !r.bare)
}

/// Build picker lines of the form `label<TAB>path`
pub fn selection_entries(records: &[WorktreeRecord]) -> Vec<String> {
    visible(records)
        .map(|r| format!("{}\t{}", r.label(), r.path.display()))
        .collect()
}

/// Recover the path from a picker line built by [`selection_entries`]
pub fn path_from_selection(line: &str) -> Option<PathBuf> {
    let line = line.trim_end_matches(['\r', '\n']);
    let path = match line.split_once('\t') {
        Some((_, path)) => path,
        None => line,
    };
    let path = path.trim();
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

/// Find the record for `path`
pub fn find_record<'a>(records: &'a [WorktreeRecord], path: &Path) -> Option<&'a WorktreeRecord> {
    records.iter().find(|r| r.path == path)
}
