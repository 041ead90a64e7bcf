//! Managed worktree paths
//!
//! Every worktree lives at `<base_dir>/<repository identity>/<slug>`, where the
//! slug is the sanitized branch name or `pr-<number>`.

use std::path::{Path, PathBuf};

/// Derive the repository identity used as the first path segment
///
/// Uses the last segment of the remote URL with any trailing `/` and `.git`
/// removed. Both `/` and `:` separate segments, so scp-style remotes such as
/// `git@host:team/app.git` work. Falls back to the toplevel directory name.
pub fn repository_identity(remote_url: Option<&str>, toplevel: &Path) -> String {
    if let Some(name) = remote_url.and_then(identity_from_url) {
        return name;
    }
    toplevel
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "repo".to_string())
}

fn identity_from_url(url: &str) -> Option<String> {
    let trimmed = url.trim().trim_end_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);
    let trimmed = trimmed.trim_end_matches('/');
    let segment = trimmed.rsplit(['/', ':']).next()?;
    if segment.is_empty() {
        None
    } else {
        Some(segment.to_string())
    }
}

/// Make a branch name usable as a single path segment
///
/// `/` and `:` become `-`; `<>"|?*` become `_`. Branches that differ only in
/// those characters (`feature/x` vs `feature:x`) share a slug.
pub fn sanitize_branch_name(branch: &str) -> String {
    branch
        .chars()
        .map(|c| match c {
            '/' | ':' => '-',
            '<' | '>' | '"' | '|' | '?' | '*' => '_',
            other => other,
        })
        .collect()
}

/// Slug for a pull request worktree and its local branch
pub fn pr_slug(number: u64) -> String {
    format!("pr-{}", number)
}

/// Maps branch and PR identifiers onto managed paths for one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathDeriver {
    base_dir: PathBuf,
    identity: String,
}

impl PathDeriver {
    pub fn new(base_dir: impl Into<PathBuf>, identity: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            identity: identity.into(),
        }
    }

    /// Configured base directory shared by all repositories
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// `<base_dir>/<identity>`
    pub fn worktree_base(&self) -> PathBuf {
        self.base_dir.join(&self.identity)
    }

    /// `<base_dir>/<identity>/<sanitized branch>`
    pub fn branch_path(&self, branch: &str) -> PathBuf {
        self.worktree_base().join(sanitize_branch_name(branch))
    }

    /// `<base_dir>/<identity>/pr-<number>`
    pub fn pr_path(&self, number: u64) -> PathBuf {
        self.worktree_base().join(pr_slug(number))
    }
}
