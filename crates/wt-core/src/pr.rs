//! Pull request worktrees
//!
//! A PR is checked out by fetching `pull/<n>/head` from `origin` into a local
//! `pr-<n>` branch and adding a worktree at `<base>/<repo>/pr-<n>`.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::WtError;
use crate::git::Vcs;
use crate::paths::{PathDeriver, pr_slug};

static PULL_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/pull/(\d+)(?:[/?#]|$)").expect("pull request URL pattern is valid")
});

/// Parse a PR number from `123`, `#123` or a `.../pull/123` URL
pub fn parse_pr_reference(input: &str) -> Result<u64, WtError> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return digits.parse().map_err(|_| invalid_reference(input));
    }

    PULL_URL_REGEX
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .ok_or_else(|| invalid_reference(input))
}

fn invalid_reference(input: &str) -> WtError {
    WtError::InvalidInput(format!(
        "'{}' is not a PR number or pull request URL",
        input.trim()
    ))
}

/// Number from a picker line built by [`pr_selection_entries`]
pub fn parse_pr_selection(line: &str) -> Result<u64, WtError> {
    let token = line.split_whitespace().next().unwrap_or_default();
    parse_pr_reference(token)
}

/// Open pull request as reported by the hosting API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestSummary {
    pub number: u64,
    pub title: String,
}

/// Picker lines `#<number> <title>`
pub fn pr_selection_entries(prs: &[PullRequestSummary]) -> Vec<String> {
    prs.iter()
        .map(|pr| format!("#{} {}", pr.number, pr.title))
        .collect()
}

/// Code-hosting API used to enumerate open pull requests
pub trait HostingClient {
    fn list_open_pull_requests(&self) -> Result<Vec<PullRequestSummary>, WtError>;
}

/// GitHub CLI (`gh`) wrapper
#[derive(Debug, Clone)]
pub struct GhCli {
    /// Path to the gh binary
    pub gh_path: String,
    /// Repository checkout gh runs in
    pub dir: PathBuf,
}

impl GhCli {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            gh_path: "gh".to_string(),
            dir: dir.into(),
        }
    }

    /// Check if gh is installed
    pub fn is_installed(&self) -> bool {
        Command::new(&self.gh_path)
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

impl HostingClient for GhCli {
    fn list_open_pull_requests(&self) -> Result<Vec<PullRequestSummary>, WtError> {
        debug!(dir = %self.dir.display(), "listing open pull requests");
        let output = Command::new(&self.gh_path)
            .current_dir(&self.dir)
            .args(["pr", "list", "--state", "open", "--json", "number,title"])
            .output()
            .map_err(|e| WtError::from_spawn(&self.gh_path, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(WtError::Interaction(format!(
                "gh pr list failed: {}",
                stderr.trim()
            )));
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|e| WtError::Interaction(format!("failed to parse gh pr list output: {}", e)))
    }
}

/// Outcome of [`create_pr_worktree`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "path", rename_all = "snake_case")]
pub enum PrWorktree {
    /// The worktree was already there; nothing was fetched
    Existing(PathBuf),
    /// Fetched and created
    Created(PathBuf),
}

impl PrWorktree {
    pub fn path(&self) -> &Path {
        match self {
            PrWorktree::Existing(p) | PrWorktree::Created(p) => p,
        }
    }
}

/// Check out PR `number` into its managed worktree
///
/// Idempotent: an existing `pr-<n>` directory is reported without refetching.
/// When the worktree cannot be added the freshly fetched branch is deleted again.
pub fn create_pr_worktree(
    vcs: &dyn Vcs,
    paths: &PathDeriver,
    number: u64,
) -> Result<PrWorktree, WtError> {
    let path = paths.pr_path(number);
    if path.exists() {
        info!(number, path = %path.display(), "PR worktree already present");
        return Ok(PrWorktree::Existing(path));
    }

    let branch = pr_slug(number);
    vcs.fetch_pull_request(number, &branch)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if let Err(e) = vcs.worktree_add(&path, &branch) {
        if let Err(cleanup) = vcs.delete_branch(&branch) {
            debug!(%branch, error = %cleanup, "could not delete PR branch");
        }
        return Err(e);
    }

    info!(number, path = %path.display(), "PR worktree created");
    Ok(PrWorktree::Created(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeVcs;

    #[test]
    fn test_parse_bare_numbers() {
        assert_eq!(parse_pr_reference("123").ok(), Some(123));
        assert_eq!(parse_pr_reference(" 0 ").ok(), Some(0));
        assert_eq!(parse_pr_reference("#77").ok(), Some(77));
    }

    #[test]
    fn test_parse_urls() {
        assert_eq!(
            parse_pr_reference("https://github.com/acme/widget/pull/456").ok(),
            Some(456)
        );
        assert_eq!(
            parse_pr_reference("https://github.com/acme/widget/pull/456/files").ok(),
            Some(456)
        );
        assert_eq!(
            parse_pr_reference("https://github.com/acme/widget/pull/9#discussion_r1").ok(),
            Some(9)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", "-1", "12abc", "abc", "https://github.com/acme/widget/issues/3", "/pull/x"] {
            assert!(
                matches!(parse_pr_reference(input), Err(WtError::InvalidInput(_))),
                "input: {input}"
            );
        }
    }

    #[test]
    fn test_parse_selection_line() {
        let entries = pr_selection_entries(&[PullRequestSummary {
            number: 42,
            title: "Fix the thing".to_string(),
        }]);
        assert_eq!(entries, vec!["#42 Fix the thing".to_string()]);
        assert_eq!(parse_pr_selection(&entries[0]).ok(), Some(42));
        assert!(parse_pr_selection("").is_err());
    }

    #[test]
    fn test_gh_json_shape() {
        let json = r#"[{"number":12,"title":"Add login"},{"number":9,"title":"Docs"}]"#;
        let prs: Vec<PullRequestSummary> = serde_json::from_str(json).expect("parse");
        assert_eq!(prs.len(), 2);
        assert_eq!(prs[0].number, 12);
        assert_eq!(prs[1].title, "Docs");
    }

    #[test]
    fn test_existing_pr_path_skips_fetch() {
        let base = tempfile::tempdir().expect("tempdir");
        let paths = PathDeriver::new(base.path(), "widget");
        std::fs::create_dir_all(paths.pr_path(123)).expect("mkdir");

        let vcs = FakeVcs::default();
        let outcome = create_pr_worktree(&vcs, &paths, 123).expect("existing");
        assert_eq!(outcome, PrWorktree::Existing(paths.pr_path(123)));
        assert!(vcs.calls().is_empty());
    }

    #[test]
    fn test_fetch_then_add() {
        let base = tempfile::tempdir().expect("tempdir");
        let paths = PathDeriver::new(base.path(), "widget");
        let vcs = FakeVcs::default();

        let outcome = create_pr_worktree(&vcs, &paths, 7).expect("created");
        assert_eq!(outcome.path(), paths.pr_path(7).as_path());
        assert!(matches!(outcome, PrWorktree::Created(_)));
        assert_eq!(
            vcs.calls(),
            vec![
                "fetch origin pull/7/head:pr-7".to_string(),
                format!("worktree add {} pr-7", paths.pr_path(7).display()),
            ]
        );
    }

    #[test]
    fn test_fetch_failure_is_terminal() {
        let base = tempfile::tempdir().expect("tempdir");
        let paths = PathDeriver::new(base.path(), "widget");
        let vcs = FakeVcs {
            fail_fetch: true,
            ..Default::default()
        };

        let err = create_pr_worktree(&vcs, &paths, 999).unwrap_err();
        assert!(matches!(err, WtError::FetchFailed { number: 999, .. }));
        assert_eq!(vcs.calls().len(), 1);
    }

    #[test]
    fn test_add_failure_deletes_branch() {
        let base = tempfile::tempdir().expect("tempdir");
        let paths = PathDeriver::new(base.path(), "widget");
        let vcs = FakeVcs {
            fail_add: true,
            ..Default::default()
        };

        let err = create_pr_worktree(&vcs, &paths, 5).unwrap_err();
        assert!(matches!(err, WtError::GitCommand { .. }));
        assert_eq!(vcs.calls().last().map(String::as_str), Some("branch -D pr-5"));
        assert!(vcs.created_branches().is_empty());
    }

    #[test]
    fn test_cleanup_failure_is_swallowed() {
        let base = tempfile::tempdir().expect("tempdir");
        let paths = PathDeriver::new(base.path(), "widget");
        let vcs = FakeVcs {
            fail_add: true,
            fail_delete_branch: true,
            ..Default::default()
        };

        let err = create_pr_worktree(&vcs, &paths, 5).unwrap_err();
        // the add error is reported, not the cleanup error
        assert!(matches!(err, WtError::GitCommand { ref command, .. } if command == "worktree add"));
    }
}
