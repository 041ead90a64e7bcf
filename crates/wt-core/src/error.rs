//! Error types for wt operations

use std::path::PathBuf;

use thiserror::Error;

/// Core error type for wt operations
#[derive(Error, Debug)]
pub enum WtError {
    // === User input ===
    /// Empty reference or malformed PR reference
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Target worktree path is already occupied
    #[error("path already exists: {}", path.display())]
    AlreadyExists { path: PathBuf },

    /// Every applicable strategy failed; `detail` carries git's reasons
    #[error("could not check out '{reference}': {detail}")]
    ReferenceNotFound { reference: String, detail: String },

    /// `git fetch` of a pull request head was rejected
    #[error("failed to fetch PR #{number}: {reason}")]
    FetchFailed { number: u64, reason: String },

    // === Removal ===
    /// Removal of the primary or the current worktree
    #[error("refusing to remove {}: {reason}", path.display())]
    RemovalForbidden { path: PathBuf, reason: String },

    /// `git worktree remove` failed
    #[error("failed to remove worktree {}: {reason}", path.display())]
    RemovalFailed { path: PathBuf, reason: String },

    // === Environment ===
    /// A required external program is not installed
    #[error("required program '{tool}' is not installed or not on PATH")]
    DependencyMissing { tool: String },

    /// Not inside a git repository
    #[error("not inside a git repository")]
    NotAGitRepository,

    /// Any other git invocation that exited non-zero
    #[error("git {command} failed: {stderr}")]
    GitCommand { command: String, stderr: String },

    /// User cancelled a required selection
    #[error("cancelled")]
    Cancelled,

    /// Picker or prompt failure
    #[error("interaction failed: {0}")]
    Interaction(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WtError {
    /// Stable error kind, used in JSON output
    pub fn code(&self) -> &'static str {
        match self {
            WtError::InvalidInput(_) => "invalid_input",
            WtError::AlreadyExists { .. } => "already_exists",
            WtError::ReferenceNotFound { .. } => "reference_not_found",
            WtError::FetchFailed { .. } => "fetch_failed",
            WtError::RemovalForbidden { .. } => "removal_forbidden",
            WtError::RemovalFailed { .. } => "removal_failed",
            WtError::DependencyMissing { .. } => "dependency_missing",
            WtError::NotAGitRepository => "not_a_git_repository",
            WtError::GitCommand { .. } => "git_command",
            WtError::Cancelled => "cancelled",
            WtError::Interaction(_) => "interaction",
            WtError::Config(_) => "config",
            WtError::Io(_) => "io",
        }
    }

    /// Literal command the user can run to recover, when there is one
    pub fn hint(&self) -> Option<String> {
        match self {
            WtError::AlreadyExists { path } => {
                // a linked worktree has a `.git` file; anything else is a plain directory
                if path.join(".git").is_file() {
                    Some(format!("git worktree remove {}", path.display()))
                } else {
                    Some(format!(
                        "choose another --path, or remove the directory {}",
                        path.display()
                    ))
                }
            }
            WtError::FetchFailed { number, .. } => Some(format!("gh pr view {number}")),
            WtError::RemovalFailed { path, .. } => {
                Some(format!("git worktree remove --force {}", path.display()))
            }
            WtError::DependencyMissing { tool } => Some(format!("command -v {tool}")),
            WtError::NotAGitRepository => Some("cd <your-repo>".to_string()),
            _ => None,
        }
    }

    /// Map a spawn error for `program` onto `DependencyMissing` when it is not installed
    pub fn from_spawn(program: &str, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            WtError::DependencyMissing {
                tool: program.to_string(),
            }
        } else {
            WtError::Io(err)
        }
    }
}
