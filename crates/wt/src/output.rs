//! Human and JSON output

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use wt_core::{ChangeStatus, Config, CreatedWorktree, PruneReport, RemovalOutcome, WtError};

const SCHEMA_VERSION: &str = "1";

/// JSON response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse<T> {
    /// Schema version for forward compatibility
    pub schema_version: String,
    /// Command that generated this response
    pub command: String,
    /// Status: "ok" or "error"
    pub status: String,
    /// Command-specific payload
    pub data: T,
    /// Errors and warnings
    pub issues: Vec<JsonIssue>,
}

impl<T> JsonResponse<T> {
    /// Create a successful response
    pub fn ok(command: &str, data: T) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            command: command.to_string(),
            status: "ok".to_string(),
            data,
            issues: vec![],
        }
    }

    /// Create an error response
    pub fn error(command: &str, data: T, issues: Vec<JsonIssue>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            command: command.to_string(),
            status: "error".to_string(),
            data,
            issues,
        }
    }
}

/// Issue object inside the envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonIssue {
    /// Stable error code (e.g. "already_exists")
    pub code: String,
    pub severity: String,
    /// Human-readable message
    pub message: String,
    /// Command that recovers from the problem
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl From<&WtError> for JsonIssue {
    fn from(err: &WtError) -> Self {
        Self {
            code: err.code().to_string(),
            severity: "error".to_string(),
            message: err.to_string(),
            hint: err.hint(),
        }
    }
}

/// Print a response as pretty JSON on stdout
pub fn print_json<T: Serialize>(response: &JsonResponse<T>) {
    match serde_json::to_string_pretty(response) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("error: failed to serialize JSON output: {}", e),
    }
}

/// Global output flags
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputMode {
    pub json: bool,
    pub quiet: bool,
}

impl OutputMode {
    /// Whether human-readable progress and results should be printed
    pub fn human(&self) -> bool {
        !self.json && !self.quiet
    }
}

/// Data payload for new command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewData {
    pub path: PathBuf,
    pub branch: String,
    /// Strategy that produced the worktree (e.g. "by_tag")
    pub strategy: String,
}

impl From<&CreatedWorktree> for NewData {
    fn from(created: &CreatedWorktree) -> Self {
        let strategy = serde_json::to_value(created.strategy)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        Self {
            path: created.path.clone(),
            branch: created.branch.clone(),
            strategy,
        }
    }
}

/// Data payload for pr command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrData {
    pub number: u64,
    pub path: PathBuf,
    /// False when an existing worktree was reused
    pub created: bool,
}

/// Data payload for list command
#[derive(Debug, Clone, Serialize)]
pub struct ListData {
    pub worktrees: Vec<WorktreeEntry>,
}

/// One row of `wt list`
#[derive(Debug, Clone, Serialize)]
pub struct WorktreeEntry {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    pub head: String,
    pub label: String,
    pub primary: bool,
    pub status: ChangeStatus,
}

/// Data payload for path, edit and ai commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathData {
    pub path: PathBuf,
    pub label: String,
}

/// Data payload for rm command
#[derive(Debug, Clone, Serialize)]
pub struct RemoveData {
    #[serde(flatten)]
    pub outcome: RemovalOutcome,
}

/// Data payload for prune command
#[derive(Debug, Clone, Serialize)]
pub struct PruneData {
    #[serde(flatten)]
    pub report: PruneReport,
}

/// Data payload for doctor command
#[derive(Debug, Clone, Serialize)]
pub struct DoctorData {
    pub checks: Vec<HealthCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Config>,
    pub summary: DoctorSummary,
}

/// Individual health check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    pub name: String,
    /// "pass", "warn" or "fail"
    pub status: String,
    pub message: String,
}

impl HealthCheck {
    pub fn new(name: &str, status: &str, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status: status.to_string(),
            message: message.into(),
        }
    }
}

/// Summary of doctor results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorSummary {
    pub passed: usize,
    pub warnings: usize,
    pub failures: usize,
}
