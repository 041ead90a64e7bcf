//! Configuration handling for wt
//!
//! Values are resolved once per invocation, lowest precedence first:
//! built-in defaults, `<config_dir>/wt/config.toml`, then the `WT_*`
//! environment keys. Components receive the resulting [`Config`] explicitly.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::WtError;

/// Environment key for the managed worktree base directory
pub const ENV_WORKTREES_DIR: &str = "WT_WORKTREES_DIR";
/// Environment key for the editor command
pub const ENV_EDITOR: &str = "WT_EDITOR";
/// Environment key for the AI assistant command
pub const ENV_AI_CMD: &str = "WT_AI_CMD";

const DEFAULT_WORKTREES_DIRNAME: &str = "worktrees";
const DEFAULT_AI_COMMAND: &str = "claude";

/// Resolved wt configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Base directory under which `<repo>/<slug>` worktrees are created
    pub worktrees_dir: PathBuf,
    /// Editor command line used by `wt edit`
    pub editor: String,
    /// AI assistant command line used by `wt ai`
    pub ai_command: String,
}

/// Config file contents; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialConfig {
    pub worktrees_dir: Option<String>,
    pub editor: Option<String>,
    pub ai_command: Option<String>,
}

impl Config {
    /// Load configuration from the default config file and the process environment
    pub fn load() -> Result<Self, WtError> {
        let file = match config_file_path() {
            Some(path) if path.is_file() => Some(read_config_file(&path)?),
            _ => None,
        };
        Ok(Self::resolve(file, |key| std::env::var(key).ok()))
    }

    /// Combine defaults, an optional config file and an environment lookup
    pub fn resolve(file: Option<PartialConfig>, env: impl Fn(&str) -> Option<String>) -> Self {
        let file = file.unwrap_or_default();
        let home = dirs::home_dir();

        let worktrees_dir = non_empty(env(ENV_WORKTREES_DIR))
            .or_else(|| non_empty(file.worktrees_dir))
            .map(|raw| expand_home(&raw, home.as_deref()))
            .unwrap_or_else(|| {
                home.clone()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(DEFAULT_WORKTREES_DIRNAME)
            });

        let editor = non_empty(env(ENV_EDITOR))
            .or_else(|| non_empty(file.editor))
            .or_else(|| non_empty(env("VISUAL")))
            .or_else(|| non_empty(env("EDITOR")))
            .unwrap_or_else(|| "vi".to_string());

        let ai_command = non_empty(env(ENV_AI_CMD))
            .or_else(|| non_empty(file.ai_command))
            .unwrap_or_else(|| DEFAULT_AI_COMMAND.to_string());

        Self {
            worktrees_dir,
            editor,
            ai_command,
        }
    }
}

/// Location of the optional config file
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("wt").join("config.toml"))
}

/// Parse a config file
pub fn read_config_file(path: &Path) -> Result<PartialConfig, WtError> {
    let raw = std::fs::read_to_string(path)?;
    toml::from_str(&raw)
        .map_err(|e| WtError::Config(format!("failed to parse {}: {}", path.display(), e)))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn expand_home(raw: &str, home: Option<&Path>) -> PathBuf {
    match (raw.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => home.join(rest),
        _ if raw == "~" => home.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(raw)),
        _ => PathBuf::from(raw),
    }
}
