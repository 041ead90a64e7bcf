//! Semantic color theme for consistent terminal output
//!
//! - `active` => blue - spinners, headers, branch labels
//! - `success` => green - completed operations, clean worktrees
//! - `warning` => yellow - uncommitted changes, cancelled removals
//! - `fail` => red - errors, missing or unreadable worktrees
//! - `muted` => dimmed - paths and secondary detail

use std::sync::LazyLock;

use owo_colors::Style;
use wt_core::ChangeStatus;

/// Semantic color definitions for terminal output
pub struct SemanticColors {
    pub active: Style,
    pub success: Style,
    pub warning: Style,
    pub fail: Style,
    pub muted: Style,
}

impl Default for SemanticColors {
    fn default() -> Self {
        Self {
            active: Style::new().blue(),
            success: Style::new().green(),
            warning: Style::new().yellow(),
            fail: Style::new().red(),
            muted: Style::new().dimmed(),
        }
    }
}

impl SemanticColors {
    /// Style for a worktree's change status
    pub fn for_status(&self, status: &ChangeStatus) -> Style {
        match status {
            ChangeStatus::Clean => self.success,
            ChangeStatus::Dirty { .. } => self.warning,
            ChangeStatus::Missing | ChangeStatus::Unknown => self.fail,
        }
    }
}

/// Global default theme
pub static COLORS: LazyLock<SemanticColors> = LazyLock::new(SemanticColors::default);

#[cfg(test)]
mod tests {
    use super::*;
    use owo_colors::OwoColorize;

    #[test]
    fn test_status_styles_differ() {
        let colors = SemanticColors::default();
        let clean = "x".style(colors.for_status(&ChangeStatus::Clean)).to_string();
        let missing = "x".style(colors.for_status(&ChangeStatus::Missing)).to_string();
        let dirty = "x"
            .style(colors.for_status(&ChangeStatus::Dirty {
                modified: 1,
                staged: 0,
                untracked: 0,
            }))
            .to_string();
        assert_ne!(clean, missing);
        assert_ne!(clean, dirty);
        assert_ne!(dirty, missing);
    }

    #[test]
    fn test_colors_global_is_accessible() {
        let _ = &COLORS.active;
        let _ = &COLORS.muted;
    }
}
