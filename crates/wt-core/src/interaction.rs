//! User interaction seam
//!
//! The core never talks to the terminal directly. Commands that need a
//! selection or a confirmation take an [`InteractionAdapter`]; the CLI
//! provides the fzf/dialoguer implementation.

use crate::error::WtError;

/// Blocking user interaction used by the interactive commands
pub trait InteractionAdapter {
    /// Offer newline-delimited `entries` in a picker
    ///
    /// Returns the chosen line, or `None` when the user cancelled or chose nothing.
    fn select_line(&self, prompt: &str, entries: &[String]) -> Result<Option<String>, WtError>;

    /// Ask a yes/no question; anything but an explicit yes is `false`
    fn confirm(&self, prompt: &str) -> Result<bool, WtError>;
}

/// Run the picker and treat an empty answer as cancellation of a required step
pub fn require_selection(
    adapter: &dyn InteractionAdapter,
    prompt: &str,
    entries: &[String],
) -> Result<String, WtError> {
    if entries.is_empty() {
        return Err(WtError::InvalidInput("nothing to select".to_string()));
    }
    match adapter.select_line(prompt, entries)? {
        Some(line) if !line.trim().is_empty() => Ok(line),
        _ => Err(WtError::Cancelled),
    }
}
