//! CLI adapter implementation using fzf and dialoguer
//!
//! Selections are delegated to an external `fzf` process fed on stdin;
//! confirmations use a dialoguer prompt. A Ctrl+C during either sets a
//! global flag that turns the answer into `WtError::Cancelled`.

use std::fmt::Write as FmtWrite;
use std::io::{IsTerminal, Write};
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use console::Style;
use dialoguer::Confirm;
use dialoguer::theme::Theme;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;
use wt_core::{InteractionAdapter, WtError};

const FZF: &str = "fzf";

/// fzf exit codes for "no match" and "interrupted"
const FZF_NO_MATCH: i32 = 1;
const FZF_INTERRUPTED: i32 = 130;

/// Global flag to track if Ctrl+C was pressed
static CANCELLED: AtomicBool = AtomicBool::new(false);

fn is_cancelled() -> bool {
    CANCELLED.load(Ordering::SeqCst)
}

/// Set up the global Ctrl+C handler
pub fn setup_ctrl_c_handler() {
    static HANDLER_SET: AtomicBool = AtomicBool::new(false);

    if HANDLER_SET.swap(true, Ordering::SeqCst) {
        return;
    }

    if let Err(e) = ctrlc::set_handler(move || {
        CANCELLED.store(true, Ordering::SeqCst);
        eprintln!();
    }) {
        debug!(error = %e, "could not set Ctrl+C handler");
    }
}

/// Prompt theme: `? question (y/N)`
struct PromptTheme {
    prompt_style: Style,
    answer_style: Style,
    hint_style: Style,
}

impl PromptTheme {
    fn new() -> Self {
        Self {
            prompt_style: Style::new().cyan().bold(),
            answer_style: Style::new().cyan(),
            hint_style: Style::new().dim(),
        }
    }
}

impl Theme for PromptTheme {
    fn format_prompt(&self, f: &mut dyn FmtWrite, prompt: &str) -> std::fmt::Result {
        write!(f, "{}", self.prompt_style.apply_to(format!("? {}", prompt)))
    }

    fn format_confirm_prompt(
        &self,
        f: &mut dyn FmtWrite,
        prompt: &str,
        default: Option<bool>,
    ) -> std::fmt::Result {
        let hint = match default {
            Some(true) => "(Y/n)",
            Some(false) => "(y/N)",
            None => "(y/n)",
        };
        write!(
            f,
            "{} {}",
            self.prompt_style.apply_to(format!("? {}", prompt)),
            self.hint_style.apply_to(hint)
        )
    }

    fn format_confirm_prompt_selection(
        &self,
        f: &mut dyn FmtWrite,
        prompt: &str,
        selection: Option<bool>,
    ) -> std::fmt::Result {
        let answer = match selection {
            Some(true) => "Yes",
            Some(false) | None => "No",
        };
        write!(
            f,
            "{} {}",
            self.prompt_style.apply_to(format!("? {}", prompt)),
            self.answer_style.apply_to(answer)
        )
    }
}

/// Check if fzf is installed
pub fn fzf_installed() -> bool {
    Command::new(FZF)
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Spinner on stderr; hidden when `visible` is false or stderr is not a terminal
pub fn spinner(message: &str, visible: bool) -> ProgressBar {
    if !visible || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg} [{elapsed}]")
    {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// CLI adapter for terminal-based user interaction
pub struct CliAdapter {
    fzf_path: String,
    is_tty: bool,
}

impl CliAdapter {
    pub fn new() -> Self {
        Self::with_tty(std::io::stdin().is_terminal())
    }

    pub fn with_tty(is_tty: bool) -> Self {
        setup_ctrl_c_handler();
        Self {
            fzf_path: FZF.to_string(),
            is_tty,
        }
    }

    fn check_cancelled(&self) -> Result<(), WtError> {
        if is_cancelled() {
            Err(WtError::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl Default for CliAdapter {
    fn default() -> Self {
        Self::new()
    }
}

/// First non-empty line of fzf's stdout
fn chosen_line(stdout: &[u8]) -> Option<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .find(|line| !line.trim().is_empty())
        .map(str::to_string)
}

impl InteractionAdapter for CliAdapter {
    fn select_line(&self, prompt: &str, entries: &[String]) -> Result<Option<String>, WtError> {
        self.check_cancelled()?;

        let prompt = format!("{} ", prompt.trim_end());
        let mut child = Command::new(&self.fzf_path)
            .args([
                "--prompt",
                prompt.as_str(),
                "--delimiter",
                "\t",
                "--with-nth",
                "1",
                "--height",
                "40%",
                "--reverse",
            ])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| WtError::from_spawn(&self.fzf_path, e))?;

        if let Some(mut stdin) = child.stdin.take() {
            let mut input = entries.join("\n");
            input.push('\n');
            // fzf may exit before reading everything
            if let Err(e) = stdin.write_all(input.as_bytes()) {
                debug!(error = %e, "fzf closed its input early");
            }
        }

        let output = child.wait_with_output()?;
        self.check_cancelled()?;

        match output.status.code() {
            Some(0) => Ok(chosen_line(&output.stdout)),
            Some(FZF_NO_MATCH) | Some(FZF_INTERRUPTED) => Ok(None),
            _ => Err(WtError::Interaction(format!(
                "fzf exited with {}",
                output.status
            ))),
        }
    }

    fn confirm(&self, prompt: &str) -> Result<bool, WtError> {
        self.check_cancelled()?;

        if !self.is_tty {
            debug!(%prompt, "no terminal, treating confirmation as declined");
            return Ok(false);
        }

        let theme = PromptTheme::new();
        let answer = Confirm::with_theme(&theme)
            .with_prompt(prompt)
            .default(false)
            .interact_opt()
            .map_err(|e| WtError::Interaction(e.to_string()))?;

        self.check_cancelled()?;
        Ok(answer.unwrap_or(false))
    }
}
