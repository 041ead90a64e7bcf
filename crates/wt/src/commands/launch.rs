//! Implementation of the `wt edit` and `wt ai` commands

use std::path::Path;
use std::process::Command;

use anyhow::Result;
use tracing::debug;
use wt_core::{InteractionAdapter, WtError};

use super::{CommandContext, pick_worktree};
use crate::output::{JsonResponse, OutputMode, PathData, print_json};

/// How the worktree is handed to the launched program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Handoff {
    /// Path appended as the last argument
    Argument,
    /// Program started with the worktree as working directory
    WorkingDirectory,
}

/// Run the edit command
pub fn run_edit(
    ctx: &CommandContext,
    adapter: &dyn InteractionAdapter,
    out: OutputMode,
) -> Result<i32> {
    launch(ctx, adapter, out, "edit", &ctx.config.editor, Handoff::Argument)
}

/// Run the ai command
pub fn run_ai(
    ctx: &CommandContext,
    adapter: &dyn InteractionAdapter,
    out: OutputMode,
) -> Result<i32> {
    launch(
        ctx,
        adapter,
        out,
        "ai",
        &ctx.config.ai_command,
        Handoff::WorkingDirectory,
    )
}

fn launch(
    ctx: &CommandContext,
    adapter: &dyn InteractionAdapter,
    out: OutputMode,
    name: &str,
    command_line: &str,
    handoff: Handoff,
) -> Result<i32> {
    let records = ctx.worktrees()?;
    let record = pick_worktree(adapter, &records)?;

    let mut command = build_command(command_line, &record.path, handoff)?;
    debug!(?command, "launching");
    let program = command.get_program().to_string_lossy().into_owned();
    let status = command
        .status()
        .map_err(|e| WtError::from_spawn(&program, e))?;

    if out.json {
        print_json(&JsonResponse::ok(
            name,
            PathData {
                label: record.label(),
                path: record.path,
            },
        ));
    }

    Ok(if status.success() { 0 } else { 1 })
}

/// Split `command_line` on whitespace and attach the worktree
fn build_command(command_line: &str, worktree: &Path, handoff: Handoff) -> Result<Command, WtError> {
    let mut parts = command_line.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| WtError::Config("launch command is empty".to_string()))?;

    let mut command = Command::new(program);
    command.args(parts);
    match handoff {
        Handoff::Argument => {
            command.arg(worktree);
        }
        Handoff::WorkingDirectory => {
            command.current_dir(worktree);
        }
    }
    Ok(command)
}
