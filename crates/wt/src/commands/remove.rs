//! Implementation of the `wt rm` command

use anyhow::Result;
use owo_colors::OwoColorize;
use wt_core::{InteractionAdapter, RemovalOutcome, RemovalRequest, normalize_path, remove_worktree};

use super::{CommandContext, pick_worktree};
use crate::colors::COLORS;
use crate::output::{JsonResponse, OutputMode, RemoveData, print_json};

/// Run the rm command
///
/// A declined confirmation is not an error.
pub fn run_remove(
    ctx: &CommandContext,
    adapter: &dyn InteractionAdapter,
    out: OutputMode,
) -> Result<i32> {
    let records = ctx.worktrees()?;
    let record = pick_worktree(adapter, &records)?;

    let target = normalize_path(&record.path);
    let primary = normalize_path(&ctx.repo.primary_root(&records));
    let cwd = normalize_path(&ctx.cwd);

    let outcome = remove_worktree(
        &ctx.git,
        adapter,
        &RemovalRequest {
            target: &target,
            primary: &primary,
            cwd: &cwd,
        },
    )?;

    if out.json {
        print_json(&JsonResponse::ok("rm", RemoveData { outcome }));
    } else if !out.quiet {
        match &outcome {
            RemovalOutcome::Removed { path, .. } => println!(
                "{} removed {}",
                "✓".style(COLORS.success),
                path.display()
            ),
            RemovalOutcome::Cancelled { path, .. } => println!(
                "{} kept {}",
                "•".style(COLORS.warning),
                path.display()
            ),
        }
    }

    Ok(0)
}
