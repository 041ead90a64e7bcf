//! Implementation of the `wt new` command

use std::path::PathBuf;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use wt_core::create_worktree;

use super::CommandContext;
use crate::colors::COLORS;
use crate::output::{JsonResponse, NewData, OutputMode, print_json};

/// Run the new command
pub fn run_new(
    ctx: &CommandContext,
    reference: &str,
    path: Option<PathBuf>,
    out: OutputMode,
) -> Result<i32> {
    let explicit = path
        .map(std::path::absolute)
        .transpose()
        .context("invalid --path")?;

    let created = create_worktree(&ctx.git, &ctx.repo.paths, reference, explicit.as_deref())?;

    if out.json {
        print_json(&JsonResponse::ok("new", NewData::from(&created)));
    } else if !out.quiet {
        println!(
            "{} {} {}",
            "✓".style(COLORS.success),
            created.strategy,
            created.branch.style(COLORS.active)
        );
        println!("{}", created.path.display());
    }

    Ok(0)
}
