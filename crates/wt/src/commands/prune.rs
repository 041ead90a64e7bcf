//! Implementation of the `wt prune` command

use anyhow::Result;
use owo_colors::OwoColorize;
use wt_core::prune;

use super::CommandContext;
use crate::colors::COLORS;
use crate::output::{JsonResponse, OutputMode, PruneData, print_json};

/// Run the prune command
pub fn run_prune(ctx: &CommandContext, out: OutputMode) -> Result<i32> {
    let report = prune(&ctx.git, ctx.repo.paths.base_dir())?;

    if out.json {
        print_json(&JsonResponse::ok("prune", PruneData { report }));
    } else if !out.quiet {
        let git_output = report.git_output.trim_end();
        if !git_output.is_empty() {
            println!("{}", git_output);
        }
        let noun = if report.removed_dirs == 1 {
            "directory"
        } else {
            "directories"
        };
        println!(
            "{} removed {} empty {}",
            "✓".style(COLORS.success),
            report.removed_dirs,
            noun
        );
    }

    Ok(0)
}
