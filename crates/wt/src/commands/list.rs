//! Implementation of the `wt list` command

use anyhow::Result;
use owo_colors::OwoColorize;
use wt_core::listing::visible;
use wt_core::status::probe;

use super::CommandContext;
use crate::colors::COLORS;
use crate::output::{JsonResponse, ListData, OutputMode, WorktreeEntry, print_json};

/// Run the list command
pub fn run_list(ctx: &CommandContext, out: OutputMode) -> Result<i32> {
    let records = ctx.worktrees()?;
    let primary = ctx.repo.primary_root(&records);

    let mut worktrees = Vec::new();
    for record in visible(&records) {
        worktrees.push(WorktreeEntry {
            status: probe(&ctx.git, &record.path),
            primary: record.path == primary,
            label: record.label(),
            path: record.path.clone(),
            branch: record.branch.clone(),
            head: record.head.clone(),
        });
    }

    if out.json {
        print_json(&JsonResponse::ok("list", ListData { worktrees }));
    } else if !out.quiet {
        if worktrees.is_empty() {
            println!("No worktrees found");
        } else {
            output_table(&worktrees);
        }
    }

    Ok(0)
}

fn output_table(worktrees: &[WorktreeEntry]) {
    let label_width = worktrees
        .iter()
        .map(|w| w.label.chars().count())
        .max()
        .unwrap_or(0);
    let status_width = worktrees
        .iter()
        .map(|w| w.status.to_string().len())
        .max()
        .unwrap_or(0);

    for entry in worktrees {
        let marker = if entry.primary { "*" } else { " " };
        let status = format!("{:<width$}", entry.status.to_string(), width = status_width);
        println!(
            "{} {}  {}  {}",
            marker,
            format!("{:<width$}", entry.label, width = label_width).style(COLORS.active),
            status.style(COLORS.for_status(&entry.status)),
            entry.path.display().style(COLORS.muted)
        );
    }
}
