//! Implementation of the `wt pr` command

use anyhow::Result;
use owo_colors::OwoColorize;
use tracing::debug;
use wt_core::pr::{parse_pr_selection, pr_selection_entries};
use wt_core::{
    GhCli, HostingClient, InteractionAdapter, PrWorktree, WtError, create_pr_worktree,
    parse_pr_reference, require_selection,
};

use super::CommandContext;
use crate::colors::COLORS;
use crate::interaction::spinner;
use crate::output::{JsonResponse, OutputMode, PrData, print_json};

/// Run the pr command
pub fn run_pr(
    ctx: &CommandContext,
    reference: Option<&str>,
    adapter: &dyn InteractionAdapter,
    out: OutputMode,
) -> Result<i32> {
    let number = match reference {
        Some(reference) => parse_pr_reference(reference)?,
        None => {
            let gh = GhCli::new(&ctx.repo.toplevel);
            pick_pull_request(&gh, adapter)?
        }
    };

    let pb = spinner(&format!("Fetching PR #{}", number), out.human());
    let result = create_pr_worktree(&ctx.git, &ctx.repo.paths, number);
    pb.finish_and_clear();
    let worktree = result?;

    let data = PrData {
        number,
        path: worktree.path().to_path_buf(),
        created: matches!(worktree, PrWorktree::Created(_)),
    };

    if out.json {
        print_json(&JsonResponse::ok("pr", data));
    } else if !out.quiet {
        match worktree {
            PrWorktree::Existing(_) => println!(
                "{} PR #{} already checked out",
                "•".style(COLORS.active),
                number
            ),
            PrWorktree::Created(_) => println!(
                "{} checked out PR #{}",
                "✓".style(COLORS.success),
                number
            ),
        }
        println!("{}", data.path.display());
    }

    Ok(0)
}

/// List open pull requests and let the user choose one
fn pick_pull_request(
    hosting: &dyn HostingClient,
    adapter: &dyn InteractionAdapter,
) -> Result<u64, WtError> {
    let prs = hosting.list_open_pull_requests()?;
    debug!(count = prs.len(), "open pull requests");
    if prs.is_empty() {
        return Err(WtError::InvalidInput("no open pull requests".to_string()));
    }
    let line = require_selection(adapter, "pr>", &pr_selection_entries(&prs))?;
    parse_pr_selection(&line)
}
