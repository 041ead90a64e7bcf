//! Implementation of the `wt path` command

use anyhow::Result;
use wt_core::InteractionAdapter;

use super::{CommandContext, pick_worktree};
use crate::output::{JsonResponse, OutputMode, PathData, print_json};

/// Run the path command
///
/// The path is printed even with `--quiet`; printing it is the point.
pub fn run_path(
    ctx: &CommandContext,
    adapter: &dyn InteractionAdapter,
    out: OutputMode,
) -> Result<i32> {
    let records = ctx.worktrees()?;
    let record = pick_worktree(adapter, &records)?;

    if out.json {
        print_json(&JsonResponse::ok(
            "path",
            PathData {
                label: record.label(),
                path: record.path,
            },
        ));
    } else {
        println!("{}", record.path.display());
    }

    Ok(0)
}
