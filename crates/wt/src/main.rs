//! wt CLI - organise git worktrees by repository and branch

mod cli;
mod colors;
mod commands;
mod interaction;
mod logging;
mod output;

use std::process::ExitCode;

use cli::Commands;
use commands::CommandContext;
use interaction::CliAdapter;
use output::{JsonIssue, JsonResponse, OutputMode, print_json};
use owo_colors::OwoColorize;
use wt_core::WtError;

use crate::colors::COLORS;

fn main() -> ExitCode {
    let cli = cli::parse();
    logging::init_tracing(cli.verbose);

    let out = OutputMode {
        json: cli.json,
        quiet: cli.quiet,
    };

    let Some(command) = cli.command else {
        if !out.quiet {
            println!("wt v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
        }
        return ExitCode::SUCCESS;
    };

    let name = command.name();
    match run(command, out) {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            report_error(name, &e, out);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, out: OutputMode) -> anyhow::Result<i32> {
    if let Commands::Doctor = command {
        return commands::run_doctor(out);
    }

    let ctx = CommandContext::open()?;
    match command {
        Commands::New { reference, path } => commands::run_new(&ctx, &reference, path, out),
        Commands::Pr { reference } => {
            commands::run_pr(&ctx, reference.as_deref(), &CliAdapter::new(), out)
        }
        Commands::List => commands::run_list(&ctx, out),
        Commands::Path => commands::run_path(&ctx, &CliAdapter::new(), out),
        Commands::Rm => commands::run_remove(&ctx, &CliAdapter::new(), out),
        Commands::Prune => commands::run_prune(&ctx, out),
        Commands::Edit => commands::run_edit(&ctx, &CliAdapter::new(), out),
        Commands::Ai => commands::run_ai(&ctx, &CliAdapter::new(), out),
        Commands::Doctor => commands::run_doctor(out),
    }
}

/// Print `error: <msg>` and `hint: <command>`, or a JSON error envelope
fn report_error(command: &str, err: &anyhow::Error, out: OutputMode) {
    let wt_error = err.downcast_ref::<WtError>();

    if out.json {
        let issue = match wt_error {
            Some(e) => JsonIssue::from(e),
            None => JsonIssue {
                code: "internal".to_string(),
                severity: "error".to_string(),
                message: format!("{:#}", err),
                hint: None,
            },
        };
        let response: JsonResponse<Option<()>> = JsonResponse::error(command, None, vec![issue]);
        print_json(&response);
        return;
    }

    eprintln!("{} {:#}", "error:".style(COLORS.fail), err);
    if let Some(hint) = wt_error.and_then(WtError::hint) {
        eprintln!("{} {}", "hint:".style(COLORS.muted), hint);
    }
}
