//! CLI argument parsing with clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// wt - organise git worktrees by repository and branch
#[derive(Parser)]
#[command(name = "wt")]
#[command(version = VERSION)]
#[command(about = "Organise git worktrees by repository and branch")]
#[command(long_about = "wt keeps every worktree of a repository under one managed directory.\n\nWorktrees live at <base>/<repo>/<branch>, where <base> defaults to ~/worktrees\nand can be changed with WT_WORKTREES_DIR or the config file.\n\nInteractive commands (path, rm, edit, ai, and pr without an argument) use fzf as the picker.")]
pub struct Cli {
    /// Increase output verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a worktree for a tag or branch
    ///
    /// Tags get a `tags-<tag>` branch; unknown names become new branches.
    #[command(
        visible_alias = "add",
        long_about = "Create a worktree for a tag or branch.\n\nThe reference is resolved in this order:\n  1. tag             new branch tags-<tag> at the tag\n  2. local branch    checked out as is\n  3. new branch      created from the current HEAD\n  4. remote branch   new branch tracking origin/<name>\n\nThe worktree is placed at <base>/<repo>/<branch> unless --path is given."
    )]
    New {
        /// Tag or branch name
        reference: String,

        /// Create the worktree here instead of the managed location
        #[arg(long, value_name = "DIR")]
        path: Option<PathBuf>,
    },

    /// Check out a pull request into its own worktree
    ///
    /// Without an argument, open pull requests are offered in a picker.
    #[command(long_about = "Check out a pull request into its own worktree.\n\nAccepts a PR number, #number or a pull request URL. The head is fetched\nfrom origin into branch pr-<n> and checked out at <base>/<repo>/pr-<n>.\nAn existing pr-<n> worktree is reused without fetching.\n\nWithout an argument, open pull requests are listed with gh and offered in fzf.")]
    Pr {
        /// PR number or URL
        reference: Option<String>,
    },

    /// List worktrees with their change status
    #[command(visible_alias = "ls")]
    List,

    /// Pick a worktree and print its path
    ///
    /// Intended for `cd "$(wt path)"`.
    Path,

    /// Pick a worktree and remove it
    ///
    /// Asks for confirmation when the worktree has uncommitted changes.
    #[command(
        visible_alias = "remove",
        long_about = "Pick a worktree and remove it.\n\nThe primary worktree and the worktree containing the current directory are\nnever removed. Worktrees with uncommitted changes are only removed after an\nexplicit yes. The parent directory is removed as well when it becomes empty."
    )]
    Rm,

    /// Drop stale worktree records and empty directories
    #[command(long_about = "Drop stale worktree records and empty directories.\n\nRuns `git worktree prune -v`, then removes every empty directory below the\nworktree base directory.")]
    Prune,

    /// Pick a worktree and open it in the configured editor
    Edit,

    /// Pick a worktree and start the configured AI assistant in it
    Ai,

    /// Check external programs and configuration
    Doctor,
}

impl Commands {
    /// Name used in JSON envelopes
    pub fn name(&self) -> &'static str {
        match self {
            Commands::New { .. } => "new",
            Commands::Pr { .. } => "pr",
            Commands::List => "list",
            Commands::Path => "path",
            Commands::Rm => "rm",
            Commands::Prune => "prune",
            Commands::Edit => "edit",
            Commands::Ai => "ai",
            Commands::Doctor => "doctor",
        }
    }
}

/// Get the command args for use in the application
pub fn parse() -> Cli {
    Cli::parse()
}
