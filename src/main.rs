//! tend - day-to-day Git workflow automation
//!
//! CLI binary for safe branch cleanup, tracked rebases, and gated pushes.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod cli;

#[derive(Parser)]
#[command(name = "tend")]
#[command(about = "Day-to-day Git workflow automation")]
#[command(version)]
struct Cli {
    /// Path to the git repository (defaults to current directory)
    #[arg(short, long, global = true)]
    path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new feature branch off the current HEAD
    Feature {
        /// Name of the branch to create
        name: String,
    },

    /// Delete a branch once its work is contained upstream
    Cleanup {
        /// Branch to delete (defaults to the current branch)
        branch: Option<String>,
    },

    /// Rebase onto the tracked branch
    Rebase {
        /// Branch to rebase (defaults to the current branch)
        branch: Option<String>,

        /// Rebase every branch except the main branches
        #[arg(long, conflicts_with = "branch")]
        all: bool,
    },

    /// Run one kind of configured checks
    Check {
        /// Check kind to run (e.g. lint, unit)
        kind: String,
    },

    /// Push the current branch, gated on the pre-push checks
    Push {
        /// Skip the pre-push checks
        #[arg(long)]
        no_verify: bool,
    },

    /// Push the current branch and open a pull request
    Pr {
        /// PR title (defaults to the HEAD commit subject)
        #[arg(long)]
        title: Option<String>,

        /// Base branch (defaults to the main branch)
        #[arg(long)]
        base: Option<String>,

        /// Skip the pre-push checks
        #[arg(long)]
        no_verify: bool,
    },
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let path = cli.path.unwrap_or_else(|| PathBuf::from("."));

    let completed = match cli.command {
        Commands::Feature { name } => cli::run_feature(&path, &name)?,
        Commands::Cleanup { branch } => cli::run_cleanup(&path, branch.as_deref())?,
        Commands::Rebase { branch, all } => cli::run_rebase(&path, branch.as_deref(), all)?,
        Commands::Check { kind } => cli::run_check(&path, &kind)?,
        Commands::Push { no_verify } => cli::run_push(&path, no_verify)?,
        Commands::Pr {
            title,
            base,
            no_verify,
        } => cli::run_pr(&path, title.as_deref(), base.as_deref(), no_verify)?,
    };

    Ok(if completed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
