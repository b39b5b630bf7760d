//! Check command - run one kind of configured checks

use crate::cli::prompt::TerminalPrompt;
use crate::cli::style::{check, cross, Stylize};
use anstream::println;
use git_tend::checks;
use git_tend::config::RepoConfig;
use git_tend::context::Invocation;
use git_tend::error::Result;
use git_tend::repo::GitWorkspace;
use std::path::Path;

/// Run every configured check of `kind`
pub fn run_check(path: &Path, kind: &str) -> Result<bool> {
    let workspace = GitWorkspace::discover(path)?;
    let invocation = Invocation::new();
    let config = RepoConfig::load(workspace.root())?;

    let passed = checks::run_checks(
        &workspace,
        &invocation,
        &config,
        kind,
        &mut TerminalPrompt,
    )?;

    if passed {
        println!("{} {} checks passed", check(), kind.accent());
    } else {
        println!("{} {} checks failed", cross(), kind.accent());
    }
    Ok(passed)
}
