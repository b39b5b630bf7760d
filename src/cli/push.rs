//! Push command - gate a push on the configured pre-push checks

use crate::cli::prompt::{confirm_push_anyway, TerminalPrompt};
use crate::cli::style::{check, cross, Stylize};
use anstream::println;
use git_tend::checks;
use git_tend::config::RepoConfig;
use git_tend::context::Invocation;
use git_tend::error::Result;
use git_tend::repo::{CommandRunner, GitWorkspace};
use git_tend::track;
use git_tend::types::Branch;
use std::path::Path;

/// Run the pre-push gate, then push the current branch to the upstream remote
pub fn run_push(path: &Path, no_verify: bool) -> Result<bool> {
    let workspace = GitWorkspace::discover(path)?;
    let invocation = Invocation::new();
    let config = RepoConfig::load(workspace.root())?;

    if !gate(&workspace, &invocation, &config, no_verify)? {
        return Ok(false);
    }

    let branch = workspace.current_branch()?;
    push_branch(&workspace, &invocation, &branch)
}

/// The pre-push gate shared by `push` and `pr`
///
/// Denied pushes can still be forced through an interactive confirmation;
/// `no_verify` skips the gate entirely.
pub fn gate<R: CommandRunner>(
    workspace: &GitWorkspace<R>,
    invocation: &Invocation,
    config: &RepoConfig,
    no_verify: bool,
) -> Result<bool> {
    if no_verify {
        return Ok(true);
    }
    if checks::run_prepush(workspace, invocation, config, &mut TerminalPrompt)? {
        return Ok(true);
    }
    confirm_push_anyway()
}

/// Push `branch` to the upstream remote, recording it as upstream on first push
pub fn push_branch<R: CommandRunner>(
    workspace: &GitWorkspace<R>,
    invocation: &Invocation,
    branch: &Branch,
) -> Result<bool> {
    let remote = track::upstream(workspace, invocation)?;
    let set_upstream = workspace.tracked_ref(branch)?.is_none();
    let output = workspace.push(&remote, branch, set_upstream)?;

    if output.success {
        println!(
            "{} pushed {} to {}",
            check(),
            branch.accent(),
            remote.accent()
        );
        Ok(true)
    } else {
        println!("{} push failed:", cross());
        println!("{}", output.stderr.trim());
        Ok(false)
    }
}
