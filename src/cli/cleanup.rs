//! Cleanup command - delete a branch once its work is contained upstream

use crate::cli::style::{check, cross, Stylize};
use anstream::println;
use git_tend::context::Invocation;
use git_tend::error::Result;
use git_tend::repo::GitWorkspace;
use git_tend::types::Branch;
use git_tend::{safety, track};
use std::path::Path;

/// Delete `branch` (default: the current branch) when it is safe to do so
///
/// Main branches are rejected before the analyzer is even consulted. An
/// unsafe branch is left alone with guidance; that is a failed run.
pub fn run_cleanup(path: &Path, branch: Option<&str>) -> Result<bool> {
    let workspace = GitWorkspace::discover(path)?;
    let invocation = Invocation::new();

    let target = match branch {
        Some(name) => Branch::new(name),
        None => workspace.current_branch()?,
    };
    safety::ensure_deletable(&target)?;

    if !safety::is_safe_to_delete(&workspace, &invocation, &target)? {
        println!(
            "{} {} has work not contained upstream; merge or delete it manually",
            cross(),
            target.accent()
        );
        return Ok(false);
    }

    // Move off the branch before deleting it.
    if workspace.current_branch()? == target {
        let main = track::main_branch(&workspace)?;
        workspace.checkout(&main.name)?;
    }
    workspace.delete_branch(&target.name)?;
    println!("{} deleted {}", check(), target.accent());
    Ok(true)
}
