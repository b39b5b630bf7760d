//! Feature command - start a new branch off the current HEAD

use crate::cli::style::{check, Stylize};
use anstream::println;
use git_tend::error::Result;
use git_tend::repo::GitWorkspace;
use std::path::Path;

/// Create branch `name` at the current HEAD and switch to it
pub fn run_feature(path: &Path, name: &str) -> Result<bool> {
    let workspace = GitWorkspace::discover(path)?;
    workspace.checkout_new(name, "HEAD")?;
    println!("{} switched to new branch {}", check(), name.accent());
    Ok(true)
}
