//! PR command - push the current branch and open a pull request

use crate::cli::push::{gate, push_branch};
use crate::cli::style::{check, hyperlink_url, Stylize};
use anstream::println;
use git_tend::config::RepoConfig;
use git_tend::context::Invocation;
use git_tend::error::Result;
use git_tend::host;
use git_tend::repo::GitWorkspace;
use git_tend::track;
use std::path::Path;

/// Gate, push, then create a pull request through the configured hosting CLI
pub fn run_pr(
    path: &Path,
    title: Option<&str>,
    base: Option<&str>,
    no_verify: bool,
) -> Result<bool> {
    let workspace = GitWorkspace::discover(path)?;
    let invocation = Invocation::new();
    let config = RepoConfig::load(workspace.root())?;

    if !gate(&workspace, &invocation, &config, no_verify)? {
        return Ok(false);
    }

    let branch = workspace.current_branch()?;
    if !push_branch(&workspace, &invocation, &branch)? {
        return Ok(false);
    }

    let title = match title {
        Some(title) => title.to_string(),
        None => workspace.last_commit_subject()?,
    };
    let base = match base {
        Some(base) => base.to_string(),
        None => track::main_branch(&workspace)?.name,
    };

    let host_cli = host::create_host_cli(config.host);
    let pr = host::create_pr(&workspace, host_cli.as_ref(), &title, &base, &branch)?;

    println!(
        "{} opened {} {}",
        check(),
        pr.title.emphasis(),
        hyperlink_url(&pr.url).accent()
    );
    Ok(true)
}
