//! Hosting-CLI services
//!
//! Drives the code-hosting command-line tool through the same subprocess seam
//! as git. Two interchangeable flavors are supported, selected by
//! configuration; each flavor only builds argument vectors and extracts the
//! PR URL from the tool's output, so the execution path stays shared.

mod gh;
mod hub;

pub use gh::GhCli;
pub use hub::HubCli;

use crate::error::{Error, Result};
use crate::repo::{CommandRunner, GitWorkspace};
use crate::types::{Branch, HostFlavor, PullRequest};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// A hosting CLI flavor
///
/// Implementations describe how to invoke one concrete tool; they never spawn
/// anything themselves.
pub trait HostCli {
    /// Which flavor this is
    fn flavor(&self) -> HostFlavor;

    /// Executable name of the tool
    fn program(&self) -> &'static str;

    /// Arguments that create a pull request for the current branch
    fn create_pr_args(&self, title: &str, base: &str) -> Vec<String>;
}

/// Instantiate the configured flavor
pub fn create_host_cli(flavor: HostFlavor) -> Box<dyn HostCli> {
    match flavor {
        HostFlavor::Gh => Box::new(GhCli),
        HostFlavor::Hub => Box::new(HubCli),
    }
}

/// Create a pull request for `head` against `base` via the hosting CLI
pub fn create_pr<R: CommandRunner>(
    workspace: &GitWorkspace<R>,
    host: &dyn HostCli,
    title: &str,
    base: &str,
    head: &Branch,
) -> Result<PullRequest> {
    let program = host.program();
    workspace.resolve_program(program)?;

    let args = host.create_pr_args(title, base);
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    debug!(program, ?args, "creating pull request");

    let output = workspace.run_program(program, &arg_refs)?;
    if !output.success {
        return Err(Error::Host(format!(
            "{program} pr creation failed: {}",
            output.stderr.trim()
        )));
    }

    let url = extract_pr_url(&output.stdout)
        .ok_or_else(|| Error::Host(format!("{program} printed no pull-request URL")))?;

    Ok(PullRequest {
        url,
        base_ref: base.to_string(),
        head_ref: head.name.clone(),
        title: title.to_string(),
    })
}

/// Pull the PR web URL out of the hosting CLI's output
///
/// Both supported tools print the created PR's URL on its own line; the last
/// URL wins because some versions echo remote progress lines first.
fn extract_pr_url(stdout: &str) -> Option<String> {
    static URL: OnceLock<Regex> = OnceLock::new();
    let re = URL.get_or_init(|| Regex::new(r"https://\S+").expect("hardcoded regex is valid"));
    re.find_iter(stdout)
        .last()
        .map(|found| found.as_str().to_string())
}
