//! Rebase command - rebase one branch or all of them onto their tracked base

use crate::cli::style::{check, cross, spinner_style, Stylize};
use anstream::println;
use git_tend::context::Invocation;
use git_tend::error::Result;
use git_tend::repo::GitWorkspace;
use git_tend::track;
use git_tend::types::{Branch, RebaseOutcome};
use indicatif::ProgressBar;
use std::path::Path;
use std::time::Duration;

/// Rebase the given branch (default: current) onto its tracked base, or with
/// `all` every non-main branch in turn
pub fn run_rebase(path: &Path, branch: Option<&str>, all: bool) -> Result<bool> {
    let workspace = GitWorkspace::discover(path)?;
    let invocation = Invocation::new();

    if all {
        return run_rebase_all(&workspace, &invocation);
    }

    let target = branch.map(Branch::new);
    let outcome = track::rebase_onto_tracked(&workspace, &invocation, target.as_ref())?;
    report_own_push_warning(&outcome);

    if outcome.succeeded {
        println!("{} rebased onto {}", check(), outcome.base.accent());
        Ok(true)
    } else {
        println!("{} rebase onto {} stopped:", cross(), outcome.base.accent());
        println!("{}", outcome.stderr.trim());
        println!(
            "{}",
            "resolve the conflicts, then `git rebase --continue` (or --abort)".muted()
        );
        Ok(false)
    }
}

fn run_rebase_all(workspace: &GitWorkspace, invocation: &Invocation) -> Result<bool> {
    let spinner = ProgressBar::new_spinner().with_style(spinner_style());
    spinner.set_message("Rebasing all branches...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let results = track::rebase_all_onto_tracked(workspace, invocation);
    spinner.finish_and_clear();
    let results = results?;

    if results.is_empty() {
        println!("{}", "No branches to rebase".muted());
        return Ok(true);
    }

    let mut all_ok = true;
    for (branch, outcome) in &results {
        report_own_push_warning(outcome);
        if outcome.succeeded {
            println!("{} {} onto {}", check(), branch.accent(), outcome.base);
        } else {
            all_ok = false;
            println!(
                "{} {} onto {} (aborted, left un-rebased)",
                cross(),
                branch.accent(),
                outcome.base
            );
        }
    }
    Ok(all_ok)
}

fn report_own_push_warning(outcome: &RebaseOutcome) {
    if outcome.tracks_own_push {
        println!(
            "{}",
            format!(
                "warning: tracked branch {} looks like this branch's own push destination, not an upstream source",
                outcome.base
            )
            .warn()
        );
    }
}
