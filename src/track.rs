//! Rebase/tracking coordination
//!
//! Computes the tracked base for a branch (configured upstream ref, with a
//! fallback to `<upstream-remote>/<main-branch>`), fetches the owning remote,
//! and rebases one branch or every non-main branch onto its base.

use crate::context::Invocation;
use crate::error::{Error, Result};
use crate::repo::{CommandRunner, GitWorkspace};
use crate::types::{Branch, RebaseOutcome, MAIN_BRANCHES};
use tracing::{debug, warn};

/// Pick the upstream remote from the configured remote names
///
/// Policy: a single remote is used as-is; among several, one literally named
/// `upstream` wins, then `origin`. Anything else is unresolvable; no default
/// can be safely chosen.
pub fn resolve_upstream(remotes: &[String]) -> Result<String> {
    match remotes {
        [] => Err(Error::UnresolvableUpstream(Vec::new())),
        [only] => Ok(only.clone()),
        several => several
            .iter()
            .find(|name| *name == "upstream")
            .or_else(|| several.iter().find(|name| *name == "origin"))
            .cloned()
            .ok_or_else(|| Error::UnresolvableUpstream(several.to_vec())),
    }
}

/// The memoized upstream remote for this invocation
pub fn upstream<R: CommandRunner>(
    workspace: &GitWorkspace<R>,
    invocation: &Invocation,
) -> Result<String> {
    invocation.upstream_with(|| resolve_upstream(&workspace.remotes()?))
}

/// The repository's main branch, preferring `main` over `master`
pub fn main_branch<R: CommandRunner>(workspace: &GitWorkspace<R>) -> Result<Branch> {
    let locals = workspace.local_branches()?;
    for name in MAIN_BRANCHES {
        if let Some(branch) = locals.iter().find(|branch| branch.name == name) {
            return Ok(branch.clone());
        }
    }
    // Neither exists locally; fall back to the first reserved name so the
    // tracked-branch fallback still points somewhere sensible.
    Ok(Branch::new(MAIN_BRANCHES[0]))
}

/// The ref `branch` should rebase onto
///
/// The configured `@{upstream}` ref when one exists, otherwise
/// `<upstream-remote>/<main-branch>`.
pub fn tracked_branch<R: CommandRunner>(
    workspace: &GitWorkspace<R>,
    invocation: &Invocation,
    branch: &Branch,
) -> Result<String> {
    if let Some(tracked) = workspace.tracked_ref(branch)? {
        return Ok(tracked);
    }
    let remote = upstream(workspace, invocation)?;
    let main = main_branch(workspace)?;
    Ok(format!("{remote}/{main}"))
}

/// Whether `base` looks like the branch's own push destination
///
/// A non-main branch tracking `<remote>/<same-name>` almost always means the
/// user is tracking where they push rather than the upstream source.
fn tracks_own_push(branch: &Branch, base: &str) -> bool {
    if branch.is_main() {
        return false;
    }
    base.split_once('/')
        .is_some_and(|(_, tracked_name)| tracked_name == branch.name)
}

/// Rebase `branch` (or the current branch) onto its tracked base
///
/// Fetches the remote owning the base first. A conflict is a failed outcome
/// carrying the captured rebase output, with the repository intentionally
/// left mid-rebase for manual resolution.
pub fn rebase_onto_tracked<R: CommandRunner>(
    workspace: &GitWorkspace<R>,
    invocation: &Invocation,
    branch: Option<&Branch>,
) -> Result<RebaseOutcome> {
    let subject = match branch {
        Some(branch) => branch.clone(),
        None => workspace.current_branch()?,
    };
    let base = tracked_branch(workspace, invocation, &subject)?;

    if let Some((remote, _)) = base.split_once('/') {
        workspace.fetch(remote)?;
    }

    let tracks_own_push = tracks_own_push(&subject, &base);
    if tracks_own_push {
        warn!(branch = %subject, %base, "branch tracks its own push destination");
    }

    debug!(branch = %subject, %base, "rebasing");
    let output = workspace.rebase(&base, branch)?;

    Ok(RebaseOutcome {
        succeeded: output.success,
        base,
        tracks_own_push,
        stdout: output.stdout,
        stderr: output.stderr,
    })
}

/// Rebase every non-main branch onto its tracked base
///
/// Each branch is checked out and rebased in turn. A failed rebase is aborted
/// (leaving that branch un-rebased and the tree clean) and the batch keeps
/// going; the branch checked out at the start is restored at the end.
pub fn rebase_all_onto_tracked<R: CommandRunner>(
    workspace: &GitWorkspace<R>,
    invocation: &Invocation,
) -> Result<Vec<(Branch, RebaseOutcome)>> {
    let original = workspace.current_branch()?;
    let mut results = Vec::new();

    for branch in workspace.local_branches()? {
        if branch.is_main() {
            continue;
        }
        workspace.checkout(&branch.name)?;
        let outcome = rebase_onto_tracked(workspace, invocation, Some(&branch))?;
        if !outcome.succeeded {
            warn!(branch = %branch, "rebase failed, aborting and moving on");
            workspace.rebase_abort()?;
        }
        results.push((branch, outcome));
    }

    workspace.checkout(&original.name)?;
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remotes(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_resolve_single_remote() {
        assert_eq!(resolve_upstream(&remotes(&["origin"])).unwrap(), "origin");
        assert_eq!(resolve_upstream(&remotes(&["fork"])).unwrap(), "fork");
    }

    #[test]
    fn test_resolve_prefers_upstream_over_origin() {
        assert_eq!(
            resolve_upstream(&remotes(&["origin", "upstream"])).unwrap(),
            "upstream"
        );
    }

    #[test]
    fn test_resolve_falls_back_to_origin() {
        assert_eq!(
            resolve_upstream(&remotes(&["origin", "fork"])).unwrap(),
            "origin"
        );
    }

    #[test]
    fn test_resolve_fails_without_recognized_names() {
        let err = resolve_upstream(&remotes(&["a", "b"])).unwrap_err();
        assert!(matches!(err, Error::UnresolvableUpstream(names) if names.len() == 2));
    }

    #[test]
    fn test_tracks_own_push_heuristic() {
        let feat = Branch::new("feat");
        assert!(tracks_own_push(&feat, "origin/feat"));
        assert!(!tracks_own_push(&feat, "origin/main"));
        assert!(!tracks_own_push(&Branch::new("main"), "origin/main"));
        assert!(!tracks_own_push(&feat, "feat"));
    }
}
