//! Branch-safety analysis
//!
//! Decides whether a branch can be deleted without losing unmerged work, in
//! two strategies applied cheapest-first:
//!
//! 1. Cherry comparison against the tracked branch. If every commit already
//!    has an equivalent upstream, the branch is trivially safe.
//! 2. A squash-merge probe, only when the cherry pass found at least one
//!    apparently-unmerged commit. That is the common case after the host
//!    squash-merges a pull request and rewrites history, which hides the
//!    match from the cherry pass. A scratch branch is created at the
//!    tracked ref, the branch is squash-merged into it without committing, and
//!    an empty staged diff proves the content is already contained upstream.
//!
//! The analyzer is conservative: a conflicting probe means safety is
//! indeterminate and the answer is false. The scratch branch is removed and
//! the working tree restored on every exit path.

use crate::context::Invocation;
use crate::error::{Error, Result};
use crate::repo::{CommandRunner, GitWorkspace};
use crate::track::tracked_branch;
use crate::types::{Branch, CherryStatus};
use tracing::debug;

/// Reject protected branch names before any analysis happens
///
/// The deletion path calls this first; a main branch never reaches the
/// analyzer at all.
pub fn ensure_deletable(branch: &Branch) -> Result<()> {
    if branch.is_main() {
        return Err(Error::ProtectedBranch(branch.name.clone()));
    }
    Ok(())
}

/// Name of the ephemeral branch used by the squash-merge probe
///
/// Deterministic per process, so a crashed run leaves at most one stray
/// branch to recognize.
pub fn scratch_branch_name() -> String {
    format!("tend-safety-probe-{}", std::process::id())
}

/// Whether deleting `branch` would lose work not yet contained upstream
///
/// Returns true only when the branch's full content is provably reachable,
/// by commit equivalence or by content, from the tracked branch.
pub fn is_safe_to_delete<R: CommandRunner>(
    workspace: &GitWorkspace<R>,
    invocation: &Invocation,
    branch: &Branch,
) -> Result<bool> {
    let tracked = tracked_branch(workspace, invocation, branch)?;

    let entries = workspace.cherry(&tracked, branch)?;
    let unmerged = entries
        .iter()
        .filter(|entry| entry.status == CherryStatus::Unmerged)
        .count();
    if unmerged == 0 {
        debug!(%branch, %tracked, "cherry found no unmerged commits");
        return Ok(true);
    }

    debug!(
        %branch,
        %tracked,
        unmerged,
        "cherry inconclusive, trying squash-merge probe"
    );
    squash_probe(workspace, branch, &tracked)
}

/// Prove or disprove content containment with a scratch squash merge
///
/// The create/merge/diff/delete sequence always restores the repository:
/// cleanup runs after the probe body no matter how it exited, and a probe
/// error wins over a secondary cleanup error.
fn squash_probe<R: CommandRunner>(
    workspace: &GitWorkspace<R>,
    branch: &Branch,
    tracked: &str,
) -> Result<bool> {
    let original = workspace.current_branch()?;
    let scratch = scratch_branch_name();
    workspace.checkout_new(&scratch, tracked)?;

    let verdict = probe_body(workspace, branch);
    let cleanup = restore(workspace, &original, &scratch);

    match (verdict, cleanup) {
        (Err(probe_err), _) => Err(probe_err),
        (Ok(_), Err(cleanup_err)) => Err(cleanup_err),
        (Ok(verdict), Ok(())) => Ok(verdict),
    }
}

fn probe_body<R: CommandRunner>(workspace: &GitWorkspace<R>, branch: &Branch) -> Result<bool> {
    let merge = workspace.merge_squash(branch)?;
    if !merge.success {
        // Conflict: cannot prove safety either way.
        debug!(%branch, "squash merge conflicted, treating as unsafe");
        return Ok(false);
    }
    let diff = workspace.staged_diff()?;
    Ok(diff.trim().is_empty())
}

fn restore<R: CommandRunner>(
    workspace: &GitWorkspace<R>,
    original: &Branch,
    scratch: &str,
) -> Result<()> {
    workspace.reset_hard("HEAD")?;
    workspace.checkout(&original.name)?;
    workspace.delete_branch(scratch)
}
