//! Core types for git-tend

use serde::{Deserialize, Serialize};

/// Branch names that are protected: never deleted, never batch-rebased.
pub const MAIN_BRANCHES: [&str; 2] = ["main", "master"];

/// A branch known to the local repository
///
/// Holds the short name, i.e. a fully-qualified reference with its first two
/// path segments (namespace and ref kind) stripped: `refs/heads/feat` becomes
/// `feat`, `refs/remotes/origin/feat` becomes `origin/feat`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Branch {
    /// Short branch name, unique within the repository
    pub name: String,
}

impl Branch {
    /// Create a branch from a short name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Whether this is one of the protected main branches
    pub fn is_main(&self) -> bool {
        MAIN_BRANCHES.contains(&self.name.as_str())
    }
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Classification of one commit by the cherry comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CherryStatus {
    /// An equivalent change already exists on the compared-against ref
    Equivalent,
    /// No equivalent change was found upstream
    Unmerged,
}

/// One line of cherry output: a commit and its upstream classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CherryEntry {
    /// Whether the commit's content is already present upstream
    pub status: CherryStatus,
    /// Commit hash (hex)
    pub commit: String,
}

/// Result of rebasing one branch onto its tracked base
#[derive(Debug, Clone)]
pub struct RebaseOutcome {
    /// Whether the rebase completed cleanly
    pub succeeded: bool,
    /// The base the branch was rebased onto (e.g. `origin/main`)
    pub base: String,
    /// The branch appears to track its own push destination rather than an
    /// upstream source; the rebase proceeded anyway
    pub tracks_own_push: bool,
    /// Captured standard output of the rebase invocation
    pub stdout: String,
    /// Captured standard error of the rebase invocation
    pub stderr: String,
}

/// A pull request created through the hosting CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// Web URL for the PR
    pub url: String,
    /// Base branch name
    pub base_ref: String,
    /// Head branch name
    pub head_ref: String,
    /// PR title
    pub title: String,
}

/// Which hosting CLI flavor to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostFlavor {
    /// The official `gh` CLI
    #[default]
    Gh,
    /// The classic `hub` CLI
    Hub,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_branches_are_protected() {
        assert!(Branch::new("main").is_main());
        assert!(Branch::new("master").is_main());
        assert!(!Branch::new("feature/x").is_main());
        assert!(!Branch::new("mainline").is_main());
    }

    #[test]
    fn test_host_flavor_default_is_gh() {
        assert_eq!(HostFlavor::default(), HostFlavor::Gh);
    }
}
