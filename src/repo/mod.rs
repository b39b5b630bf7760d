//! Git workspace access
//!
//! Wraps the blocking [`CommandRunner`] seam with the typed surface the core
//! needs. Every operation is one `git` subcommand; nothing here interprets
//! output beyond the parsers in [`parse`].

mod runner;

pub mod parse;

pub use runner::{CmdOutput, CommandRunner, SystemRunner};

use crate::error::{Error, Result};
use crate::types::{Branch, CherryEntry};
use std::path::{Path, PathBuf};

/// A git repository opened for one command invocation
#[derive(Debug)]
pub struct GitWorkspace<R = SystemRunner> {
    runner: R,
    root: PathBuf,
}

impl GitWorkspace<SystemRunner> {
    /// Open the repository containing `path`
    pub fn discover(path: &Path) -> Result<Self> {
        let runner = SystemRunner;
        let probe = runner.run(path, "git", &["rev-parse", "--show-toplevel"])?;
        if !probe.success {
            return Err(Error::NotARepository(path.to_path_buf()));
        }
        let root = PathBuf::from(probe.stdout.trim());
        Ok(Self { runner, root })
    }
}

impl<R: CommandRunner> GitWorkspace<R> {
    /// Build a workspace over an explicit runner and repository root
    pub fn with_runner(runner: R, root: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            root: root.into(),
        }
    }

    /// Repository root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The underlying runner
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run a git subcommand, capturing its result without judging it
    pub fn git(&self, args: &[&str]) -> Result<CmdOutput> {
        self.runner.run(&self.root, "git", args)
    }

    /// Run a git subcommand that is expected to succeed
    fn git_ok(&self, args: &[&str]) -> Result<CmdOutput> {
        let output = self.git(args)?;
        if output.success {
            Ok(output)
        } else {
            Err(Error::Git {
                args: args.iter().map(ToString::to_string).collect(),
                stderr: output.stderr,
            })
        }
    }

    /// Locate an arbitrary program on PATH, failing fast when absent
    pub fn resolve_program(&self, program: &str) -> Result<PathBuf> {
        self.runner.resolve(program)
    }

    /// Run an arbitrary program in the repository root
    pub fn run_program(&self, program: &str, args: &[&str]) -> Result<CmdOutput> {
        self.runner.run(&self.root, program, args)
    }

    /// The currently checked-out branch
    pub fn current_branch(&self) -> Result<Branch> {
        let output = self.git_ok(&["symbolic-ref", "HEAD"])?;
        parse::branch_from_ref(output.stdout.trim())
    }

    /// All local branches, by short name
    pub fn local_branches(&self) -> Result<Vec<Branch>> {
        let output = self.git_ok(&["for-each-ref", "--format=%(refname)", "refs/heads"])?;
        parse::parse_ref_list(&output.stdout)
    }

    /// Names of all configured remotes
    pub fn remotes(&self) -> Result<Vec<String>> {
        let output = self.git_ok(&["remote"])?;
        Ok(output
            .stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToString::to_string)
            .collect())
    }

    /// Fetch a remote
    pub fn fetch(&self, remote: &str) -> Result<()> {
        self.git_ok(&["fetch", remote]).map(|_| ())
    }

    /// Check out an existing ref
    pub fn checkout(&self, reference: &str) -> Result<()> {
        self.git_ok(&["checkout", reference]).map(|_| ())
    }

    /// Create a branch at `start_point` and check it out
    pub fn checkout_new(&self, name: &str, start_point: &str) -> Result<()> {
        self.git_ok(&["checkout", "-b", name, start_point])
            .map(|_| ())
    }

    /// The configured upstream tracking ref of `branch`, if any
    pub fn tracked_ref(&self, branch: &Branch) -> Result<Option<String>> {
        let refspec = format!("{branch}@{{upstream}}");
        let output = self.git(&["rev-parse", "--abbrev-ref", &refspec])?;
        if output.success {
            Ok(Some(output.stdout.trim().to_string()))
        } else {
            Ok(None)
        }
    }

    /// Cherry comparison of `head` against `upstream`
    pub fn cherry(&self, upstream: &str, head: &Branch) -> Result<Vec<CherryEntry>> {
        let output = self.git_ok(&["cherry", upstream, &head.name])?;
        parse::parse_cherry(&output.stdout)
    }

    /// Squash-merge `branch` into the current branch without committing
    ///
    /// The caller judges the captured result: a failure here usually means a
    /// merge conflict, not an infrastructure problem.
    pub fn merge_squash(&self, branch: &Branch) -> Result<CmdOutput> {
        self.git(&["merge", "--squash", &branch.name])
    }

    /// Diff of the staged changes
    pub fn staged_diff(&self) -> Result<String> {
        Ok(self.git_ok(&["diff", "--cached"])?.stdout)
    }

    /// Diff of the unstaged working-tree changes
    pub fn working_diff(&self) -> Result<String> {
        Ok(self.git_ok(&["diff"])?.stdout)
    }

    /// Porcelain status of the working tree
    pub fn status_porcelain(&self) -> Result<String> {
        Ok(self.git_ok(&["status", "--porcelain"])?.stdout)
    }

    /// Rebase `branch` (or the current branch) onto `base`, capturing the result
    pub fn rebase(&self, base: &str, branch: Option<&Branch>) -> Result<CmdOutput> {
        match branch {
            Some(branch) => self.git(&["rebase", base, &branch.name]),
            None => self.git(&["rebase", base]),
        }
    }

    /// Abort an in-progress rebase
    pub fn rebase_abort(&self) -> Result<()> {
        self.git_ok(&["rebase", "--abort"]).map(|_| ())
    }

    /// Force-delete a local branch
    pub fn delete_branch(&self, name: &str) -> Result<()> {
        self.git_ok(&["branch", "-D", name]).map(|_| ())
    }

    /// Hard-reset the working tree and index to `reference`
    pub fn reset_hard(&self, reference: &str) -> Result<()> {
        self.git_ok(&["reset", "--hard", reference]).map(|_| ())
    }

    /// Amend the current commit without editing its message
    pub fn amend_commit(&self, extra_args: &[&str]) -> Result<()> {
        let mut args = vec!["commit", "--amend", "--no-edit"];
        args.extend_from_slice(extra_args);
        self.git_ok(&args).map(|_| ())
    }

    /// Subject line of the current HEAD commit
    pub fn last_commit_subject(&self) -> Result<String> {
        let output = self.git_ok(&["log", "-1", "--format=%s"])?;
        Ok(output.stdout.trim().to_string())
    }

    /// Push `branch` to `remote`, optionally recording it as upstream
    pub fn push(&self, remote: &str, branch: &Branch, set_upstream: bool) -> Result<CmdOutput> {
        if set_upstream {
            self.git(&["push", "--set-upstream", remote, &branch.name])
        } else {
            self.git(&["push", remote, &branch.name])
        }
    }
}
