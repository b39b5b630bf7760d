//! Check execution
//!
//! Resolves the ordered check list for a kind (static list or list-command,
//! memoized per invocation) and runs each check in the repository root. The
//! `lint` kind gets the auto-correction protocol: when a check mutates the
//! working tree, the user chooses between quitting the run and amending the
//! corrections into the current commit, after which the same checklist entry
//! restarts. A pre-push orchestrator runs a configured sequence of kinds.

use crate::config::{CheckSource, RepoConfig};
use crate::context::Invocation;
use crate::error::{Error, Result};
use crate::repo::{parse::split_command, CommandRunner, GitWorkspace};
use tracing::{debug, error, info, warn};

/// The check kind that enables the auto-correction protocol
pub const LINT_KIND: &str = "lint";

/// Amend-and-redo rounds allowed per checklist entry before the run is
/// declared non-converging
pub const MAX_CORRECTION_ROUNDS: usize = 5;

/// The user's decision after a check corrected the working tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrectionChoice {
    /// Abort the run, leaving the corrections unstaged for inspection
    Quit,
    /// Fold the corrections into the current commit and redo the check
    Amend,
}

impl CorrectionChoice {
    /// Interpret one line of user input; `None` means re-prompt
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "q" | "quit" => Some(Self::Quit),
            "a" | "amend" => Some(Self::Amend),
            _ => None,
        }
    }
}

/// Solicits a [`CorrectionChoice`] from the user
///
/// Separating the decision I/O from the engine keeps the redo loop testable
/// with a scripted sequence instead of a terminal.
pub trait CorrectionPrompt {
    /// Ask what to do about `check` having corrected the tree; `diff` is the
    /// unstaged correction
    fn choose(&mut self, check: &str, diff: &str) -> Result<CorrectionChoice>;
}

/// Run every check of `kind`, in order, inside the repository root
///
/// True only when the whole resolved list completed without error. Resolution
/// failures (unconfigured kind, missing list-command binary, list-command
/// exiting non-zero) fail the run before any check executes.
pub fn run_checks<R: CommandRunner, P: CorrectionPrompt>(
    workspace: &GitWorkspace<R>,
    invocation: &Invocation,
    config: &RepoConfig,
    kind: &str,
    prompt: &mut P,
) -> Result<bool> {
    let list = match invocation.check_list_with(kind, || resolve_checks(workspace, config, kind)) {
        Ok(list) => list,
        Err(
            err @ (Error::UnknownCheckKind(_)
            | Error::MissingExecutable(_)
            | Error::EmptyCommand
            | Error::ListCommand { .. }),
        ) => {
            error!(kind, %err, "cannot resolve check list");
            return Ok(false);
        }
        Err(other) => return Err(other),
    };

    debug!(kind, count = list.len(), "running checks");
    for check in &list {
        if !run_single_check(workspace, kind, check, prompt)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Run the configured pre-push kinds in order; the first failure denies the push
pub fn run_prepush<R: CommandRunner, P: CorrectionPrompt>(
    workspace: &GitWorkspace<R>,
    invocation: &Invocation,
    config: &RepoConfig,
    prompt: &mut P,
) -> Result<bool> {
    for kind in &config.prepush {
        if !run_checks(workspace, invocation, config, kind, prompt)? {
            warn!(%kind, "pre-push check kind failed");
            return Ok(false);
        }
    }
    Ok(true)
}

/// Resolve the ordered check list for `kind` from configuration
fn resolve_checks<R: CommandRunner>(
    workspace: &GitWorkspace<R>,
    config: &RepoConfig,
    kind: &str,
) -> Result<Vec<String>> {
    match config.check_source(kind) {
        None => Err(Error::UnknownCheckKind(kind.to_string())),
        Some(CheckSource::List(list)) => Ok(list.clone()),
        Some(CheckSource::Command { command }) => {
            let (program, args) = split_command(command).ok_or(Error::EmptyCommand)?;
            workspace.resolve_program(program)?;
            let output = workspace.run_program(program, &args)?;
            if !output.success {
                return Err(Error::ListCommand {
                    command: command.clone(),
                    stderr: output.stderr,
                });
            }
            Ok(output
                .stdout
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(ToString::to_string)
                .collect())
        }
    }
}

/// Run one checklist entry, honoring the lint redo loop
fn run_single_check<R: CommandRunner, P: CorrectionPrompt>(
    workspace: &GitWorkspace<R>,
    kind: &str,
    check: &str,
    prompt: &mut P,
) -> Result<bool> {
    let Some((program, args)) = split_command(check) else {
        error!(check, "blank check command");
        return Ok(false);
    };
    if let Err(err) = workspace.resolve_program(program) {
        error!(check, %err, "check executable not found");
        return Ok(false);
    }

    let mut rounds = 0;
    loop {
        let before = if kind == LINT_KIND {
            Some(workspace.status_porcelain()?)
        } else {
            None
        };

        debug!(check, "running");
        let output = workspace.run_program(program, &args)?;

        if let Some(before) = before {
            let after = workspace.status_porcelain()?;
            if after != before {
                info!(check, "check corrected the working tree");
                let diff = workspace.working_diff()?;
                match prompt.choose(check, &diff)? {
                    CorrectionChoice::Quit => return Ok(false),
                    CorrectionChoice::Amend => {
                        workspace.amend_commit(&["--all"])?;
                        rounds += 1;
                        if rounds >= MAX_CORRECTION_ROUNDS {
                            return Err(Error::CorrectionLoop {
                                check: check.to_string(),
                                rounds,
                            });
                        }
                        continue;
                    }
                }
            }
        }

        if !output.success {
            error!(check, stderr = %output.stderr, "check failed");
            return Ok(false);
        }
        return Ok(true);
    }
}
