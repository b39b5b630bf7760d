//! Blocking subprocess execution behind a mockable seam

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, trace};

/// Captured result of one subprocess invocation
#[derive(Debug, Clone)]
pub struct CmdOutput {
    /// Whether the process exited successfully
    pub success: bool,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl CmdOutput {
    /// An all-empty successful output, mostly useful in tests
    pub fn ok() -> Self {
        Self {
            success: true,
            stdout: String::new(),
            stderr: String::new(),
        }
    }
}

/// Executes external commands for the workspace
///
/// The whole system talks to `git`, the hosting CLI, and the configured checks
/// through this seam, so tests can substitute a scripted implementation.
pub trait CommandRunner {
    /// Locate `program` on PATH, failing fast when it does not exist
    fn resolve(&self, program: &str) -> Result<PathBuf>;

    /// Run `program` with `args` in `cwd`, blocking until it exits
    fn run(&self, cwd: &Path, program: &str, args: &[&str]) -> Result<CmdOutput>;
}

/// Runner backed by real subprocesses
#[derive(Debug, Clone, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn resolve(&self, program: &str) -> Result<PathBuf> {
        which::which(program).map_err(|_| Error::MissingExecutable(program.to_string()))
    }

    fn run(&self, cwd: &Path, program: &str, args: &[&str]) -> Result<CmdOutput> {
        debug!(cmd = %command_line(program, args), cwd = %cwd.display(), "exec");

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .map_err(|source| Error::Spawn {
                program: program.to_string(),
                source,
            })?;

        let result = CmdOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        trace!(
            program,
            success = result.success,
            stdout_bytes = result.stdout.len(),
            "completed"
        );
        Ok(result)
    }
}

/// Full command line as a string, for logging
fn command_line(program: &str, args: &[&str]) -> String {
    use std::fmt::Write as _;
    let mut cmd = program.to_string();
    for arg in args {
        if arg.contains(' ') {
            let _ = write!(cmd, " \"{arg}\"");
        } else {
            let _ = write!(cmd, " {arg}");
        }
    }
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_quotes_spaced_args() {
        assert_eq!(
            command_line("git", &["commit", "-m", "two words"]),
            "git commit -m \"two words\""
        );
    }

    #[test]
    fn test_resolve_missing_executable() {
        let err = SystemRunner
            .resolve("definitely-not-a-real-binary-4217")
            .unwrap_err();
        assert!(matches!(err, Error::MissingExecutable(_)));
    }
}
