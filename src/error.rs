//! Error types for git-tend

use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in git-tend
#[derive(Error, Debug)]
pub enum Error {
    /// No remote could be chosen as the upstream source
    #[error(
        "cannot resolve an upstream remote: found {0:?}, expected a single remote or one named 'upstream' or 'origin'"
    )]
    UnresolvableUpstream(Vec<String>),

    /// The given path is not inside a git repository
    #[error("not a git repository: {0}")]
    NotARepository(PathBuf),

    /// A git invocation failed where success was required
    #[error("git {args:?} failed: {stderr}")]
    Git {
        /// Arguments the failing invocation was given
        args: Vec<String>,
        /// Captured standard error of the failing invocation
        stderr: String,
    },

    /// A command's executable could not be found on PATH
    #[error("executable not found: {0}")]
    MissingExecutable(String),

    /// A command string had no executable token
    #[error("empty command string")]
    EmptyCommand,

    /// A configured list command exited with failure
    #[error("check list command '{command}' failed: {stderr}")]
    ListCommand {
        /// The configured list command
        command: String,
        /// Captured standard error of the failing invocation
        stderr: String,
    },

    /// No checks are configured for the requested kind
    #[error("no checks configured for kind '{0}'")]
    UnknownCheckKind(String),

    /// Spawning a subprocess failed
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Backend output did not match its expected grammar
    #[error("cannot parse {what}: {line:?}")]
    Parse {
        /// What was being parsed (e.g. "cherry line")
        what: &'static str,
        /// The offending line
        line: String,
    },

    /// Refused to run a destructive operation on a protected branch
    #[error("refusing to touch protected branch '{0}'")]
    ProtectedBranch(String),

    /// An auto-correcting check never converged
    #[error("check '{check}' kept modifying the tree after {rounds} amend rounds")]
    CorrectionLoop {
        /// The non-converging check command
        check: String,
        /// Rounds attempted before giving up
        rounds: usize,
    },

    /// Configuration file could not be read or parsed
    #[error("config error in {path}: {message}")]
    Config {
        /// File the error originated from
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    /// The hosting CLI failed or produced unusable output
    #[error("hosting CLI error: {0}")]
    Host(String),

    /// Reading an interactive choice failed
    #[error("prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;
