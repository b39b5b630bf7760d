//! git-tend - day-to-day Git workflow automation
//!
//! The core is three components sharing a per-invocation context:
//!
//! - [`safety`] decides whether a branch can be deleted without losing work,
//!   surviving upstream history rewritten by squash merges
//! - [`track`] computes the tracked base for a branch and rebases one branch
//!   or all of them onto it
//! - [`checks`] resolves and runs a named class of checks, with an
//!   interactive auto-correction loop for lint checks
//!
//! Everything external (git itself, the hosting CLI, the configured checks)
//! is a blocking subprocess behind [`repo::CommandRunner`].

pub mod checks;
pub mod config;
pub mod context;
pub mod error;
pub mod host;
pub mod repo;
pub mod safety;
pub mod track;
pub mod types;

pub use config::RepoConfig;
pub use context::Invocation;
pub use error::{Error, Result};
pub use repo::GitWorkspace;
