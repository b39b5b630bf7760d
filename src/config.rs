//! Repository and user configuration
//!
//! Checks and the hosting-CLI flavor come from `.tend.json` at the repository
//! root, optionally overlaid on a per-user file under the platform config
//! directory (`git-tend/config.json`). The repository file wins field by
//! field; check maps are merged with repository entries taking precedence.

use crate::error::{Error, Result};
use crate::types::HostFlavor;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up at the repository root
pub const REPO_CONFIG_FILE: &str = ".tend.json";

/// Where the checks of one kind come from
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CheckSource {
    /// A single command whose successful output, split into lines, is the list
    Command {
        /// The list command to run
        command: String,
    },
    /// A statically configured ordered list of commands
    List(Vec<String>),
}

/// Merged configuration for one repository
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepoConfig {
    /// Hosting CLI flavor used for PR operations
    #[serde(default)]
    pub host: HostFlavor,
    /// Check sources by kind (e.g. `lint`, `unit`)
    #[serde(default)]
    pub checks: HashMap<String, CheckSource>,
    /// Ordered check kinds run before a push
    #[serde(default)]
    pub prepush: Vec<String>,
}

impl RepoConfig {
    /// Load the configuration for the repository rooted at `root`
    ///
    /// Missing files are fine; a file that exists but does not parse is a
    /// configuration error.
    pub fn load(root: &Path) -> Result<Self> {
        let user = user_config_path()
            .map(|path| Self::read_optional(&path))
            .transpose()?
            .flatten()
            .unwrap_or_default();
        let repo = Self::read_optional(&root.join(REPO_CONFIG_FILE))?.unwrap_or_default();
        Ok(user.overlaid_with(repo))
    }

    /// The check source configured for `kind`, if any
    pub fn check_source(&self, kind: &str) -> Option<&CheckSource> {
        self.checks.get(kind)
    }

    fn read_optional(path: &Path) -> Result<Option<Self>> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        debug!(path = %path.display(), "loading config");
        let parsed = serde_json::from_str(&raw).map_err(|err| Error::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Ok(Some(parsed))
    }

    /// Overlay `other` on top of `self`, field by field
    fn overlaid_with(mut self, other: Self) -> Self {
        if other.host != HostFlavor::default() {
            self.host = other.host;
        }
        self.checks.extend(other.checks);
        if !other.prepush.is_empty() {
            self.prepush = other.prepush;
        }
        self
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("git-tend").join("config.json"))
}
