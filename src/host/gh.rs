//! The official `gh` CLI flavor

use crate::host::HostCli;
use crate::types::HostFlavor;

/// Argument builder for `gh`
pub struct GhCli;

impl HostCli for GhCli {
    fn flavor(&self) -> HostFlavor {
        HostFlavor::Gh
    }

    fn program(&self) -> &'static str {
        "gh"
    }

    fn create_pr_args(&self, title: &str, base: &str) -> Vec<String> {
        [
            "pr", "create", "--title", title, "--base", base, "--body", "",
        ]
        .into_iter()
        .map(ToString::to_string)
        .collect()
    }
}
