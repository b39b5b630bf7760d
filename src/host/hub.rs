//! The classic `hub` CLI flavor

use crate::host::HostCli;
use crate::types::HostFlavor;

/// Argument builder for `hub`
pub struct HubCli;

impl HostCli for HubCli {
    fn flavor(&self) -> HostFlavor {
        HostFlavor::Hub
    }

    fn program(&self) -> &'static str {
        "hub"
    }

    fn create_pr_args(&self, title: &str, base: &str) -> Vec<String> {
        ["pull-request", "--message", title, "--base", base]
            .into_iter()
            .map(ToString::to_string)
            .collect()
    }
}
