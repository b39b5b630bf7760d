//! Shared fixtures for the scripted-runner tests

#![allow(dead_code)]

use crate::common::mock_git::ScriptedRunner;
use git_tend::checks::{CorrectionChoice, CorrectionPrompt};
use git_tend::config::RepoConfig;
use git_tend::error::Result;
use git_tend::repo::GitWorkspace;
use std::collections::VecDeque;

/// Workspace over a scripted runner, rooted at a fake path
pub fn workspace(runner: ScriptedRunner) -> GitWorkspace<ScriptedRunner> {
    GitWorkspace::with_runner(runner, "/repo")
}

/// Parse a [`RepoConfig`] from a JSON literal
pub fn config(json: &str) -> RepoConfig {
    serde_json::from_str(json).expect("fixture config is valid JSON")
}

/// Correction prompt fed from a scripted decision sequence
///
/// Panics when the engine asks for more decisions than were scripted, which
/// doubles as an assertion that the prompt fires the expected number of times.
pub struct ScriptedPrompt {
    choices: VecDeque<CorrectionChoice>,
    /// Checks the prompt was asked about, in order
    pub asked: Vec<String>,
    /// Diffs shown alongside each question
    pub diffs: Vec<String>,
}

impl ScriptedPrompt {
    /// Prompt that answers with `choices`, first to last
    pub fn with_choices(choices: &[CorrectionChoice]) -> Self {
        Self {
            choices: choices.iter().copied().collect(),
            asked: Vec::new(),
            diffs: Vec::new(),
        }
    }

    /// Prompt that panics if consulted at all
    pub fn unreachable() -> Self {
        Self::with_choices(&[])
    }
}

impl CorrectionPrompt for ScriptedPrompt {
    fn choose(&mut self, check: &str, diff: &str) -> Result<CorrectionChoice> {
        self.asked.push(check.to_string());
        self.diffs.push(diff.to_string());
        Ok(self
            .choices
            .pop_front()
            .expect("engine asked for more decisions than the test scripted"))
    }
}
