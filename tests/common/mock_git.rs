//! Scripted command runner for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use git_tend::error::{Error, Result};
use git_tend::repo::{CmdOutput, CommandRunner};
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Scripted [`CommandRunner`] standing in for real subprocesses
///
/// Features:
/// - Per-command response queues (repeat invocations consume in order)
/// - Default empty-success response for anything unscripted
/// - Call tracking for verification
/// - Missing-executable injection for fail-fast path testing
pub struct ScriptedRunner {
    responses: Mutex<HashMap<String, VecDeque<CmdOutput>>>,
    missing_programs: Mutex<HashSet<String>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    /// A runner where every command succeeds with empty output
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            missing_programs: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn key(program: &str, args: &[&str]) -> String {
        if args.is_empty() {
            program.to_string()
        } else {
            format!("{program} {}", args.join(" "))
        }
    }

    /// Queue an exact response for `command` (full command line)
    pub fn script(&self, command: &str, output: CmdOutput) {
        self.responses
            .lock()
            .unwrap()
            .entry(command.to_string())
            .or_default()
            .push_back(output);
    }

    /// Queue a successful response with the given stdout
    pub fn script_ok(&self, command: &str, stdout: &str) {
        self.script(
            command,
            CmdOutput {
                success: true,
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        );
    }

    /// Queue a failing response with the given stderr
    pub fn script_fail(&self, command: &str, stderr: &str) {
        self.script(
            command,
            CmdOutput {
                success: false,
                stdout: String::new(),
                stderr: stderr.to_string(),
            },
        );
    }

    /// Queue several responses for repeat invocations of `command`
    pub fn script_seq(&self, command: &str, stdouts: &[&str]) {
        for stdout in stdouts {
            self.script_ok(command, stdout);
        }
    }

    /// Make `resolve` fail for `program`
    pub fn mark_missing(&self, program: &str) {
        self.missing_programs
            .lock()
            .unwrap()
            .insert(program.to_string());
    }

    // === Call verification ===

    /// Every command line run so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of invocations whose command line equals `command`
    pub fn count_calls(&self, command: &str) -> usize {
        self.calls().iter().filter(|call| *call == command).count()
    }

    /// Assert some invocation's command line contains `needle`
    pub fn assert_called(&self, needle: &str) {
        let calls = self.calls();
        assert!(
            calls.iter().any(|call| call.contains(needle)),
            "Expected a call containing {needle:?} but got: {calls:#?}"
        );
    }

    /// Assert no invocation's command line contains `needle`
    pub fn assert_not_called(&self, needle: &str) {
        let calls = self.calls();
        assert!(
            !calls.iter().any(|call| call.contains(needle)),
            "Expected no call containing {needle:?} but got: {calls:#?}"
        );
    }
}

impl Default for ScriptedRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for ScriptedRunner {
    fn resolve(&self, program: &str) -> Result<PathBuf> {
        if self.missing_programs.lock().unwrap().contains(program) {
            return Err(Error::MissingExecutable(program.to_string()));
        }
        Ok(PathBuf::from(format!("/usr/bin/{program}")))
    }

    fn run(&self, _cwd: &Path, program: &str, args: &[&str]) -> Result<CmdOutput> {
        let key = Self::key(program, args);
        self.calls.lock().unwrap().push(key.clone());

        if let Some(queue) = self.responses.lock().unwrap().get_mut(&key) {
            if let Some(output) = queue.pop_front() {
                return Ok(output);
            }
        }
        Ok(CmdOutput::ok())
    }
}
