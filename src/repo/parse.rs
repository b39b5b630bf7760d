//! Parsers for the line-oriented git output the core consumes
//!
//! Only two machine-oriented formats are ever parsed: newline-delimited
//! fully-qualified reference lists and the per-line `+`/`-` sigils of
//! `git cherry`. Anything outside those grammars is a typed parse error
//! rather than a silent misclassification.

use crate::error::{Error, Result};
use crate::types::{Branch, CherryEntry, CherryStatus};

/// Derive a branch name from a fully-qualified reference
///
/// Strips the first two path segments, the namespace (`refs`) and the ref
/// kind (`heads`, `remotes`): `refs/heads/feat` yields `feat` and
/// `refs/remotes/origin/feat` yields `origin/feat`.
pub fn branch_from_ref(refname: &str) -> Result<Branch> {
    let mut segments = refname.splitn(3, '/');
    match (segments.next(), segments.next(), segments.next()) {
        (Some("refs"), Some(_kind), Some(rest)) if !rest.is_empty() => Ok(Branch::new(rest)),
        _ => Err(Error::Parse {
            what: "qualified ref",
            line: refname.to_string(),
        }),
    }
}

/// Parse a newline-delimited list of fully-qualified references
pub fn parse_ref_list(stdout: &str) -> Result<Vec<Branch>> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(branch_from_ref)
        .collect()
}

/// Parse `git cherry` output into typed entries
///
/// Grammar per line: a single sigil (`+` unmerged, `-` equivalent upstream),
/// one space, a commit hash.
pub fn parse_cherry(stdout: &str) -> Result<Vec<CherryEntry>> {
    stdout
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(parse_cherry_line)
        .collect()
}

fn parse_cherry_line(line: &str) -> Result<CherryEntry> {
    let malformed = || Error::Parse {
        what: "cherry line",
        line: line.to_string(),
    };

    let (sigil, rest) = line.split_at_checked(1).ok_or_else(|| malformed())?;
    let status = match sigil {
        "+" => CherryStatus::Unmerged,
        "-" => CherryStatus::Equivalent,
        _ => return Err(malformed()),
    };

    let commit = rest.trim();
    if commit.is_empty() || !commit.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(malformed());
    }

    Ok(CherryEntry {
        status,
        commit: commit.to_string(),
    })
}

/// Split a configured command string into its executable and arguments
///
/// Returns `None` for a blank string. The first whitespace-delimited token is
/// the executable; no shell interpretation is applied.
pub fn split_command(command: &str) -> Option<(&str, Vec<&str>)> {
    let mut tokens = command.split_whitespace();
    let program = tokens.next()?;
    Some((program, tokens.collect()))
}
