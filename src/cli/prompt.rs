//! Interactive prompts for the check engine

use crate::cli::style::Stylize;
use anstream::println;
use dialoguer::{Confirm, Input};
use git_tend::checks::{CorrectionChoice, CorrectionPrompt};
use git_tend::error::Result;

/// Prompt implementation backed by the terminal
///
/// Decision parsing stays in [`CorrectionChoice::parse`]; this only loops
/// until a line of input parses, re-prompting on anything else.
pub struct TerminalPrompt;

impl CorrectionPrompt for TerminalPrompt {
    fn choose(&mut self, check: &str, diff: &str) -> Result<CorrectionChoice> {
        println!();
        println!(
            "{} {} corrected the working tree:",
            "!".warn(),
            check.accent()
        );
        println!();
        println!("{diff}");

        loop {
            let line: String = Input::new()
                .with_prompt("[q]uit and inspect, or [a]mend into the current commit and redo")
                .allow_empty(true)
                .interact_text()?;
            if let Some(choice) = CorrectionChoice::parse(&line) {
                return Ok(choice);
            }
        }
    }
}

/// Ask whether to proceed after the pre-push gate failed
pub fn confirm_push_anyway() -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt("Pre-push checks failed. Push anyway?")
        .default(false)
        .interact()?)
}
