//! Check-execution engine behavior against a scripted backend

mod common;

use common::fixtures::{config, workspace, ScriptedPrompt};
use common::mock_git::ScriptedRunner;
use git_tend::checks::{run_checks, run_prepush, CorrectionChoice, MAX_CORRECTION_ROUNDS};
use git_tend::context::Invocation;
use git_tend::error::Error;

#[test]
fn test_empty_resolved_list_is_vacuously_true() {
    let ws = workspace(ScriptedRunner::new());
    let cfg = config(r#"{"checks": {"unit": []}}"#);

    let passed = run_checks(
        &ws,
        &Invocation::new(),
        &cfg,
        "unit",
        &mut ScriptedPrompt::unreachable(),
    )
    .unwrap();

    assert!(passed);
    assert!(ws.runner().calls().is_empty(), "no subprocess may run");
}

#[test]
fn test_unconfigured_kind_fails_without_running_anything() {
    let ws = workspace(ScriptedRunner::new());
    let cfg = config("{}");

    let passed = run_checks(
        &ws,
        &Invocation::new(),
        &cfg,
        "unit",
        &mut ScriptedPrompt::unreachable(),
    )
    .unwrap();

    assert!(!passed);
    assert!(ws.runner().calls().is_empty());
}

#[test]
fn test_failing_list_command_runs_no_checks() {
    let runner = ScriptedRunner::new();
    runner.script_fail("list-lints", "enumeration broke");
    let ws = workspace(runner);
    let cfg = config(r#"{"checks": {"lint": {"command": "list-lints"}}}"#);

    let passed = run_checks(
        &ws,
        &Invocation::new(),
        &cfg,
        "lint",
        &mut ScriptedPrompt::unreachable(),
    )
    .unwrap();

    assert!(!passed);
    assert_eq!(ws.runner().calls(), vec!["list-lints"]);
}

#[test]
fn test_missing_list_command_binary_fails_before_execution() {
    let runner = ScriptedRunner::new();
    runner.mark_missing("list-lints");
    let ws = workspace(runner);
    let cfg = config(r#"{"checks": {"lint": {"command": "list-lints"}}}"#);

    let passed = run_checks(
        &ws,
        &Invocation::new(),
        &cfg,
        "lint",
        &mut ScriptedPrompt::unreachable(),
    )
    .unwrap();

    assert!(!passed);
    assert!(ws.runner().calls().is_empty());
}

#[test]
fn test_missing_check_executable_fails_fast() {
    let runner = ScriptedRunner::new();
    runner.mark_missing("ghost-tool");
    let ws = workspace(runner);
    let cfg = config(r#"{"checks": {"unit": ["ghost-tool --flag"]}}"#);

    let passed = run_checks(
        &ws,
        &Invocation::new(),
        &cfg,
        "unit",
        &mut ScriptedPrompt::unreachable(),
    )
    .unwrap();

    assert!(!passed);
    ws.runner().assert_not_called("ghost-tool");
}

#[test]
fn test_failing_check_stops_the_remaining_list() {
    let runner = ScriptedRunner::new();
    runner.script_fail("cmd-a", "assertion failed");
    let ws = workspace(runner);
    let cfg = config(r#"{"checks": {"unit": ["cmd-a", "cmd-b"]}}"#);

    let passed = run_checks(
        &ws,
        &Invocation::new(),
        &cfg,
        "unit",
        &mut ScriptedPrompt::unreachable(),
    )
    .unwrap();

    assert!(!passed);
    ws.runner().assert_called("cmd-a");
    ws.runner().assert_not_called("cmd-b");
}

#[test]
fn test_list_resolution_is_cached_per_invocation() {
    let runner = ScriptedRunner::new();
    runner.script_ok("list-lints", "check-one\ncheck-two\n");
    let ws = workspace(runner);
    let cfg = config(r#"{"checks": {"lint": {"command": "list-lints"}}}"#);
    let invocation = Invocation::new();

    for _ in 0..2 {
        let passed = run_checks(
            &ws,
            &invocation,
            &cfg,
            "lint",
            &mut ScriptedPrompt::unreachable(),
        )
        .unwrap();
        assert!(passed);
    }

    // The list command ran once; the checks themselves ran both times.
    assert_eq!(ws.runner().count_calls("list-lints"), 1);
    assert_eq!(ws.runner().count_calls("check-one"), 2);
    assert_eq!(ws.runner().count_calls("check-two"), 2);
}

#[test]
fn test_lint_correction_amend_redoes_the_same_check_once() {
    let runner = ScriptedRunner::new();
    // Snapshots: clean before the first run, dirty after it, clean around
    // the redo.
    runner.script_seq("git status --porcelain", &["", " M src/lib.rs", ""]);
    let ws = workspace(runner);
    let cfg = config(r#"{"checks": {"lint": ["fmt-fix"]}}"#);
    let mut prompt = ScriptedPrompt::with_choices(&[CorrectionChoice::Amend]);

    let passed = run_checks(&ws, &Invocation::new(), &cfg, "lint", &mut prompt).unwrap();

    assert!(passed);
    assert_eq!(prompt.asked, vec!["fmt-fix"]);
    assert_eq!(ws.runner().count_calls("fmt-fix"), 2);
    assert_eq!(
        ws.runner().count_calls("git commit --amend --no-edit --all"),
        1
    );
}

#[test]
fn test_lint_correction_quit_fails_and_leaves_corrections_unstaged() {
    let runner = ScriptedRunner::new();
    runner.script_seq("git status --porcelain", &["", " M src/lib.rs"]);
    runner.script_ok("git diff", "-old\n+corrected\n");
    let ws = workspace(runner);
    let cfg = config(r#"{"checks": {"lint": ["fmt-fix"]}}"#);
    let mut prompt = ScriptedPrompt::with_choices(&[CorrectionChoice::Quit]);

    let passed = run_checks(&ws, &Invocation::new(), &cfg, "lint", &mut prompt).unwrap();

    assert!(!passed);
    assert_eq!(ws.runner().count_calls("fmt-fix"), 1);
    // The diff was shown to the user; nothing was amended or staged.
    assert_eq!(prompt.diffs, vec!["-old\n+corrected\n"]);
    ws.runner().assert_not_called("commit --amend");
}

#[test]
fn test_non_converging_lint_check_is_reported() {
    let runner = ScriptedRunner::new();
    // Every before/after snapshot pair differs, so the check "corrects"
    // the tree on every round.
    let snapshots: Vec<String> = (0..MAX_CORRECTION_ROUNDS * 2)
        .map(|round| format!(" M file-{round}"))
        .collect();
    let refs: Vec<&str> = snapshots.iter().map(String::as_str).collect();
    runner.script_seq("git status --porcelain", &refs);
    let ws = workspace(runner);
    let cfg = config(r#"{"checks": {"lint": ["fmt-fix"]}}"#);
    let mut prompt =
        ScriptedPrompt::with_choices(&[CorrectionChoice::Amend; MAX_CORRECTION_ROUNDS]);

    let err = run_checks(&ws, &Invocation::new(), &cfg, "lint", &mut prompt).unwrap_err();

    assert!(matches!(
        err,
        Error::CorrectionLoop { rounds, .. } if rounds == MAX_CORRECTION_ROUNDS
    ));
    assert_eq!(
        ws.runner().count_calls("git commit --amend --no-edit --all"),
        MAX_CORRECTION_ROUNDS
    );
}

#[test]
fn test_prepush_stops_at_first_failing_kind() {
    let runner = ScriptedRunner::new();
    runner.script_fail("lint-cmd", "style violation");
    let ws = workspace(runner);
    let cfg = config(
        r#"{"checks": {"lint": ["lint-cmd"], "unit": ["unit-cmd"]}, "prepush": ["lint", "unit"]}"#,
    );

    let passed = run_prepush(
        &ws,
        &Invocation::new(),
        &cfg,
        &mut ScriptedPrompt::unreachable(),
    )
    .unwrap();

    assert!(!passed);
    ws.runner().assert_called("lint-cmd");
    ws.runner().assert_not_called("unit-cmd");
}

#[test]
fn test_prepush_runs_kinds_in_configured_order() {
    let ws = workspace(ScriptedRunner::new());
    let cfg = config(
        r#"{"checks": {"lint": ["lint-cmd"], "unit": ["unit-cmd"]}, "prepush": ["lint", "unit"]}"#,
    );

    let passed = run_prepush(
        &ws,
        &Invocation::new(),
        &cfg,
        &mut ScriptedPrompt::unreachable(),
    )
    .unwrap();

    assert!(passed);
    let calls = ws.runner().calls();
    let lint_at = calls.iter().position(|call| call == "lint-cmd").unwrap();
    let unit_at = calls.iter().position(|call| call == "unit-cmd").unwrap();
    assert!(lint_at < unit_at);
}
