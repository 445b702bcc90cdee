//! Tests for error handling and CLI flags.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_help() {
    let t = Test::new();

    t.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage").and(predicate::str::contains("vault")));
}

#[test]
fn test_no_command_fails() {
    let t = Test::new();

    let output = t.cmd().output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    let output = t.cmd().arg("unknown-command").output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.cmd().arg("--version").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "bp");
}

#[test]
fn test_errors_go_to_stderr() {
    let t = Test::new();

    let output = t.decrypt("missing");
    assert_failure(&output);
    assert!(output.stdout.is_empty());
    assert_stderr_contains(&output, "✗");
}

#[test]
fn test_hint_for_missing_key() {
    let t = Test::new();

    t.cmd()
        .args(["vault", "encrypt", "token"])
        .write_stdin("x")
        .assert()
        .code(40)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("BP_GPG_KEY"));
}

#[test]
fn test_verbose_logs_to_stderr_only() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["--verbose", "vault", "decrypt", "missing"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert!(output.stdout.is_empty());
    assert_stderr_contains(&output, "loading config");
}

#[test]
fn test_default_no_debug_output() {
    let t = Test::new();
    assert_success(&t.encrypt("token", "k", b"x"));

    let output = t.decrypt("token");
    assert_success(&output);
    let err = stderr(&output);
    assert!(
        !err.contains("DEBUG") && !err.contains("TRACE"),
        "default mode should not show debug/trace output"
    );
}

#[test]
fn test_bp_log_env_var() {
    let t = Test::new();
    assert_success(&t.encrypt("token", "k", b"top-secret"));

    t.cmd()
        .env("BP_LOG", "bpkit=trace")
        .args(["vault", "decrypt", "token"])
        .assert()
        .success()
        .stdout("top-secret")
        .stderr(predicate::str::contains("decrypting").and(predicate::str::contains("top-secret").not()));
}

#[test]
fn test_completions_bash_outputs_script() {
    let t = Test::new();

    let output = t.cmd().args(["completions", "bash"]).output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("_bp") || out.contains("complete"));
}

#[test]
fn test_completions_zsh() {
    let t = Test::new();

    let output = t.cmd().args(["completions", "zsh"]).output().unwrap();
    assert_success(&output);
    assert!(!output.stdout.is_empty());
}

#[test]
fn test_completions_fish_targets_bp() {
    let t = Test::new();

    t.cmd()
        .args(["completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("complete -c bp"));
}
