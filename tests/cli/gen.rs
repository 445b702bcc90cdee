//! Tests for `bp vault gen pass`.

use crate::support::*;

fn password(output: &std::process::Output) -> String {
    stdout(output).trim_end_matches('\n').to_string()
}

#[test]
fn test_default_password() {
    let t = Test::new();

    let output = t.gen_pass(&[]);
    assert_success(&output);
    let pw = password(&output);
    assert_eq!(pw.chars().count(), 32);
    assert!(pw.chars().all(|c| c.is_ascii_graphic()));
}

#[test]
fn test_custom_length() {
    let t = Test::new();

    for (flag, len) in [("-l", 8), ("--length", 100)] {
        let output = t.gen_pass(&[flag, &len.to_string()]);
        assert_success(&output);
        assert_eq!(password(&output).chars().count(), len);
    }
}

#[test]
fn test_digits_only() {
    let t = Test::new();

    let output = t.gen_pass(&["--no-letters", "--no-symbols", "-l", "50"]);
    assert_success(&output);
    assert!(password(&output).chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn test_no_symbols() {
    let t = Test::new();

    let output = t.gen_pass(&["--no-symbols", "-l", "200"]);
    assert_success(&output);
    assert!(password(&output).chars().all(|c| c.is_ascii_alphanumeric()));
}

#[test]
fn test_zero_length_fails() {
    let t = Test::new();

    let output = t.gen_pass(&["-l", "0"]);
    assert_exit_code(&output, 50);
    assert!(output.stdout.is_empty());
    assert_stderr_contains(&output, "length must be at least 1");
}

#[test]
fn test_all_classes_excluded_fails() {
    let t = Test::new();

    let output = t.gen_pass(&["--no-letters", "--no-digits", "--no-symbols"]);
    assert_exit_code(&output, 51);
    assert_stderr_contains(&output, "at least one character set");
}

#[test]
fn test_negative_length_rejected_by_parser() {
    let t = Test::new();

    let output = t.gen_pass(&["-l", "-5"]);
    assert_failure(&output);
    assert!(output.stdout.is_empty());
}

#[test]
fn test_gen_ignores_broken_config() {
    let t = Test::new();
    t.config("this is [not toml");

    let output = t.gen_pass(&[]);
    assert_success(&output);
}
