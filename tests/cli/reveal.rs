//! Tests for the ansible-vault reveal flow: `bp vault secrets`.

use crate::support::*;

#[test]
fn test_reveal_default_set() {
    let t = Test::with_reveal_files();

    let output = t.secrets(None);
    assert_success(&output);
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value, serde_json::json!({ "a": 1 }));
}

#[test]
fn test_reveal_named_set() {
    let t = Test::new();
    t.reveal_file("db.vault.asc", VAULT_BLOB);
    t.reveal_file("db.yaml", "port: 5432\nreplicas: 3\n");

    let output = t.secrets(Some("db"));
    assert_success(&output);
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value, serde_json::json!({ "port": 5432, "replicas": 3 }));
}

#[test]
fn test_reveal_pretty_by_default() {
    let t = Test::with_reveal_files();

    let output = t.cmd().args(["vault", "secrets"]).output().unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output), "{\n  \"a\": 1\n}\n");
}

#[test]
fn test_missing_vault_file_runs_nothing() {
    let t = Test::new();
    t.reveal_file("secrets.yaml", "a: 1\n");

    let output = t.secrets(None);
    assert_exit_code(&output, 30);
    assert_stderr_contains(&output, "vault file not found");
    assert_stderr_contains(&output, "vault.asc");
    assert!(!t.marker("vaultpy-ran").exists());
}

#[test]
fn test_missing_secret_file_runs_nothing() {
    let t = Test::new();
    t.reveal_file("vault.asc", VAULT_BLOB);

    let output = t.secrets(None);
    assert_exit_code(&output, 31);
    assert_stderr_contains(&output, "secrets.yaml");
    assert!(!t.marker("vaultpy-ran").exists());
}

#[test]
fn test_missing_tool_runs_nothing() {
    let t = Test::with_reveal_files();
    t.config("[tools]\ntranscoder = \"bp-missing-yj\"\n");

    let output = t.secrets(None);
    assert_exit_code(&output, 20);
    assert_stderr_contains(&output, "bp-missing-yj");
    assert!(!t.marker("vaultpy-ran").exists());
}

#[test]
fn test_vault_password_failure() {
    let t = Test::new();
    t.reveal_file("other.vault.asc", VAULT_BLOB);
    t.reveal_file("other.yaml", "a: 1\n");

    let output = t.secrets(Some("other"));
    assert_exit_code(&output, 32);
    assert_stderr_contains(&output, "bad key");
    assert!(output.stdout.is_empty());
}

#[test]
fn test_decrypt_failure() {
    let t = Test::with_reveal_files();
    t.stub("vaultpy", "#!/bin/sh\necho wrong\n");

    let output = t.secrets(None);
    assert_exit_code(&output, 33);
    assert_stderr_contains(&output, "Decryption failed");
}

#[test]
fn test_transcode_failure() {
    let t = Test::with_reveal_files();
    t.stub("yj", "#!/bin/sh\necho 'yaml: line 1: did not find expected key' >&2\nexit 1\n");

    let output = t.secrets(None);
    assert_exit_code(&output, 34);
    assert_stderr_contains(&output, "did not find expected key");
}

#[test]
fn test_invalid_json() {
    let t = Test::new();
    t.reveal_file("vault.asc", VAULT_BLOB);
    t.reveal_file("secrets.yaml", "a: not-json\n");

    let output = t.secrets(None);
    assert_exit_code(&output, 35);
    assert_stderr_contains(&output, "not valid JSON");
}

#[test]
fn test_timeout() {
    let t = Test::with_reveal_files();
    t.config("[process]\ntimeout_secs = 1\n");
    t.stub("yj", "#!/bin/sh\nexec sleep 30\n");

    let started = std::time::Instant::now();
    let output = t.secrets(None);
    assert_exit_code(&output, 23);
    assert_stderr_contains(&output, "timed out");
    assert!(started.elapsed() < std::time::Duration::from_secs(20));
}

#[test]
fn test_custom_reveal_dir() {
    let t = Test::new();
    let dir = t.home.path().join("elsewhere");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("vault.asc"), VAULT_BLOB).unwrap();
    std::fs::write(dir.join("secrets.yaml"), "b: 2\n").unwrap();
    t.config(&format!("[paths]\nreveal_dir = {:?}\n", dir.to_str().unwrap()));

    let output = t.secrets(None);
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), r#"{"b":2}"#);
}

#[test]
fn test_invalid_name_rejected() {
    let t = Test::with_reveal_files();

    let output = t.secrets(Some("../secrets"));
    assert_exit_code(&output, 42);
    assert!(!t.marker("vaultpy-ran").exists());
}
