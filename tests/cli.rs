//! Integration tests for the helper binary
//!
//! Only boundary failures are exercised here: every case is rejected before
//! the binary would contact AWS.

#![cfg(feature = "aws-backend")]

use std::process::{Command, Output};

fn helper_binary() -> String {
    std::env::var("CARGO_BIN_EXE_docker-credential-aws-sm")
        .unwrap_or_else(|_| "target/debug/docker-credential-aws-sm".to_string())
}

fn run_helper(args: &[&str], secret_name: Option<&str>) -> Output {
    let mut command = Command::new(helper_binary());
    command
        .args(args)
        .env_remove("DOCKER_SECRETSMANAGER_NAME")
        .env_remove("DOCKER_SECRETSMANAGER_KEY_ARN");
    if let Some(name) = secret_name {
        command.env("DOCKER_SECRETSMANAGER_NAME", name);
    }
    command.output().expect("Failed to execute helper")
}

#[test]
fn test_cli_requires_a_verb() {
    let output = run_helper(&[], Some("ci/docker"));
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_cli_rejects_unknown_verb() {
    let output = run_helper(&["version"], Some("ci/docker"));
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("version"),
        "Expected the rejected verb in stderr: {}",
        stderr
    );
}

#[test]
fn test_cli_rejects_extra_arguments() {
    let output = run_helper(&["get", "https://r.example"], Some("ci/docker"));
    assert!(!output.status.success());
}

#[test]
fn test_cli_requires_secret_name() {
    for verb in ["store", "get", "erase", "list", "LIST"] {
        let output = run_helper(&[verb], None);
        assert_eq!(output.status.code(), Some(1), "verb {verb}");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(
            stderr.contains("DOCKER_SECRETSMANAGER_NAME not set or invalid"),
            "Expected configuration error for {}: {}",
            verb,
            stderr
        );
        assert!(output.stdout.is_empty());
    }
}

#[test]
fn test_cli_rejects_empty_secret_name() {
    let output = run_helper(&["list"], Some(""));
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("DOCKER_SECRETSMANAGER_NAME"), "{}", stderr);
}
