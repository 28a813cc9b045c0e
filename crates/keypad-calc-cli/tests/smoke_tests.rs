//! Smoke tests for the keypad-calc CLI
//!
//! These tests run the real binary end to end.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Get a command for the keypad-calc binary, colors off
fn keypad_calc() -> Command {
    let mut cmd = Command::cargo_bin("keypad-calc").expect("keypad-calc binary should exist");
    cmd.env_remove("RUST_LOG").args(["--color", "never"]);
    cmd
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    keypad_calc()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_flag() {
    keypad_calc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("keys"))
        .stdout(predicate::str::contains("eval"))
        .stdout(predicate::str::contains("repl"))
        .stdout(predicate::str::contains("layout"));
}

#[test]
fn test_no_args_shows_help() {
    keypad_calc()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

// ============================================================================
// keys
// ============================================================================

#[test]
fn test_keys_addition() {
    keypad_calc()
        .args(["keys", "1", "+", "2", "="])
        .assert()
        .success()
        .stdout("3\n");
}

#[test]
fn test_keys_leading_unary_minus() {
    keypad_calc()
        .args(["keys", "-", "2", "^", "2", "Enter"])
        .assert()
        .success()
        .stdout("-4\n");
}

#[test]
fn test_keys_error_display() {
    keypad_calc()
        .args(["keys", "5", "/", "0", "="])
        .assert()
        .success()
        .stdout("Error\n");
}

#[test]
fn test_keys_button_and_function_names() {
    keypad_calc()
        .args(["keys", "9", "sqrt", "M+", "AC", "MR", "square"])
        .assert()
        .success()
        .stdout("9\n");
}

#[test]
fn test_keys_unknown_key_fails() {
    keypad_calc()
        .args(["keys", "1", "wat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown key: 'wat'"));
}

#[test]
fn test_keys_json() {
    keypad_calc()
        .args(["--format", "json", "keys", "2", "*", "4", "="])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"display\": \"8\""))
        .stdout(predicate::str::contains("\"expression\": \"2*4\""));
}

#[test]
fn test_keys_precision_flag() {
    keypad_calc()
        .args(["--precision", "2", "keys", "1", "/", "3", "="])
        .assert()
        .success()
        .stdout("0.33\n");
}

// ============================================================================
// eval
// ============================================================================

#[test]
fn test_eval_precedence() {
    keypad_calc()
        .args(["eval", "2+3*4"])
        .assert()
        .success()
        .stdout("14\n");
}

#[test]
fn test_eval_float_noise_is_rounded() {
    keypad_calc()
        .args(["eval", "0.1+0.2"])
        .assert()
        .success()
        .stdout("0.3\n");
}

#[test]
fn test_eval_division_by_zero_fails() {
    keypad_calc()
        .args(["eval", "5/0"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error:"));
}

#[test]
fn test_eval_rejects_letters() {
    keypad_calc().args(["eval", "2+abc"]).assert().failure();
}

// ============================================================================
// repl and layout
// ============================================================================

#[test]
fn test_repl_reads_stdin() {
    keypad_calc()
        .arg("repl")
        .write_stdin("1 + 2\n=\nquit\n")
        .assert()
        .success()
        .stdout("1+2\n3\n");
}

#[test]
fn test_repl_quiet_suppresses_warnings() {
    keypad_calc()
        .args(["-q", "repl"])
        .write_stdin("7 nope\n")
        .assert()
        .success()
        .stdout("7\n")
        .stderr("");
}

#[test]
fn test_layout() {
    keypad_calc()
        .arg("layout")
        .assert()
        .success()
        .stdout(predicate::str::contains("[ AC ]"))
        .stdout(predicate::str::contains("="));
}
