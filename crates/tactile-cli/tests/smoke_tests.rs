//! Smoke tests for the tactile CLI
//!
//! None of these need a browser: they cover argument handling, scenario
//! listing and the failure paths that trigger before a session is created.

#![allow(deprecated)] // Command::cargo_bin
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command for the tactile binary with a clean environment
fn tactile() -> Command {
    let mut cmd = Command::cargo_bin("tactile").expect("tactile binary should exist");
    for var in [
        "TACTILE_WEBDRIVER_URL",
        "TACTILE_BROWSER",
        "TACTILE_REMOTE",
        "TACTILE_HEADLESS",
        "TACTILE_PAGES_URL",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    tactile()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.4.0"));
}

#[test]
fn test_help_flag() {
    tactile()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("WebDriver"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_no_args_fails() {
    tactile().assert().failure();
}

#[test]
fn test_run_subcommand_help() {
    tactile()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--webdriver-url"))
        .stdout(predicate::str::contains("--fail-fast"));
}

// ============================================================================
// list
// ============================================================================

#[test]
fn test_list_prints_every_scenario() {
    tactile()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("pointer_and_keyboard_inputs"))
        .stdout(predicate::str::contains("dragging_moves_to_other_list"))
        .stdout(predicate::str::contains("pen_pointer_properties"));
}

#[test]
fn test_list_shows_markers_for_browser() {
    tactile()
        .args(["list", "--browser", "firefox"])
        .assert()
        .success()
        .stdout(predicate::str::contains("xfail(firefox)"));
}

#[test]
fn test_list_json() {
    let output = tactile()
        .args(["list", "--remote", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let listings: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let listings = listings.as_array().unwrap();
    assert_eq!(listings.len(), 12);
    let keys = listings
        .iter()
        .find(|l| l["name"] == "sending_keys_with_modifier")
        .unwrap();
    assert_eq!(keys["expected_failure"], "xfail(remote)");
}

#[test]
fn test_list_rejects_unknown_browser() {
    tactile()
        .args(["list", "--browser", "netscape"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown browser"));
}

// ============================================================================
// run
// ============================================================================

#[test]
fn test_run_without_endpoint_fails() {
    tactile()
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("TACTILE_WEBDRIVER_URL"));
}

#[test]
fn test_run_with_unmatched_filter_fails() {
    tactile()
        .args([
            "run",
            "--webdriver-url",
            "http://127.0.0.1:9",
            "--filter",
            "no_such_scenario",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no scenario matches"));
}

#[test]
fn test_run_with_dead_endpoint_fails() {
    let pages = TempDir::new().unwrap();
    tactile()
        .args([
            "run",
            "--webdriver-url",
            "http://127.0.0.1:9",
            "--pages-dir",
            pages.path().to_str().unwrap(),
            "--filter",
            "move_and_click",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP transport failed"));
}
