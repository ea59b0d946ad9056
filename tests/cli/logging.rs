use crate::cli::support::{gradebridge, write_fixture, GRADEBOOK};
use predicates::prelude::*;
use tempfile::tempdir;

// ============================================================================
// Logging flag tests
// ============================================================================

#[test]
fn test_log_level_debug_shows_debug_messages() {
    let dir = tempdir().unwrap();
    let gb = write_fixture(dir.path(), "gradebook.txt", GRADEBOOK);

    gradebridge()
        .args(["--log-level", "debug", "categories"])
        .arg(&gb)
        .assert()
        .success()
        .stderr(predicate::str::contains("parse_args"))
        .stderr(predicate::str::contains("parsed categories"));
}

#[test]
fn test_log_level_warn_hides_debug_messages() {
    let dir = tempdir().unwrap();
    let gb = write_fixture(dir.path(), "gradebook.txt", GRADEBOOK);

    gradebridge()
        .args(["--log-level", "warn", "categories"])
        .arg(&gb)
        .assert()
        .success()
        .stderr(predicate::str::contains("parse_args").not());
}

#[test]
fn test_debug_flag_shows_debug_messages() {
    let dir = tempdir().unwrap();
    let gb = write_fixture(dir.path(), "gradebook.txt", GRADEBOOK);

    gradebridge()
        .args(["-d", "categories"])
        .arg(&gb)
        .assert()
        .success()
        .stderr(predicate::str::contains("parse_args"));
}

#[test]
fn test_verbose_shows_info_but_not_debug() {
    let dir = tempdir().unwrap();
    let gb = write_fixture(dir.path(), "gradebook.txt", GRADEBOOK);
    let roster = write_fixture(
        dir.path(),
        "template.csv",
        "Student ID,Student Name\njd123,\"Doe, Jane\"\n",
    );

    gradebridge()
        .args(["--verbose", "wa2nyuc"])
        .arg(&gb)
        .arg(&roster)
        .args(["-o", "-"])
        .assert()
        .success()
        .stderr(predicate::str::contains("merged roster"))
        .stderr(predicate::str::contains("parse_args").not());
}

#[test]
fn test_log_json_emits_json_lines() {
    let dir = tempdir().unwrap();
    let gb = write_fixture(dir.path(), "gradebook.txt", GRADEBOOK);

    let output = gradebridge()
        .args(["--log-json", "--log-level", "debug", "categories"])
        .arg(&gb)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let first = stderr.lines().find(|l| l.starts_with('{')).unwrap();
    let value: serde_json::Value = serde_json::from_str(first).unwrap();
    assert_eq!(value["level"], "DEBUG");
}

#[test]
fn test_env_filter_overrides_flags() {
    let dir = tempdir().unwrap();
    let gb = write_fixture(dir.path(), "gradebook.txt", GRADEBOOK);

    gradebridge()
        .env("GRADEBRIDGE_LOG", "gradebridge=debug")
        .arg("categories")
        .arg(&gb)
        .assert()
        .success()
        .stderr(predicate::str::contains("parse_args"));
}
