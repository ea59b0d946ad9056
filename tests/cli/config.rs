use crate::cli::support::{gradebridge, stdout_lines, write_fixture, GRADEBOOK, ROSTER};
use predicates::prelude::*;
use tempfile::tempdir;

// ============================================================================
// Configuration file tests
// ============================================================================

const CONFIG: &str = r#"
[webassign]
roundup = ["Quiz [1]"]
recalculate = true

[gradescope]
email_domain = "example.edu"
"#;

#[test]
fn test_config_flag_applies_transforms() {
    let dir = tempdir().unwrap();
    let gb = write_fixture(dir.path(), "gradebook.txt", GRADEBOOK);
    let roster = write_fixture(dir.path(), "template.csv", ROSTER);
    let config = write_fixture(dir.path(), "gradebridge.toml", CONFIG);

    let output = gradebridge()
        .arg("--config")
        .arg(&config)
        .arg("wa2nyuc")
        .arg(&gb)
        .arg(&roster)
        .args(["-o", "-"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output)[1],
        "jd123,\"Doe, Jane\",jd123,Jane Doe,jd123@nyu.edu,88,100,92.8"
    );
}

#[test]
fn test_config_from_environment() {
    let dir = tempdir().unwrap();
    let roster = write_fixture(dir.path(), "template.csv", ROSTER);
    let config = write_fixture(dir.path(), "gradebridge.toml", CONFIG);

    gradebridge()
        .env("GRADEBRIDGE_CONFIG", &config)
        .arg("nyuc2gs")
        .arg(&roster)
        .assert()
        .success()
        .stdout(predicate::str::contains("Jane Doe,jd123@example.edu,jd123"));
}

#[test]
fn test_flag_overrides_config_domain() {
    let dir = tempdir().unwrap();
    let roster = write_fixture(dir.path(), "template.csv", ROSTER);
    let config = write_fixture(dir.path(), "gradebridge.toml", CONFIG);

    gradebridge()
        .arg("--config")
        .arg(&config)
        .arg("nyuc2gs")
        .arg(&roster)
        .args(["--email-domain", "nyu.edu"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jane Doe,jd123@nyu.edu,jd123"));
}

#[test]
fn test_missing_config_file() {
    let dir = tempdir().unwrap();
    let roster = write_fixture(dir.path(), "template.csv", ROSTER);

    gradebridge()
        .args(["--config", "/nonexistent/gradebridge.toml", "nyuc2gs"])
        .arg(&roster)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn test_invalid_config_file() {
    let dir = tempdir().unwrap();
    let roster = write_fixture(dir.path(), "template.csv", ROSTER);
    let config = write_fixture(dir.path(), "gradebridge.toml", "[merge]\non_ambiguous = 3\n");

    gradebridge()
        .arg("--config")
        .arg(&config)
        .arg("nyuc2gs")
        .arg(&roster)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("TOML error"));
}
