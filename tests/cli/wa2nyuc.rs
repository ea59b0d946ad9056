use crate::cli::support::{
    gradebridge, stdout_lines, write_fixture, GRADEBOOK, GRADEBOOK_NO_EMAIL, ROSTER,
};
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

// ============================================================================
// wa2nyuc command tests
// ============================================================================

#[test]
fn test_wa2nyuc_roundup_recalculate_to_stdout() {
    let dir = tempdir().unwrap();
    let gb = write_fixture(dir.path(), "gradebook.txt", GRADEBOOK);
    let roster = write_fixture(dir.path(), "template.csv", ROSTER);

    let output = gradebridge()
        .arg("wa2nyuc")
        .arg(&gb)
        .arg(&roster)
        .args(["--roundup", "Quiz [1]", "--recalculate", "-o", "-"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(
        lines,
        vec![
            "Student ID,Student Name,Username,Fullname,Email,Homework [10],Quiz [1],Final",
            "jd123,\"Doe, Jane\",jd123,Jane Doe,jd123@nyu.edu,88,100,92.8",
            "ab456,\"Bee, Ann\",ann.b,Ann Bee,ab456@nyu.edu,70,0,42",
            "zz999,\"Zed, Zoe\",,,,,,",
        ]
    );
}

#[test]
fn test_wa2nyuc_default_output_file() {
    let dir = tempdir().unwrap();
    let gb = write_fixture(dir.path(), "gradebook.txt", GRADEBOOK);
    let roster = write_fixture(dir.path(), "template.csv", ROSTER);

    gradebridge()
        .current_dir(dir.path())
        .arg("wa2nyuc")
        .arg(&gb)
        .arg(&roster)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Wrote 3 students to WebAssign_2016-05-02.csv",
        ));

    let written = fs::read_to_string(dir.path().join("WebAssign_2016-05-02.csv")).unwrap();
    assert!(written.starts_with("Student ID,Student Name,"));
    assert!(written.contains("jd123,\"Doe, Jane\",jd123,Jane Doe,jd123@nyu.edu,88,50,72.8"));
}

#[test]
fn test_wa2nyuc_quiet_suppresses_summary() {
    let dir = tempdir().unwrap();
    let gb = write_fixture(dir.path(), "gradebook.txt", GRADEBOOK);
    let roster = write_fixture(dir.path(), "template.csv", ROSTER);

    gradebridge()
        .current_dir(dir.path())
        .args(["-q", "wa2nyuc"])
        .arg(&gb)
        .arg(&roster)
        .args(["-o", "merged.csv"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert!(dir.path().join("merged.csv").exists());
}

#[test]
fn test_wa2nyuc_missing_email_warns_and_merges() {
    let dir = tempdir().unwrap();
    let gb = write_fixture(dir.path(), "gradebook.txt", GRADEBOOK_NO_EMAIL);
    let roster = write_fixture(
        dir.path(),
        "template.csv",
        "Student ID,Student Name\nN123,\"Doe, Jane\"\n",
    );

    let output = gradebridge()
        .arg("wa2nyuc")
        .arg(&gb)
        .arg(&roster)
        .args(["--roundup", "Quiz [1]", "--recalculate", "-o", "-"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("skipping the email join"));
    assert_eq!(
        stdout_lines(&output),
        vec![
            "Student ID,Student Name,Username,Fullname,Quiz [1],Final",
            "N123,\"Doe, Jane\",N123,Jane Doe,100,100",
        ]
    );
}

#[test]
fn test_wa2nyuc_dated_column() {
    let dir = tempdir().unwrap();
    let gb = write_fixture(dir.path(), "gradebook.txt", GRADEBOOK);
    let roster = write_fixture(dir.path(), "template.csv", ROSTER);

    gradebridge()
        .arg("wa2nyuc")
        .arg(&gb)
        .arg(&roster)
        .args(["--dated-column", "-o", "-"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Final,WebAssign import 2016-05-02 17:00:00"));
}

#[test]
fn test_wa2nyuc_drop_unmatched() {
    let dir = tempdir().unwrap();
    let gb = write_fixture(dir.path(), "gradebook.txt", GRADEBOOK);
    let roster = write_fixture(dir.path(), "template.csv", ROSTER);

    let output = gradebridge()
        .arg("wa2nyuc")
        .arg(&gb)
        .arg(&roster)
        .args(["--drop-unmatched", "-o", "-"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 3);
    assert!(!lines.iter().any(|l| l.starts_with("zz999")));
}

#[test]
fn test_wa2nyuc_json_output() {
    let dir = tempdir().unwrap();
    let gb = write_fixture(dir.path(), "gradebook.txt", GRADEBOOK);
    let roster = write_fixture(dir.path(), "template.csv", ROSTER);

    let output = gradebridge()
        .args(["--format", "json", "wa2nyuc"])
        .arg(&gb)
        .arg(&roster)
        .args(["-o", "-"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["columns"][0], "Student ID");
    assert_eq!(value["rows"][0][0], "jd123");
    assert!(value["rows"][2][2].is_null());
}

#[test]
fn test_wa2nyuc_ambiguous_error() {
    let dir = tempdir().unwrap();
    let duplicated = format!("{}jd123\tJane Doe\tjd123@nyu.edu\t1\t1\t1\n", GRADEBOOK);
    let gb = write_fixture(dir.path(), "gradebook.txt", &duplicated);
    let roster = write_fixture(dir.path(), "template.csv", ROSTER);

    gradebridge()
        .arg("wa2nyuc")
        .arg(&gb)
        .arg(&roster)
        .args(["--on-ambiguous", "error", "-o", "-"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("ambiguous match"));

    gradebridge()
        .arg("wa2nyuc")
        .arg(&gb)
        .arg(&roster)
        .args(["-o", "-"])
        .assert()
        .success()
        .stdout(predicate::str::contains("jd123,\"Doe, Jane\",jd123,Jane Doe,jd123@nyu.edu,88"))
        .stderr(predicate::str::contains("several GradeBook rows match"));
}

#[test]
fn test_wa2nyuc_missing_column_json_error() {
    let dir = tempdir().unwrap();
    let gb = write_fixture(dir.path(), "gradebook.txt", GRADEBOOK);
    let roster = write_fixture(dir.path(), "template.csv", "Student ID,Points\njd123,1\n");

    gradebridge()
        .args(["--format", "json", "wa2nyuc"])
        .arg(&gb)
        .arg(&roster)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("\"type\":\"missing_column\""));
}

#[test]
fn test_wa2nyuc_failure_writes_no_output() {
    let dir = tempdir().unwrap();
    let gb = write_fixture(dir.path(), "gradebook.txt", GRADEBOOK);
    let roster = write_fixture(dir.path(), "template.csv", ROSTER);
    let out = dir.path().join("out.csv");

    gradebridge()
        .arg("wa2nyuc")
        .arg(&gb)
        .arg(&roster)
        .args(["--roundup", "Lab [3]", "-o"])
        .arg(&out)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("missing column \"Lab [3]\""));
    assert!(!out.exists());
}

#[test]
fn test_wa2nyuc_malformed_gradebook() {
    let dir = tempdir().unwrap();
    let gb = write_fixture(dir.path(), "gradebook.txt", "just,a,csv\n1,2,3\n");
    let roster = write_fixture(dir.path(), "template.csv", ROSTER);

    gradebridge()
        .arg("wa2nyuc")
        .arg(&gb)
        .arg(&roster)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("malformed input"));
}
