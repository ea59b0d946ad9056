use crate::cli::support::{gradebridge, stdout_lines, write_fixture, CLASSVIEW};
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_wacv2csv_to_stdout() {
    let dir = tempdir().unwrap();
    let page = write_fixture(dir.path(), "classview.html", CLASSVIEW);

    let output = gradebridge().arg("wacv2csv").arg(&page).output().unwrap();
    assert!(output.status.success());
    let expected = "2016-05-02,2016-05-09,\
                    WebAssignment \u{201c}Section 1.1\u{201d} due Monday May 9 9:05AM";
    assert_eq!(
        stdout_lines(&output),
        vec!["startDate,endDate,announcementText", expected]
    );
}

#[test]
fn test_wacv2csv_to_file() {
    let dir = tempdir().unwrap();
    let page = write_fixture(dir.path(), "classview.html", CLASSVIEW);
    let out = dir.path().join("announcements.csv");

    gradebridge()
        .arg("wacv2csv")
        .arg(&page)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 1 assignments"));
    let written = fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("startDate,endDate,announcementText\n"));
}

#[test]
fn test_wacv2csv_json() {
    let dir = tempdir().unwrap();
    let page = write_fixture(dir.path(), "classview.html", CLASSVIEW);

    let output = gradebridge()
        .args(["--format", "json", "wacv2csv"])
        .arg(&page)
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[0]["name"], "Section 1.1");
    assert_eq!(value[0]["due"], "2016-05-09T09:05:00");
}

#[test]
fn test_wacv2csv_bad_dates() {
    let dir = tempdir().unwrap();
    let page = write_fixture(
        dir.path(),
        "classview.html",
        "<table><tr><td><b>HW 1</b></td><td></td><td></td><td>next week</td></tr></table>",
    );

    gradebridge()
        .arg("wacv2csv")
        .arg(&page)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unparseable date"));
}
