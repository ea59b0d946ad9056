use crate::cli::support::{
    gradebridge, stdout_lines, write_fixture, GRADEBOOK, GRADEBOOK_NO_EMAIL,
};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_categories_csv() {
    let dir = tempdir().unwrap();
    let gb = write_fixture(dir.path(), "gradebook.txt", GRADEBOOK);

    let output = gradebridge().arg("categories").arg(&gb).output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec![
            "label,name,count,weight,drop_count,graded",
            "Homework [10],Homework,10,0.6,,true",
            "Quiz [1],Quiz,1,0.4,1,true",
            "Final,Final,,1,,false",
        ]
    );
    assert!(String::from_utf8_lossy(&output.stderr).contains("graded weights sum to 1"));
}

#[test]
fn test_categories_json() {
    let dir = tempdir().unwrap();
    let gb = write_fixture(dir.path(), "gradebook.txt", GRADEBOOK_NO_EMAIL);

    let output = gradebridge()
        .args(["--format", "json", "categories"])
        .arg(&gb)
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["section"], "Physics 11 Section 1");
    assert_eq!(value["categories"][0]["label"], "Quiz [1]");
    assert_eq!(value["categories"][0]["weight"], 1.0);
    assert_eq!(value["weights_complete"], true);
}

#[test]
fn test_categories_incomplete_weights_warn() {
    let dir = tempdir().unwrap();
    let gb = write_fixture(
        dir.path(),
        "gradebook.txt",
        &GRADEBOOK.replace("60%\t40% [1]", "50%\t40% [1]"),
    );

    gradebridge()
        .arg("categories")
        .arg(&gb)
        .assert()
        .success()
        .stderr(predicate::str::contains("do not sum to 1"))
        .stderr(predicate::str::contains("(expected 1)"));
}
