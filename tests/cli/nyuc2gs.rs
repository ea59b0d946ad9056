use crate::cli::support::{gradebridge, stdout_lines, write_fixture, ROSTER};
use tempfile::tempdir;

#[test]
fn test_nyuc2gs_roster() {
    let dir = tempdir().unwrap();
    let roster = write_fixture(dir.path(), "template.csv", ROSTER);

    let output = gradebridge().arg("nyuc2gs").arg(&roster).output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec![
            "Full Name,Email,NetID",
            "Jane Doe,jd123@nyu.edu,jd123",
            "Ann Bee,ab456@nyu.edu,ab456",
            "Zoe Zed,zz999@nyu.edu,zz999",
        ]
    );
}

#[test]
fn test_nyuc2gs_email_domain_flag() {
    let dir = tempdir().unwrap();
    let roster = write_fixture(dir.path(), "template.csv", ROSTER);

    let output = gradebridge()
        .arg("nyuc2gs")
        .arg(&roster)
        .args(["--email-domain", "example.edu"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output)[1], "Jane Doe,jd123@example.edu,jd123");
}

#[test]
fn test_nyuc2gs_unsplittable_name_warns() {
    let dir = tempdir().unwrap();
    let roster = write_fixture(
        dir.path(),
        "template.csv",
        "Student ID,Student Name\nmd1,Madonna\n",
    );

    let output = gradebridge().arg("nyuc2gs").arg(&roster).output().unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output)[1], "Madonna,md1@nyu.edu,md1");
    assert!(String::from_utf8_lossy(&output.stderr).contains("Last, First"));
}
