use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};

/// Get a Command for gradebridge with logging overrides cleared
pub fn gradebridge() -> Command {
    let mut cmd = cargo_bin_cmd!("gradebridge");
    cmd.env_remove("RUST_LOG")
        .env_remove("GRADEBRIDGE_LOG")
        .env_remove("GRADEBRIDGE_CONFIG");
    cmd
}

/// Write a fixture file into `dir` and return its path
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Two students, email column present, Quiz worth 40% with one drop
pub const GRADEBOOK: &str = "\
Math 101 Section 3
Leingang, Matthew
Monday, May 2, 2016 05:00 PM EDT

Assignment Category\t\t\tHomework [10]\tQuiz [1]\tFinal
Weight\t\t\t60%\t40% [1]\t100

Username\tFullname\tEmail\t
jd123\tJane Doe\tjd123@nyu.edu\t88\t50\t72.8
ann.b\tAnn Bee\tab456@nyu.edu\t70\t0\t42
";

/// One student, no email column, a single quiz carrying the whole grade
pub const GRADEBOOK_NO_EMAIL: &str = "\
Physics 11 Section 1
Prof Example
Tuesday, September 13, 2016 09:30 AM EDT

Assignment Category\t\tQuiz [1]\tFinal
Weight\t\t1.0\t100

Username\tFullname\t
N123\tJane Doe\t50\t0
";

/// NYU Classes template matching [`GRADEBOOK`] by NetID and email
pub const ROSTER: &str = "\
Student ID,Student Name,Points Possible
jd123,\"Doe, Jane\",
ab456,\"Bee, Ann\",
zz999,\"Zed, Zoe\",
";

pub const CLASSVIEW: &str = r#"<html><body>
<div id="wa"><table>
<tr><th>Assignment</th><th>Score</th><th>Submissions</th><th>Dates</th></tr>
<tr>
  <td><b>Section 1.1</b></td><td>--</td><td>0/100</td>
  <td>5-2-16 05:00 PM EDT<br>5-9-16 09:05&nbsp;AM EDT</td>
</tr>
</table></div>
</body></html>"#;

/// Non-empty lines of a command's stdout
pub fn stdout_lines(output: &std::process::Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|l| !l.is_empty())
        .map(|l| l.to_string())
        .collect()
}
