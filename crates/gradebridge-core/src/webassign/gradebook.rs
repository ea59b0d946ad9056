//! WebAssign GradeBook (tab-delimited export) parser
//!
//! The export is not a plain table. Its layout, by physical line:
//!
//! ```text
//! 0  section name
//! 1  instructor
//! 2  export date          Monday, May 2, 2016 05:00 PM EDT
//! 3  (ignored)
//! 4  Assignment Category  <blank under student fields>  Homework [10]  Quiz [1]  Final
//! 5  Weight               <blank under student fields>  60%            40%       100
//! 6  (ignored)
//! 7  Username  Fullname  Email ...
//! 8+ one line per student
//! ```
//!
//! Grade columns take their names from line 4 and student columns from
//! line 7. These offsets must be kept as they are.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::bail_malformed;
use crate::error::{GradebridgeError, Result};
use crate::table::Table;
use crate::tabular::{check_delimiter, header_names, read_raw_rows, Delimiter, RawRow};
use crate::webassign::category::{graded_weight_sum, Category};

pub const SOURCE_NAME: &str = "WebAssign GradeBook";

/// Physical line offsets of the export
pub mod layout {
    pub const SECTION_LINE: usize = 0;
    pub const INSTRUCTOR_LINE: usize = 1;
    pub const DATE_LINE: usize = 2;
    pub const CATEGORY_LINE: usize = 4;
    pub const WEIGHT_LINE: usize = 5;
    pub const STUDENT_FIELDS_LINE: usize = 7;
    pub const FIRST_DATA_LINE: usize = 8;

    pub const CATEGORY_LABEL: &str = "Assignment Category";
    pub const WEIGHT_LABEL: &str = "Weight";
}

/// Export date format, without the trailing time zone abbreviation
pub const DATE_FORMAT: &str = "%A, %B %d, %Y %I:%M %p";

pub const USERNAME_COLUMN: &str = "Username";
pub const FULLNAME_COLUMN: &str = "Fullname";
pub const EMAIL_COLUMN: &str = "Email";
pub const FINAL_COLUMN: &str = "Final";

/// A parsed WebAssign GradeBook
#[derive(Debug, Clone)]
pub struct WebAssignGradebook {
    pub section_name: String,
    pub instructor: String,
    /// Export timestamp (naive, in the export's zone)
    pub date: NaiveDateTime,
    pub time_zone: Option<String>,
    pub categories: Vec<Category>,
    pub student_fields: Vec<String>,
    pub grades: Table,
}

/// Parse `Monday, May 2, 2016 05:00 PM EDT`.
///
/// The zone abbreviation is returned separately; chrono cannot resolve
/// abbreviations like `EDT` to offsets.
pub fn parse_export_date(raw: &str) -> Result<(NaiveDateTime, Option<String>)> {
    let raw = raw.trim();
    let (body, zone) = match raw.rsplit_once(' ') {
        Some((body, zone))
            if !zone.is_empty()
                && zone.chars().all(|c| c.is_ascii_uppercase())
                && zone != "AM"
                && zone != "PM" =>
        {
            (body, Some(zone.to_string()))
        }
        _ => (raw, None),
    };
    let date = NaiveDateTime::parse_from_str(body, DATE_FORMAT).map_err(|_| {
        GradebridgeError::unparseable_date(raw, "Monday, May 2, 2016 05:00 PM EDT")
    })?;
    Ok((date, zone))
}

impl WebAssignGradebook {
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(GradebridgeError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path)?;
        Self::parse(file)
    }

    pub fn parse<R: Read>(reader: R) -> Result<Self> {
        let rows = read_raw_rows(reader, Delimiter::Tab)?;
        let line = |n: usize| rows.iter().find(|r| r.line == n);

        let metadata = |n: usize, what: &str| -> Result<String> {
            match line(n) {
                Some(row) if !row.field(0).trim().is_empty() => {
                    Ok(row.field(0).trim().to_string())
                }
                _ => bail_malformed!(SOURCE_NAME, "missing {} on line {}", what, n + 1),
            }
        };
        let section_name = metadata(layout::SECTION_LINE, "section name")?;
        let instructor = metadata(layout::INSTRUCTOR_LINE, "instructor")?;
        let (date, time_zone) = parse_export_date(&metadata(layout::DATE_LINE, "export date")?)?;

        let category_row = labelled_line(line(layout::CATEGORY_LINE), layout::CATEGORY_LABEL)?;
        let weight_row = labelled_line(line(layout::WEIGHT_LINE), layout::WEIGHT_LABEL)?;
        let categories = parse_categories(category_row, weight_row);
        debug!(
            count = categories.len(),
            graded_weight = graded_weight_sum(&categories),
            "parsed categories"
        );

        let Some(student_row) = line(layout::STUDENT_FIELDS_LINE) else {
            bail_malformed!(
                SOURCE_NAME,
                "student field names not found on line {}",
                layout::STUDENT_FIELDS_LINE + 1
            );
        };
        let student_fields = header_names(student_row);
        if student_fields.is_empty() {
            bail_malformed!(SOURCE_NAME, "student field row is empty");
        }

        let grades = parse_grades(&rows, category_row, &student_fields)?;
        debug!(
            students = grades.len(),
            columns = grades.columns().len(),
            "parsed grades"
        );

        Ok(WebAssignGradebook {
            section_name,
            instructor,
            date,
            time_zone,
            categories,
            student_fields,
            grades,
        })
    }

    pub fn graded_categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(|c| c.is_graded())
    }

    pub fn has_email(&self) -> bool {
        self.grades.has_column(EMAIL_COLUMN)
    }
}

/// The header lines must start with their row label, else the export is
/// not laid out the way we expect.
fn labelled_line<'a>(row: Option<&'a RawRow>, label: &str) -> Result<&'a RawRow> {
    match row {
        Some(row) if row.field(0).trim() == label => Ok(row),
        Some(row) => bail_malformed!(
            SOURCE_NAME,
            "expected {:?} at the start of line {}, found {:?}",
            label,
            row.line + 1,
            row.field(0)
        ),
        None => bail_malformed!(SOURCE_NAME, "header row {:?} not found", label),
    }
}

fn parse_categories(category_row: &RawRow, weight_row: &RawRow) -> Vec<Category> {
    (1..category_row.fields.len())
        .filter_map(|i| {
            let label = category_row.field(i).trim();
            let weight = weight_row.field(i).trim();
            (!label.is_empty() && !weight.is_empty()).then(|| Category::parse(label, weight))
        })
        .collect()
}

/// Name each column by the student field row, falling back to the category
/// row, then drop columns with no data.
fn parse_grades(
    rows: &[RawRow],
    category_row: &RawRow,
    student_fields: &[String],
) -> Result<Table> {
    let width = category_row.fields.len().max(student_fields.len());
    let columns: Vec<String> = (0..width)
        .map(|i| match student_fields.get(i) {
            Some(name) => name.clone(),
            None => category_row.field(i).trim().to_string(),
        })
        .collect();

    let mut data = Vec::new();
    for row in rows.iter().filter(|r| r.line >= layout::FIRST_DATA_LINE) {
        if row.is_blank() {
            continue;
        }
        check_delimiter(SOURCE_NAME, row, Delimiter::Tab, width)?;
        data.push(row.fields.clone());
    }

    // Student fields are identifiers and keep their raw text
    let text_columns: Vec<&str> = student_fields.iter().map(String::as_str).collect();
    let mut grades = Table::from_raw_rows_with_text(SOURCE_NAME, columns, data, &text_columns)?;
    grades.drop_empty_columns();
    if let Some(idx) = grades.columns().iter().position(|c| c.is_empty()) {
        bail_malformed!(SOURCE_NAME, "column {} has data but no name", idx + 1);
    }
    Ok(grades)
}
