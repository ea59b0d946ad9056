//! NYU Classes gradebook import template

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{GradebridgeError, Result};
use crate::table::Table;
use crate::tabular::{read_table, Delimiter, TableLayout};

pub const SOURCE_NAME: &str = "NYU Classes gradebook";

pub const STUDENT_ID_COLUMN: &str = "Student ID";
pub const STUDENT_NAME_COLUMN: &str = "Student Name";

/// Identity columns, in output order
pub const IDENTITY_COLUMNS: [&str; 2] = [STUDENT_ID_COLUMN, STUDENT_NAME_COLUMN];

/// The students of an NYU Classes gradebook, identity columns only
#[derive(Debug, Clone, PartialEq)]
pub struct ClassesRoster {
    students: Table,
}

impl ClassesRoster {
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(GradebridgeError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Self::parse(File::open(path)?)
    }

    /// Read the template CSV. Any grade columns it already has are ignored.
    pub fn parse<R: Read>(reader: R) -> Result<Self> {
        let layout = TableLayout {
            delimiter: Delimiter::Comma,
            keep_empty_columns: true,
            text_columns: &IDENTITY_COLUMNS,
            ..Default::default()
        };
        let table = read_table(SOURCE_NAME, reader, &layout)?;
        let students = table.select(SOURCE_NAME, &IDENTITY_COLUMNS)?;
        debug!(students = students.len(), "parsed roster");
        Ok(Self { students })
    }

    pub fn students(&self) -> &Table {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Student ID and name of every row, in file order
    pub fn identities(&self) -> impl Iterator<Item = (Option<String>, Option<String>)> + '_ {
        self.students
            .rows()
            .iter()
            .map(|row| (row[0].as_key(), row[1].as_key()))
    }
}
