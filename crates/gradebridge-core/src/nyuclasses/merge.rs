//! Roster merge: attach GradeBook rows to NYU Classes students
//!
//! Three left joins run against the original roster, each on a different
//! identity pair:
//!
//! 1. `Student ID` = `Username`
//! 2. `Student Name` = `Fullname`
//! 3. `Student ID` = local part of `Email`
//!
//! Every grade cell is then taken from the first join that produced a
//! non-empty value for it.

use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{AmbiguityPolicy, MergeConfig};
use crate::error::{GradebridgeError, Result};
use crate::nyuclasses::roster::{
    ClassesRoster, IDENTITY_COLUMNS, STUDENT_ID_COLUMN, STUDENT_NAME_COLUMN,
};
use crate::table::{Cell, Table};
use crate::trace_time;
use crate::webassign::gradebook::{EMAIL_COLUMN, FULLNAME_COLUMN, SOURCE_NAME, USERNAME_COLUMN};

/// The identity pairs tried, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinKey {
    StudentId,
    StudentName,
    EmailNetId,
}

impl JoinKey {
    pub const ALL: [JoinKey; 3] = [JoinKey::StudentId, JoinKey::StudentName, JoinKey::EmailNetId];

    /// Roster column the key is read from
    pub fn target_column(self) -> &'static str {
        match self {
            JoinKey::StudentId | JoinKey::EmailNetId => STUDENT_ID_COLUMN,
            JoinKey::StudentName => STUDENT_NAME_COLUMN,
        }
    }

    /// GradeBook column the key is read from
    pub fn source_column(self) -> &'static str {
        match self {
            JoinKey::StudentId => USERNAME_COLUMN,
            JoinKey::StudentName => FULLNAME_COLUMN,
            JoinKey::EmailNetId => EMAIL_COLUMN,
        }
    }

    fn source_key(self, cell: &Cell) -> Option<String> {
        let key = cell.as_key()?;
        match self {
            JoinKey::EmailNetId => {
                let local = key.split('@').next().unwrap_or_default().trim();
                (!local.is_empty()).then(|| local.to_string())
            }
            _ => Some(key),
        }
    }
}

impl fmt::Display for JoinKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.target_column(), self.source_column())
    }
}

/// Merge behavior
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOptions {
    pub drop_unmatched: bool,
    pub on_ambiguous: AmbiguityPolicy,
}

impl MergeOptions {
    pub fn from_config(config: &MergeConfig) -> Self {
        Self {
            drop_unmatched: config.drop_unmatched,
            on_ambiguous: config.on_ambiguous,
        }
    }
}

/// What happened to the roster during a merge
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    pub students: usize,
    pub matched_by_id: usize,
    pub matched_by_name: usize,
    pub matched_by_email: usize,
    /// Students no join matched
    pub unmatched: usize,
    /// Joins that found more than one GradeBook row for a student
    pub ambiguous: usize,
    pub dropped: usize,
    pub email_join_skipped: bool,
}

impl MergeReport {
    fn record_match(&mut self, key: JoinKey) {
        match key {
            JoinKey::StudentId => self.matched_by_id += 1,
            JoinKey::StudentName => self.matched_by_name += 1,
            JoinKey::EmailNetId => self.matched_by_email += 1,
        }
    }
}

/// GradeBook row lookup for one join
struct JoinIndex {
    key: JoinKey,
    rows_by_key: HashMap<String, Vec<usize>>,
}

impl JoinIndex {
    fn build(key: JoinKey, grades: &Table, col: usize) -> Self {
        let mut rows_by_key: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, cell) in grades.column_values(col).enumerate() {
            if let Some(k) = key.source_key(cell) {
                rows_by_key.entry(k).or_default().push(idx);
            }
        }
        Self { key, rows_by_key }
    }

    fn candidates(&self, target_key: Option<&str>) -> &[usize] {
        target_key
            .and_then(|k| self.rows_by_key.get(k))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Merge GradeBook `grades` onto the roster.
///
/// The result has one row per roster student, in roster order, unless
/// `drop_unmatched` is set. Its columns are the identity columns followed
/// by every GradeBook column in GradeBook order.
pub fn merge(
    roster: &ClassesRoster,
    grades: &Table,
    options: &MergeOptions,
) -> Result<(Table, MergeReport)> {
    let start = Instant::now();
    let indexes = build_indexes(grades)?;
    let mut report = MergeReport {
        students: roster.len(),
        email_join_skipped: indexes.len() < JoinKey::ALL.len(),
        ..Default::default()
    };
    if report.email_join_skipped {
        warn!(
            source = SOURCE_NAME,
            "no {} column, skipping the email join", EMAIL_COLUMN
        );
    }

    let source_columns: Vec<(usize, &String)> = grades
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, name)| !IDENTITY_COLUMNS.contains(&name.as_str()))
        .collect();
    let mut columns: Vec<String> = IDENTITY_COLUMNS.iter().map(|c| c.to_string()).collect();
    columns.extend(source_columns.iter().map(|(_, name)| (*name).clone()));
    let mut merged = Table::new(columns);
    let mut matched_rows = Vec::with_capacity(roster.len());

    for (row_idx, (student_id, student_name)) in roster.identities().enumerate() {
        let mut matches = Vec::with_capacity(indexes.len());
        for index in &indexes {
            let target_key = match index.key {
                JoinKey::StudentName => student_name.as_deref(),
                JoinKey::StudentId | JoinKey::EmailNetId => student_id.as_deref(),
            };
            if let Some(source_row) = pick(index, target_key, options, &mut report)? {
                report.record_match(index.key);
                matches.push(source_row);
            }
        }
        matched_rows.push(!matches.is_empty());

        let mut row = roster.students().rows()[row_idx].clone();
        row.extend(source_columns.iter().map(|&(col, _)| coalesce(grades, &matches, col)));
        merged.push_row(row)?;
    }

    report.unmatched = matched_rows.iter().filter(|m| !**m).count();
    if report.unmatched > 0 {
        warn!(
            unmatched = report.unmatched,
            dropped = options.drop_unmatched,
            "roster students with no GradeBook row"
        );
    }
    if options.drop_unmatched {
        merged.retain_rows(|idx| matched_rows[idx]);
        report.dropped = report.unmatched;
    }

    info!(
        students = report.students,
        by_id = report.matched_by_id,
        by_name = report.matched_by_name,
        by_email = report.matched_by_email,
        unmatched = report.unmatched,
        "merged roster"
    );
    trace_time!(start, "roster_merge");
    Ok((merged, report))
}

fn build_indexes(grades: &Table) -> Result<Vec<JoinIndex>> {
    let mut indexes = Vec::with_capacity(JoinKey::ALL.len());
    for key in JoinKey::ALL {
        let col = match key {
            JoinKey::EmailNetId => match grades.column_index(key.source_column()) {
                Some(col) => col,
                None => continue,
            },
            _ => grades.require_column(SOURCE_NAME, key.source_column())?,
        };
        let index = JoinIndex::build(key, grades, col);
        debug!(join = %key, keys = index.rows_by_key.len(), "built join index");
        indexes.push(index);
    }
    Ok(indexes)
}

/// Resolve one join for one student
fn pick(
    index: &JoinIndex,
    target_key: Option<&str>,
    options: &MergeOptions,
    report: &mut MergeReport,
) -> Result<Option<usize>> {
    let candidates = index.candidates(target_key);
    if candidates.len() > 1 {
        let key = target_key.unwrap_or_default().to_string();
        if options.on_ambiguous == AmbiguityPolicy::Error {
            return Err(GradebridgeError::AmbiguousMatch {
                key_column: index.key.target_column().to_string(),
                key,
                candidates: candidates.len(),
            });
        }
        report.ambiguous += 1;
        warn!(
            join = %index.key,
            %key,
            candidates = candidates.len(),
            "several GradeBook rows match, using the first"
        );
    }
    Ok(candidates.first().copied())
}

/// First non-empty value of `col` across the matched rows
fn coalesce(grades: &Table, matches: &[usize], col: usize) -> Cell {
    matches
        .iter()
        .map(|&row| &grades.rows()[row][col])
        .find(|cell| !cell.is_empty())
        .cloned()
        .unwrap_or_default()
}
