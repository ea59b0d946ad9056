//! In-memory gradebook tables
//!
//! A [`Table`] is an ordered list of column names plus rows of [`Cell`]s.
//! Every row always has exactly one cell per column.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::bail_missing_column;
use crate::error::{GradebridgeError, Result};

/// A single table value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    /// Missing value
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Type a raw field: blank is empty, anything `f64` accepts is a number.
    ///
    /// Zero-padded identifiers such as `007` stay text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Empty;
        }
        let mut chars = trimmed.chars();
        if chars.next() == Some('0') && chars.next().is_some_and(|c| c.is_ascii_digit()) {
            return Cell::Text(trimmed.to_string());
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => Cell::Number(v),
            _ => Cell::Text(trimmed.to_string()),
        }
    }

    /// Keep a raw field as text, untyped. Blank is still empty.
    pub fn text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(trimmed.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// The cell as a join key; empty cells never produce a key
    pub fn as_key(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            other => {
                let s = other.to_string();
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Number(v) => write!(f, "{}", v),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Cell::Empty => serializer.serialize_none(),
            Cell::Number(v) => serializer.serialize_f64(*v),
            Cell::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// A rectangular table with named columns
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from raw string rows, typing every cell.
    ///
    /// Short rows are padded with empty cells; a row with more populated
    /// cells than there are columns is rejected.
    pub fn from_raw_rows(
        source_name: &str,
        columns: Vec<String>,
        rows: impl IntoIterator<Item = Vec<String>>,
    ) -> Result<Self> {
        Self::from_raw_rows_with_text(source_name, columns, rows, &[])
    }

    /// Like [`Table::from_raw_rows`], but cells of `text_columns` keep their
    /// raw text so identifiers such as `1e3` are never rewritten.
    pub fn from_raw_rows_with_text(
        source_name: &str,
        columns: Vec<String>,
        rows: impl IntoIterator<Item = Vec<String>>,
        text_columns: &[&str],
    ) -> Result<Self> {
        let keep_text: Vec<bool> = columns
            .iter()
            .map(|c| text_columns.contains(&c.as_str()))
            .collect();
        let mut table = Table::new(columns);
        for (idx, raw) in rows.into_iter().enumerate() {
            let populated = raw
                .iter()
                .rposition(|f| !f.trim().is_empty())
                .map_or(0, |p| p + 1);
            if populated > table.columns.len() {
                return Err(GradebridgeError::malformed(
                    source_name,
                    format!(
                        "data row {} has {} populated cells but the header has {} columns",
                        idx + 1,
                        populated,
                        table.columns.len()
                    ),
                ));
            }
            let mut cells: Vec<Cell> = raw
                .iter()
                .zip(&keep_text)
                .map(|(f, &text)| if text { Cell::text(f) } else { Cell::parse(f) })
                .collect();
            cells.resize(table.columns.len(), Cell::Empty);
            table.rows.push(cells);
        }
        Ok(table)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Index of a column that must be present
    pub fn require_column(&self, source_name: &str, name: &str) -> Result<usize> {
        match self.column_index(name) {
            Some(idx) => Ok(idx),
            None => bail_missing_column!(source_name, name),
        }
    }

    /// Append a row; it must have one cell per column
    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(GradebridgeError::Other(format!(
                "row has {} cells but table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&Cell> {
        let col = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[col])
    }

    /// Replace every value of a column using `f`
    pub fn map_column(&mut self, col: usize, mut f: impl FnMut(&Cell) -> Cell) {
        for row in &mut self.rows {
            row[col] = f(&row[col]);
        }
    }

    /// Write `values` into `name`, creating the column at the end if needed.
    pub fn set_column(&mut self, name: &str, values: Vec<Cell>) -> Result<()> {
        if values.len() != self.rows.len() {
            return Err(GradebridgeError::Other(format!(
                "column {:?} has {} values but table has {} rows",
                name,
                values.len(),
                self.rows.len()
            )));
        }
        let col = match self.column_index(name) {
            Some(col) => col,
            None => {
                self.columns.push(name.to_string());
                for row in &mut self.rows {
                    row.push(Cell::Empty);
                }
                self.columns.len() - 1
            }
        };
        for (row, value) in self.rows.iter_mut().zip(values) {
            row[col] = value;
        }
        Ok(())
    }

    /// Values of one column, top to bottom
    pub fn column_values(&self, col: usize) -> impl Iterator<Item = &Cell> {
        self.rows.iter().map(move |r| &r[col])
    }

    /// Drop columns whose every cell is empty
    pub fn drop_empty_columns(&mut self) -> Vec<String> {
        let keep: Vec<bool> = (0..self.columns.len())
            .map(|col| self.rows.iter().any(|r| !r[col].is_empty()))
            .collect();
        let dropped = self
            .columns
            .iter()
            .zip(&keep)
            .filter(|(_, k)| !**k)
            .map(|(c, _)| c.clone())
            .collect();
        self.retain_columns(&keep);
        dropped
    }

    /// Keep only the named columns, in the given order
    pub fn select(&self, source_name: &str, names: &[&str]) -> Result<Table> {
        let indices = names
            .iter()
            .map(|n| self.require_column(source_name, n))
            .collect::<Result<Vec<_>>>()?;
        Ok(Table {
            columns: names.iter().map(|n| n.to_string()).collect(),
            rows: self
                .rows
                .iter()
                .map(|r| indices.iter().map(|&i| r[i].clone()).collect())
                .collect(),
        })
    }

    /// Keep only the rows for which `keep` is true
    pub fn retain_rows(&mut self, mut keep: impl FnMut(usize) -> bool) {
        let mut idx = 0;
        self.rows.retain(|_| {
            let k = keep(idx);
            idx += 1;
            k
        });
    }

    fn retain_columns(&mut self, keep: &[bool]) {
        let mut flags = keep.iter();
        self.columns.retain(|_| *flags.next().unwrap_or(&true));
        for row in &mut self.rows {
            let mut flags = keep.iter();
            row.retain(|_| *flags.next().unwrap_or(&true));
        }
    }
}
