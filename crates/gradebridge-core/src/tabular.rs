//! Delimited text reader
//!
//! Platform exports carry metadata lines above the real header, so rows are
//! kept together with their physical line number and callers pick the
//! header and data lines by position.

use std::io::{BufRead, BufReader, Read};

use tracing::debug;

use crate::bail_malformed;
use crate::error::Result;
use crate::table::Table;

/// Field delimiter of an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Tab,
    Comma,
}

impl Delimiter {
    pub fn byte(self) -> u8 {
        match self {
            Delimiter::Tab => b'\t',
            Delimiter::Comma => b',',
        }
    }

    /// The delimiter a misdetected file would be using instead
    fn other(self) -> char {
        match self {
            Delimiter::Tab => ',',
            Delimiter::Comma => '\t',
        }
    }
}

/// One parsed record and the zero-based line it started on
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub line: usize,
    pub fields: Vec<String>,
}

impl RawRow {
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|f| f.trim().is_empty())
    }

    pub fn field(&self, idx: usize) -> &str {
        self.fields.get(idx).map(|s| s.as_str()).unwrap_or("")
    }
}

/// Where the header and data live in a delimited file
#[derive(Debug, Clone)]
pub struct TableLayout<'a> {
    pub delimiter: Delimiter,
    /// Line holding the column names
    pub header_line: usize,
    /// Lines below the header that are metadata, not data
    pub skip_lines: &'a [usize],
    /// Keep columns that have no values at all
    pub keep_empty_columns: bool,
    /// Columns read as raw text instead of typed cells
    pub text_columns: &'a [&'a str],
}

impl Default for TableLayout<'_> {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::Comma,
            header_line: 0,
            skip_lines: &[],
            keep_empty_columns: false,
            text_columns: &[],
        }
    }
}

/// Read every record of a delimited stream, keeping physical line numbers.
///
/// Records are split line by line, so quoted fields cannot span lines.
/// Blank lines produce no row but still count.
pub fn read_raw_rows<R: Read>(reader: R, delimiter: Delimiter) -> Result<Vec<RawRow>> {
    let mut rows = Vec::new();
    let mut record = csv::StringRecord::new();
    for (line, text) in BufReader::new(reader).lines().enumerate() {
        let text = text?;
        let text = if line == 0 {
            text.trim_start_matches('\u{feff}')
        } else {
            text.as_str()
        };
        if text.trim().is_empty() {
            continue;
        }
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(delimiter.byte())
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());
        if csv_reader.read_record(&mut record)? {
            rows.push(RawRow {
                line,
                fields: record.iter().map(|f| f.to_string()).collect(),
            });
        }
    }
    Ok(rows)
}

/// Reject a row that was clearly written with the other delimiter.
pub fn check_delimiter(
    source_name: &str,
    row: &RawRow,
    delimiter: Delimiter,
    width: usize,
) -> Result<()> {
    if width > 1 && row.fields.len() == 1 && row.fields[0].contains(delimiter.other()) {
        bail_malformed!(
            source_name,
            "line {} uses {:?} instead of the file's delimiter",
            row.line + 1,
            delimiter.other()
        );
    }
    Ok(())
}

/// Column names from a header row, without the trailing unnamed cells
pub fn header_names(row: &RawRow) -> Vec<String> {
    let mut names: Vec<String> = row.fields.iter().map(|f| f.trim().to_string()).collect();
    while names.last().is_some_and(|n| n.is_empty()) {
        names.pop();
    }
    names
}

/// Read a delimited stream into a typed table.
///
/// Columns that end up entirely empty are dropped unless the layout says
/// otherwise.
pub fn read_table<R: Read>(source_name: &str, reader: R, layout: &TableLayout) -> Result<Table> {
    let rows = read_raw_rows(reader, layout.delimiter)?;

    let Some(header) = rows.iter().find(|r| r.line == layout.header_line) else {
        bail_malformed!(
            source_name,
            "header row (line {}) not found",
            layout.header_line + 1
        );
    };
    let columns = header_names(header);
    if columns.is_empty() {
        bail_malformed!(source_name, "header row is empty");
    }
    check_delimiter(source_name, header, layout.delimiter, 2)?;

    let mut data = Vec::new();
    for row in &rows {
        if row.line <= layout.header_line || layout.skip_lines.contains(&row.line) {
            continue;
        }
        if row.is_blank() {
            continue;
        }
        check_delimiter(source_name, row, layout.delimiter, columns.len())?;
        data.push(row.fields.clone());
    }

    let mut table =
        Table::from_raw_rows_with_text(source_name, columns, data, layout.text_columns)?;
    if layout.keep_empty_columns {
        return Ok(table);
    }
    let dropped = table.drop_empty_columns();
    if !dropped.is_empty() {
        debug!(source = source_name, ?dropped, "dropped empty columns");
    }
    Ok(table)
}
