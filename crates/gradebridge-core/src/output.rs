//! Output rendering for converted tables
//!
//! Supports two output formats:
//! - csv: header plus one line per row, the format the platforms import
//! - json: `{"columns": [...], "rows": [[...]]}` with empty cells as `null`
//!
//! Output is rendered to memory first and only then written, so a failed
//! conversion never leaves a partial file behind.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bail_invalid;
use crate::error::{GradebridgeError, Result};
use crate::table::Table;

/// Output format for converted tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Comma separated values (default)
    #[default]
    Csv,
    /// JSON for machine consumption
    Json,
}

impl FromStr for OutputFormat {
    type Err = GradebridgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => bail_invalid!("output format (expected csv or json)", other),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Write `table` as CSV. Numbers use the shortest form that reads back
/// to the same value.
pub fn write_csv<W: Write>(writer: W, table: &Table) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(table.columns())?;
    for row in table.rows() {
        csv_writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(mut writer: W, table: &Table) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, table)?;
    writeln!(writer)?;
    Ok(())
}

/// Render `table` in `format`
pub fn render(table: &Table, format: OutputFormat) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    match format {
        OutputFormat::Csv => write_csv(&mut buf, table)?,
        OutputFormat::Json => write_json(&mut buf, table)?,
    }
    Ok(buf)
}

/// Where rendered output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl Destination {
    /// `-` means standard output, anything else is a path
    pub fn from_arg(arg: &Path) -> Self {
        if arg == Path::new("-") {
            Destination::Stdout
        } else {
            Destination::File(arg.to_path_buf())
        }
    }

    /// `WebAssign_<YYYY-MM-DD>.csv` (or `.json`) in the current directory
    pub fn dated(date: &NaiveDateTime, format: OutputFormat) -> Self {
        Destination::File(PathBuf::from(format!(
            "WebAssign_{}.{}",
            date.format("%Y-%m-%d"),
            format
        )))
    }

    pub fn is_stdout(&self) -> bool {
        matches!(self, Destination::Stdout)
    }

    /// Write fully rendered output
    pub fn write(&self, bytes: &[u8]) -> Result<()> {
        match self {
            Destination::Stdout => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(bytes)?;
                stdout.flush()?;
            }
            Destination::File(path) => {
                fs::write(path, bytes)?;
                debug!(path = %path.display(), bytes = bytes.len(), "wrote output");
            }
        }
        Ok(())
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Stdout => write!(f, "<stdout>"),
            Destination::File(path) => write!(f, "{}", path.display()),
        }
    }
}
