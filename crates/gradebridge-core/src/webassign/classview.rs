//! Assignment schedule scraped from a WebAssign ClassView page
//!
//! Each assignment is a table row whose first cell holds the name in bold
//! and whose fourth cell holds the "available" and "due" timestamps, e.g.
//! `5-2-16 05:00 PM EDT`.

use std::io::Write;
use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::error::{GradebridgeError, Result};
use crate::pattern;

static ROW_TAG_RE: OnceLock<Regex> = OnceLock::new();
static CELL_RE: OnceLock<Regex> = OnceLock::new();
static BOLD_RE: OnceLock<Regex> = OnceLock::new();
static TAG_RE: OnceLock<Regex> = OnceLock::new();
static WA_DATE_RE: OnceLock<Regex> = OnceLock::new();

const ROW_TAG_PATTERN: &str = r"(?is)<(/?)(tr|table)\b[^>]*>";
const CELL_PATTERN: &str = r"(?is)<t[dh]\b[^>]*>(.*?)</t[dh]\s*>";
const BOLD_PATTERN: &str = r"(?is)<b\b[^>]*>(.*?)</b\s*>";
const TAG_PATTERN: &str = r"(?s)<[^>]*>";
const WA_DATE_PATTERN: &str = r"(\d+)-(\d+)-(\d+).(\d{2}):(\d{2}) (AM|PM).([A-Z]+)";

const WA_DATE_EXAMPLE: &str = "5-2-16 05:00 PM EDT";

/// One scheduled assignment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub name: String,
    pub available: NaiveDateTime,
    pub due: NaiveDateTime,
}

impl Assignment {
    /// Announcement line for the course site
    pub fn announcement(&self) -> String {
        format!(
            "WebAssignment \u{201c}{}\u{201d} due {}",
            self.name,
            local_datetime_format(&self.due)
        )
    }
}

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> Result<&'static Regex> {
    pattern::cached(cell, pattern)
        .ok_or_else(|| GradebridgeError::Other(format!("invalid pattern {:?}", pattern)))
}

/// Parse every WebAssign timestamp in `text`, in order.
///
/// Two-digit years are in the 2000s and the hour is on a 12-hour clock.
pub fn parse_wa_datetimes(text: &str) -> Result<Vec<NaiveDateTime>> {
    let re = regex(&WA_DATE_RE, WA_DATE_PATTERN)?;
    re.captures_iter(text)
        .map(|caps| {
            let num = |i: usize| caps[i].parse::<u32>().ok();
            let invalid = || GradebridgeError::unparseable_date(&caps[0], WA_DATE_EXAMPLE);
            let (month, day) = (num(1), num(2));
            let year = num(3)
                .and_then(|y| i32::try_from(y).ok())
                .and_then(|y| y.checked_add(2000));
            let (hour, minute) = (num(4), num(5));
            let pm = &caps[6] == "PM";
            let date = match (year, month, day) {
                (Some(y), Some(m), Some(d)) => NaiveDate::from_ymd_opt(y, m, d),
                _ => None,
            }
            .ok_or_else(invalid)?;
            let hour = hour.map(|h| (h % 12) + if pm { 12 } else { 0 });
            match (hour, minute) {
                (Some(h), Some(min)) => date.and_hms_opt(h, min, 0).ok_or_else(invalid),
                _ => Err(invalid()),
            }
        })
        .collect()
}

/// `2016-05-02`
pub fn iso_date_format(date: &NaiveDateTime) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `Monday May 2 5:00PM`: zero padding on the day and hour removed
pub fn local_datetime_format(date: &NaiveDateTime) -> String {
    date.format("%A %B %d %I:%M%p")
        .to_string()
        .replace(" 0", " ")
}

fn cell_text(html: &str) -> Result<String> {
    let stripped = regex(&TAG_RE, TAG_PATTERN)?.replace_all(html, " ");
    let decoded = escaper::decode_html(&stripped).unwrap_or_else(|_| stripped.to_string());
    Ok(decoded
        .replace('\u{a0}', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" "))
}

/// Bodies of the rows that hold no nested table.
///
/// The assignment table sits inside a cell of the page layout table, so a
/// row is only taken when its `</tr>` comes before any other `<tr>` or
/// `<table>` tag.
fn innermost_rows(html: &str) -> Result<Vec<&str>> {
    let tag_re = regex(&ROW_TAG_RE, ROW_TAG_PATTERN)?;
    let mut rows = Vec::new();
    let mut open = None;
    for tag in tag_re.captures_iter(html) {
        let closing = !tag[1].is_empty();
        let is_row = tag[2].eq_ignore_ascii_case("tr");
        let Some(m) = tag.get(0) else {
            continue;
        };
        match (closing, is_row) {
            (false, true) => open = Some(m.end()),
            (true, true) => {
                if let Some(start) = open.take() {
                    rows.push(&html[start..m.start()]);
                }
            }
            _ => open = None,
        }
    }
    Ok(rows)
}

/// Extract the assignment schedule from a ClassView page.
///
/// Scanning starts at the element with `id="wa"` when there is one. Rows
/// with fewer than four cells or no bold name in the first cell are not
/// assignments and are skipped.
pub fn assignments_from_html(html: &str) -> Result<Vec<Assignment>> {
    let body = match html.find("id=\"wa\"") {
        Some(pos) => &html[pos..],
        None => html,
    };
    let cell_re = regex(&CELL_RE, CELL_PATTERN)?;
    let bold_re = regex(&BOLD_RE, BOLD_PATTERN)?;

    let mut assignments = Vec::new();
    for row in innermost_rows(body)? {
        let cells: Vec<&str> = cell_re
            .captures_iter(row)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect();
        if cells.len() < 4 {
            continue;
        }
        let Some(bold) = bold_re.captures(cells[0]) else {
            continue;
        };
        let name = cell_text(&bold[1])?;
        if name.is_empty() {
            continue;
        }

        let date_text = cell_text(cells[3])?;
        let dates = parse_wa_datetimes(&date_text)?;
        let [available, due, ..] = dates[..] else {
            return Err(GradebridgeError::unparseable_date(date_text, WA_DATE_EXAMPLE));
        };
        debug!(%name, %available, %due, "found assignment");
        assignments.push(Assignment {
            name,
            available,
            due,
        });
    }
    Ok(assignments)
}

/// Write the announcement CSV: `startDate,endDate,announcementText`.
pub fn write_announcements<W: Write>(writer: W, assignments: &[Assignment]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["startDate", "endDate", "announcementText"])?;
    for assignment in assignments {
        csv_writer.write_record([
            iso_date_format(&assignment.available),
            iso_date_format(&assignment.due),
            assignment.announcement(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}
