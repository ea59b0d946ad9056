//! `gradebridge wacv2csv` - assignment announcements from a ClassView page

use std::fs;

use tracing::info;

use crate::cli::{OutputFormat, Wacv2csvArgs};
use crate::commands::dispatch::{require_inputs, CommandContext};
use gradebridge_core::error::Result;
use gradebridge_core::output::Destination;
use gradebridge_core::webassign::{assignments_from_html, write_announcements};

pub fn execute(ctx: &CommandContext, args: &Wacv2csvArgs) -> Result<()> {
    require_inputs(&[&args.input])?;
    let html = fs::read_to_string(&args.input)?;
    let assignments = assignments_from_html(&html)?;
    info!(count = assignments.len(), "found assignments");

    let mut bytes = Vec::new();
    match ctx.format() {
        OutputFormat::Csv => write_announcements(&mut bytes, &assignments)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut bytes, &assignments)?;
            bytes.push(b'\n');
        }
    }

    let destination = args
        .output
        .as_deref()
        .map_or(Destination::Stdout, Destination::from_arg);
    ctx.emit(
        &destination,
        &bytes,
        &format!("Wrote {} assignments", assignments.len()),
    )
}
