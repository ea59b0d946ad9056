//! `gradebridge categories` - list the categories of a WebAssign GradeBook

use tracing::debug;

use crate::cli::{CategoriesArgs, OutputFormat};
use crate::commands::dispatch::{require_inputs, CommandContext};
use gradebridge_core::error::Result;
use gradebridge_core::output::{render, Destination};
use gradebridge_core::webassign::recalc::check_weights;
use gradebridge_core::webassign::{categories_table, WebAssignGradebook};

pub fn execute(ctx: &CommandContext, args: &CategoriesArgs) -> Result<()> {
    require_inputs(&[&args.webassign])?;
    let gradebook = WebAssignGradebook::from_path(&args.webassign)?;
    let check = check_weights(
        &gradebook.categories,
        ctx.config.webassign.weight_tolerance,
        false,
    )?;
    debug!(sum = check.sum, complete = check.is_complete(), "checked weights");

    let bytes = match ctx.format() {
        OutputFormat::Csv => render(&categories_table(&gradebook.categories)?, OutputFormat::Csv)?,
        OutputFormat::Json => {
            let listing = serde_json::json!({
                "section": gradebook.section_name,
                "date": gradebook.date,
                "categories": gradebook.categories,
                "graded_weight_sum": check.sum,
                "weights_complete": check.is_complete(),
            });
            let mut bytes = serde_json::to_vec_pretty(&listing)?;
            bytes.push(b'\n');
            bytes
        }
    };
    Destination::Stdout.write(&bytes)?;

    if ctx.format() == OutputFormat::Csv && !ctx.cli.quiet {
        eprintln!(
            "graded weights sum to {}{}",
            check.sum,
            if check.is_complete() { "" } else { " (expected 1)" }
        );
    }
    Ok(())
}
