//! `gradebridge nyuc2gs` - Gradescope roster from an NYU Classes roster

use tracing::info;

use crate::cli::Nyuc2gsArgs;
use crate::commands::dispatch::{require_inputs, CommandContext};
use gradebridge_core::error::Result;
use gradebridge_core::gradescope::roster_table;
use gradebridge_core::nyuclasses::ClassesRoster;
use gradebridge_core::output::{render, Destination};

pub fn execute(ctx: &CommandContext, args: &Nyuc2gsArgs) -> Result<()> {
    require_inputs(&[&args.input])?;
    let roster = ClassesRoster::from_path(&args.input)?;
    let domain = args
        .email_domain
        .as_deref()
        .unwrap_or(&ctx.config.gradescope.email_domain);
    let table = roster_table(&roster, domain)?;
    info!(students = table.len(), %domain, "built Gradescope roster");

    let bytes = render(&table, ctx.format())?;
    let destination = args
        .output
        .as_deref()
        .map_or(Destination::Stdout, Destination::from_arg);
    ctx.emit(
        &destination,
        &bytes,
        &format!("Wrote {} students", table.len()),
    )
}
