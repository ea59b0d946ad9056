//! `gradebridge wa2nyuc` - merge a WebAssign GradeBook into an NYU Classes
//! gradebook template

use tracing::{debug, info};

use crate::cli::Wa2nyucArgs;
use crate::commands::dispatch::{require_inputs, CommandContext};
use gradebridge_core::config::ConvertConfig;
use gradebridge_core::error::Result;
use gradebridge_core::nyuclasses::{merge, ClassesRoster, MergeOptions};
use gradebridge_core::output::{render, Destination};
use gradebridge_core::webassign::{GradePipeline, WebAssignGradebook};

/// Settings from the config file with the command line flags applied.
///
/// Flags only switch options on; `--roundup` columns run after the
/// configured ones.
pub fn effective_config(base: &ConvertConfig, args: &Wa2nyucArgs) -> ConvertConfig {
    let mut config = base.clone();
    let webassign = &mut config.webassign;
    webassign.roundup.extend(args.roundup.iter().cloned());
    webassign.recalculate |= args.recalculate;
    webassign.dated_column |= args.dated_column;
    webassign.strict_weights |= args.strict_weights;
    config.merge.drop_unmatched |= args.drop_unmatched;
    if let Some(policy) = args.on_ambiguous {
        config.merge.on_ambiguous = policy;
    }
    config
}

pub fn execute(ctx: &CommandContext, args: &Wa2nyucArgs) -> Result<()> {
    require_inputs(&[&args.webassign, &args.nyu_classes])?;
    let config = effective_config(&ctx.config, args);

    let mut gradebook = WebAssignGradebook::from_path(&args.webassign)?;
    info!(
        section = %gradebook.section_name,
        date = %gradebook.date,
        students = gradebook.grades.len(),
        graded_categories = gradebook.graded_categories().count(),
        email = gradebook.has_email(),
        "read WebAssign GradeBook"
    );
    let roster = ClassesRoster::from_path(&args.nyu_classes)?;
    info!(students = roster.len(), "read NYU Classes roster");

    let pipeline = GradePipeline::from_config(&config.webassign);
    if !pipeline.is_identity() {
        pipeline.apply(&mut gradebook)?;
    }

    let (merged, report) = merge(
        &roster,
        &gradebook.grades,
        &MergeOptions::from_config(&config.merge),
    )?;
    debug!(?report, elapsed = ?ctx.start.elapsed(), "merge_complete");

    let bytes = render(&merged, ctx.format())?;
    let destination = match &args.output {
        Some(path) => Destination::from_arg(path),
        None => Destination::dated(&gradebook.date, ctx.format()),
    };
    ctx.emit(
        &destination,
        &bytes,
        &format!("Wrote {} students", merged.len()),
    )
}
