//! Command dispatch logic for gradebridge

use std::time::Instant;

use crate::cli::Cli;
use gradebridge_core::config::ConvertConfig;
use gradebridge_core::error::Result;
use tracing::debug;

mod command;
mod commands;

pub use command::{require_inputs, Command, CommandContext};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let config = ConvertConfig::load_or_default(cli.config.as_deref())?;

    debug!(elapsed = ?start.elapsed(), config = ?cli.config, "load_config");

    let ctx = CommandContext::new(cli, config, start);

    cli.command.execute(&ctx)
}
