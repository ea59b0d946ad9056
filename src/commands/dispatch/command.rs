//! Command trait and context for dispatching commands

use std::path::Path;
use std::time::Instant;

use crate::cli::{Cli, OutputFormat};
use gradebridge_core::config::ConvertConfig;
use gradebridge_core::error::{GradebridgeError, Result};
use gradebridge_core::output::Destination;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub config: ConvertConfig,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, config: ConvertConfig, start: Instant) -> Self {
        Self { cli, config, start }
    }

    pub fn format(&self) -> OutputFormat {
        self.cli.format
    }

    /// Write rendered output and, for files, say where it went
    pub fn emit(&self, destination: &Destination, bytes: &[u8], summary: &str) -> Result<()> {
        destination.write(bytes)?;
        if !destination.is_stdout() && !self.cli.quiet {
            println!("{} to {}", summary, destination);
        }
        Ok(())
    }
}

/// Fail early when an input file is missing, before anything is parsed
pub fn require_inputs(paths: &[&Path]) -> Result<()> {
    match paths.iter().find(|p| !p.exists()) {
        Some(path) => Err(GradebridgeError::NotFound {
            path: path.to_path_buf(),
        }),
        None => Ok(()),
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}
