//! CLI argument parsing for gradebridge
//!
//! Supports global flags: --format, --quiet, --verbose, --debug,
//! --log-level, --log-json, --config

pub mod args;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use gradebridge_core::config::CONFIG_ENV_VAR;
pub use args::{CategoriesArgs, Nyuc2gsArgs, Wa2nyucArgs, Wacv2csvArgs};
pub use output::OutputFormat;

/// Gradebridge - gradebook and roster converters for WebAssign, NYU Classes
/// and Gradescope
#[derive(Parser, Debug)]
#[command(name = "gradebridge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, value_parser = output::format_parser(), default_value = "csv")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Log progress of each conversion stage
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Print lots of debugging statements
    #[arg(long, short, global = true)]
    pub debug: bool,

    /// Log level or filter directive (e.g. `trace` or `gradebridge_core=debug`)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Conversion settings file (TOML)
    #[arg(long, global = true, env = CONFIG_ENV_VAR)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge a WebAssign GradeBook with an NYU Classes gradebook template
    ///
    /// The first file is a WebAssign GradeBook downloaded as tab-delimited
    /// text (tick "email address" so students can also be matched by
    /// NetID). The second is the CSV template from NYU Classes "Import
    /// Grades". The result is written to `WebAssign_<date>.csv` unless
    /// `-o` says otherwise; `-o -` writes to standard output.
    Wa2nyuc(Wa2nyucArgs),

    /// Extract the assignment schedule from a saved WebAssign ClassView
    /// page as announcement CSV
    Wacv2csv(Wacv2csvArgs),

    /// Convert an NYU Classes roster to a Gradescope roster
    Nyuc2gs(Nyuc2gsArgs),

    /// List the assignment categories and weights of a WebAssign GradeBook
    Categories(CategoriesArgs),
}
