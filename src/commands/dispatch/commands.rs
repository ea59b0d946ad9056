//! Command implementations for all gradebridge commands

use crate::cli::Commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use crate::commands::{categories, nyuc2gs, wa2nyuc, wacv2csv};
use gradebridge_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Wa2nyuc(args) => wa2nyuc::execute(ctx, args),
            Commands::Wacv2csv(args) => wacv2csv::execute(ctx, args),
            Commands::Nyuc2gs(args) => nyuc2gs::execute(ctx, args),
            Commands::Categories(args) => categories::execute(ctx, args),
        }
    }
}
