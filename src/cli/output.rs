pub use gradebridge_core::output::OutputFormat;

use clap::builder::{PossibleValuesParser, TypedValueParser};

/// Parser for `--format`, listing the accepted values in `--help`
pub fn format_parser() -> impl TypedValueParser<Value = OutputFormat> {
    PossibleValuesParser::new(["csv", "json"]).try_map(|s| s.parse::<OutputFormat>())
}
