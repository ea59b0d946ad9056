//! Arguments of each subcommand

use std::path::PathBuf;

use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::Args;

use gradebridge_core::config::AmbiguityPolicy;

fn ambiguity_parser() -> impl TypedValueParser<Value = AmbiguityPolicy> {
    PossibleValuesParser::new(["first", "error"]).try_map(|s| s.parse::<AmbiguityPolicy>())
}

#[derive(Args, Debug, Clone)]
pub struct Wa2nyucArgs {
    /// WebAssign GradeBook, tab-delimited
    #[arg(value_name = "WEBASSIGN_GRADEBOOK_FILE")]
    pub webassign: PathBuf,

    /// NYU Classes gradebook template, CSV
    #[arg(value_name = "NYU_CLASSES_GRADEBOOK_FILE")]
    pub nyu_classes: PathBuf,

    /// Output file (`-` for standard output)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Give full credit for any positive score in this column (repeatable)
    #[arg(long, value_name = "COLUMN")]
    pub roundup: Vec<String>,

    /// Recompute Final from the category weights
    #[arg(long)]
    pub recalculate: bool,

    /// Add a copy of Final named after the GradeBook export date
    #[arg(long)]
    pub dated_column: bool,

    /// Leave out roster students with no GradeBook row
    #[arg(long)]
    pub drop_unmatched: bool,

    /// What to do when several GradeBook rows match one student
    #[arg(long, value_parser = ambiguity_parser())]
    pub on_ambiguous: Option<AmbiguityPolicy>,

    /// Fail when the graded category weights do not sum to 1
    #[arg(long)]
    pub strict_weights: bool,
}

#[derive(Args, Debug, Clone)]
pub struct Wacv2csvArgs {
    /// Saved ClassView page (HTML)
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output file (`-` for standard output, the default)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct Nyuc2gsArgs {
    /// NYU Classes gradebook template, CSV
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output file (`-` for standard output, the default)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Domain of student email addresses
    #[arg(long)]
    pub email_domain: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct CategoriesArgs {
    /// WebAssign GradeBook, tab-delimited
    #[arg(value_name = "WEBASSIGN_GRADEBOOK_FILE")]
    pub webassign: PathBuf,
}
