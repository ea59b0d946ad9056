use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Helper macro for logging elapsed time at trace level.
///
/// Usage:
/// ```rust,ignore
/// let start = Instant::now();
/// // ... some work ...
/// trace_time!(start, "parse_gradebook");
/// // Or with additional fields:
/// trace_time!(start, "merge", rows = table.len());
/// ```
#[macro_export]
macro_rules! trace_time {
    ($start:expr, $name:expr) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $name);
    };
    ($start:expr, $name:expr $(, $field:ident = $value:expr)*) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $($field = $value),*, $name);
    };
}

/// Pick the filter directive implied by the CLI flags.
///
/// An explicit `--log-level` wins; otherwise `--debug` beats `--verbose`,
/// and the default only lets warnings through.
pub fn level_directive(verbose: bool, debug: bool, log_level: Option<&str>) -> String {
    match (debug, verbose, log_level) {
        (_, _, Some(level)) if level.contains('=') => level.to_string(),
        (_, _, Some(level)) => format!("gradebridge={level},gradebridge_core={level}"),
        (true, _, None) => "gradebridge=debug,gradebridge_core=debug".to_string(),
        (false, true, None) => "gradebridge=info,gradebridge_core=info".to_string(),
        (false, false, None) => "gradebridge=warn,gradebridge_core=warn".to_string(),
    }
}

/// Initialize structured logging based on CLI arguments
pub fn init_tracing(
    verbose: bool,
    debug: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let directive = level_directive(verbose, debug, log_level);

    // RUST_LOG or GRADEBRIDGE_LOG override the flags
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("GRADEBRIDGE_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(directive));

    let registry = tracing_subscriber::registry().with(filter);

    if log_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}
