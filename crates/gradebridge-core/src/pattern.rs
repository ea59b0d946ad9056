//! Lazily compiled regular expressions

use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

/// Compile `pattern` on first use and cache it in `cell`.
///
/// Returns `None` (after logging) if the pattern does not compile.
pub fn cached(cell: &'static OnceLock<Regex>, pattern: &str) -> Option<&'static Regex> {
    if let Some(re) = cell.get() {
        return Some(re);
    }
    match Regex::new(pattern) {
        Ok(re) => Some(cell.get_or_init(|| re)),
        Err(e) => {
            warn!(error = %e, pattern, "failed to compile regex");
            None
        }
    }
}
