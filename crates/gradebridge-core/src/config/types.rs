//! Configuration type definitions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bail_invalid;
use crate::error::GradebridgeError;

/// Default tolerance when checking that graded weights sum to 1
pub const DEFAULT_WEIGHT_TOLERANCE: f64 = 1e-6;

/// Default domain for generated roster email addresses
pub const DEFAULT_EMAIL_DOMAIN: &str = "nyu.edu";

/// Conversion configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// GradeBook transforms
    #[serde(default)]
    pub webassign: WebAssignConfig,

    /// Roster merge behavior
    #[serde(default)]
    pub merge: MergeConfig,

    /// Gradescope roster export
    #[serde(default)]
    pub gradescope: GradescopeConfig,
}

/// Transforms applied to a WebAssign GradeBook before merging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebAssignConfig {
    /// Columns to convert to all-or-nothing credit
    #[serde(default)]
    pub roundup: Vec<String>,

    /// Recompute `Final` from the category weights
    #[serde(default)]
    pub recalculate: bool,

    /// Add a copy of `Final` named after the export date
    #[serde(default)]
    pub dated_column: bool,

    /// Fail instead of warning when graded weights do not sum to 1
    #[serde(default)]
    pub strict_weights: bool,

    #[serde(default = "default_weight_tolerance")]
    pub weight_tolerance: f64,
}

/// Roster merge configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Leave roster students with no WebAssign match out of the output
    #[serde(default)]
    pub drop_unmatched: bool,

    /// What to do when several GradeBook rows match one student
    #[serde(default)]
    pub on_ambiguous: AmbiguityPolicy,
}

/// Gradescope roster configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradescopeConfig {
    /// Domain appended to the NetID to form the email address
    #[serde(default = "default_email_domain")]
    pub email_domain: String,
}

/// Resolution of one roster row matching several GradeBook rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmbiguityPolicy {
    /// Keep the first matching row in GradeBook order and warn
    #[default]
    First,
    /// Abort the conversion
    Error,
}

impl FromStr for AmbiguityPolicy {
    type Err = GradebridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first" => Ok(AmbiguityPolicy::First),
            "error" => Ok(AmbiguityPolicy::Error),
            other => bail_invalid!("ambiguity policy (expected first or error)", other),
        }
    }
}

impl fmt::Display for AmbiguityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmbiguityPolicy::First => write!(f, "first"),
            AmbiguityPolicy::Error => write!(f, "error"),
        }
    }
}

impl Default for WebAssignConfig {
    fn default() -> Self {
        Self {
            roundup: Vec::new(),
            recalculate: false,
            dated_column: false,
            strict_weights: false,
            weight_tolerance: default_weight_tolerance(),
        }
    }
}

impl Default for GradescopeConfig {
    fn default() -> Self {
        Self {
            email_domain: default_email_domain(),
        }
    }
}

fn default_weight_tolerance() -> f64 {
    DEFAULT_WEIGHT_TOLERANCE
}

fn default_email_domain() -> String {
    DEFAULT_EMAIL_DOMAIN.to_string()
}
