//! Conversion configuration
//!
//! Stored as TOML, e.g. `gradebridge.toml`:
//!
//! ```toml
//! [webassign]
//! roundup = ["Quiz [1]"]
//! recalculate = true
//!
//! [merge]
//! on_ambiguous = "error"
//! ```

pub mod types;

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{GradebridgeError, Result};

pub use types::{
    AmbiguityPolicy, ConvertConfig, GradescopeConfig, MergeConfig, WebAssignConfig,
    DEFAULT_EMAIL_DOMAIN, DEFAULT_WEIGHT_TOLERANCE,
};

/// Environment variable naming a configuration file
pub const CONFIG_ENV_VAR: &str = "GRADEBRIDGE_CONFIG";

impl ConvertConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(GradebridgeError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        let config: ConvertConfig = toml::from_str(&content)?;
        if config.webassign.weight_tolerance < 0.0 {
            return Err(GradebridgeError::invalid_value(
                "weight_tolerance",
                config.webassign.weight_tolerance,
            ));
        }
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GradebridgeError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }
}
