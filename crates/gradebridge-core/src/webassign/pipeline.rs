//! Fixed-order grade transforms applied before a merge
//!
//! Stages always run in this order, each one optional:
//! 1. roundup of the listed columns, in list order
//! 2. weight check and recalculation of `Final`
//! 3. dated copy of `Final`

use std::time::Instant;

use tracing::info;

use crate::config::WebAssignConfig;
use crate::error::Result;
use crate::trace_time;
use crate::webassign::gradebook::WebAssignGradebook;
use crate::webassign::recalc::{add_dated_column, check_weights, recalculate, roundup};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradePipeline {
    pub roundup_columns: Vec<String>,
    pub recalculate: bool,
    pub dated_column: bool,
    pub strict_weights: bool,
    pub weight_tolerance: f64,
}

impl GradePipeline {
    pub fn from_config(config: &WebAssignConfig) -> Self {
        Self {
            roundup_columns: config.roundup.clone(),
            recalculate: config.recalculate,
            dated_column: config.dated_column,
            strict_weights: config.strict_weights,
            weight_tolerance: config.weight_tolerance,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.roundup_columns.is_empty() && !self.recalculate && !self.dated_column
    }

    /// Run every enabled stage against the gradebook's grades.
    pub fn apply(&self, gradebook: &mut WebAssignGradebook) -> Result<()> {
        let start = Instant::now();

        for column in &self.roundup_columns {
            roundup(&mut gradebook.grades, column)?;
        }

        if self.recalculate {
            check_weights(
                &gradebook.categories,
                self.weight_tolerance,
                self.strict_weights,
            )?;
            recalculate(&mut gradebook.grades, &gradebook.categories)?;
        }

        if self.dated_column {
            let name = add_dated_column(&mut gradebook.grades, &gradebook.date)?;
            info!(column = %name, "added dated import column");
        }

        trace_time!(start, "grade_pipeline");
        Ok(())
    }
}
