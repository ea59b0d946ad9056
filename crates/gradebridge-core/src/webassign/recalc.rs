//! Grade recalculation: all-or-nothing roundup and weighted final grades

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::bail_malformed;
use crate::error::{GradebridgeError, Result};
use crate::table::{Cell, Table};
use crate::webassign::category::{graded_weight_sum, Category};
use crate::webassign::gradebook::{FINAL_COLUMN, SOURCE_NAME};

/// Full credit
pub const FULL_CREDIT: f64 = 100.0;

/// Any positive score earns full credit, everything else earns nothing.
pub fn roundup_value(cell: &Cell) -> Cell {
    match cell.as_number() {
        Some(v) if v > 0.0 => Cell::Number(FULL_CREDIT),
        _ => Cell::Number(0.0),
    }
}

/// Apply [`roundup_value`] to every cell of `column`.
pub fn roundup(grades: &mut Table, column: &str) -> Result<()> {
    let col = grades.require_column(SOURCE_NAME, column)?;
    grades.map_column(col, roundup_value);
    debug!(column, "rounded up");
    Ok(())
}

/// Result of checking that graded weights add up to the whole grade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightCheck {
    pub sum: f64,
    pub tolerance: f64,
}

impl WeightCheck {
    pub fn new(categories: &[Category], tolerance: f64) -> Self {
        Self {
            sum: graded_weight_sum(categories),
            tolerance,
        }
    }

    pub fn is_complete(&self) -> bool {
        (self.sum - 1.0).abs() <= self.tolerance
    }
}

/// Validate the category weights.
///
/// A sum other than 1.0 is logged, or rejected when `strict` is set.
pub fn check_weights(
    categories: &[Category],
    tolerance: f64,
    strict: bool,
) -> Result<WeightCheck> {
    let check = WeightCheck::new(categories, tolerance);
    if !check.is_complete() {
        if strict {
            bail_malformed!(
                SOURCE_NAME,
                "graded category weights sum to {} instead of 1",
                check.sum
            );
        }
        warn!(sum = check.sum, "graded category weights do not sum to 1");
    }
    Ok(check)
}

/// Recompute `Final` as the weighted sum of the graded categories.
///
/// Empty cells score zero. `Final` is overwritten, or appended if absent.
pub fn recalculate(grades: &mut Table, categories: &[Category]) -> Result<()> {
    let mut terms = Vec::new();
    for category in categories.iter().filter(|c| c.is_graded()) {
        let col = grades.require_column(SOURCE_NAME, &category.label)?;
        let Some(weight) = category.weight else {
            bail_malformed!(
                SOURCE_NAME,
                "category {:?} has no usable weight",
                category.label
            );
        };
        terms.push((col, weight, category.label.as_str()));
    }

    let mut finals = Vec::with_capacity(grades.len());
    for (row_idx, row) in grades.rows().iter().enumerate() {
        let mut total = 0.0;
        for &(col, weight, label) in &terms {
            let value = match &row[col] {
                Cell::Empty => 0.0,
                Cell::Number(v) => *v,
                Cell::Text(text) => {
                    return Err(GradebridgeError::malformed(
                        SOURCE_NAME,
                        format!(
                            "non-numeric score {:?} in {:?} on data row {}",
                            text,
                            label,
                            row_idx + 1
                        ),
                    ))
                }
            };
            total += weight * value;
        }
        finals.push(Cell::Number(total));
    }

    grades.set_column(FINAL_COLUMN, finals)?;
    debug!(categories = terms.len(), "recalculated final grades");
    Ok(())
}

/// Name of the import column for an export taken at `date`
pub fn dated_column_name(date: &NaiveDateTime) -> String {
    format!("WebAssign import {}", date.format("%Y-%m-%d %H:%M:%S"))
}

/// Copy `Final` into a column named after the export date, so repeated
/// imports land in separate gradebook columns.
pub fn add_dated_column(grades: &mut Table, date: &NaiveDateTime) -> Result<String> {
    let col = grades.require_column(SOURCE_NAME, FINAL_COLUMN)?;
    let values: Vec<Cell> = grades.column_values(col).cloned().collect();
    let name = dated_column_name(date);
    grades.set_column(&name, values)?;
    Ok(name)
}
