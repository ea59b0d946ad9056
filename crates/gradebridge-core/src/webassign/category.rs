//! Assignment categories and weights from the GradeBook header
//!
//! WebAssign annotates both header rows with an optional bracketed integer:
//! `Quiz [4]` is a category holding four assignments and `20% [1]` is a
//! weight of one fifth with the lowest score dropped.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::error::Result;
use crate::pattern;
use crate::table::{Cell, Table};

static ANNOTATED_RE: OnceLock<Regex> = OnceLock::new();
const ANNOTATED_PATTERN: &str = r"^(?P<primary>.*?)(?:\s*\[(?P<secondary>\d+)\])?\s*$";

/// Split `VALUE [N]` into `VALUE` and `Some(N)`.
///
/// A missing or non-numeric annotation yields `None`.
pub fn parse_annotated(raw: &str) -> (String, Option<u32>) {
    let trimmed = raw.trim();
    let caps =
        pattern::cached(&ANNOTATED_RE, ANNOTATED_PATTERN).and_then(|re| re.captures(trimmed));
    match caps {
        Some(caps) => {
            let primary = caps
                .name("primary")
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default();
            let secondary = caps
                .name("secondary")
                .and_then(|m| m.as_str().parse::<u32>().ok());
            (primary, secondary)
        }
        None => (trimmed.to_string(), None),
    }
}

/// Parse a weight into a fraction of the final grade.
///
/// `20%` is 0.2. A bare number above 1 is read as a percentage (`100` is
/// 1.0), otherwise as a fraction (`0.25`).
pub fn parse_weight(primary: &str) -> Option<f64> {
    let primary = primary.trim();
    let (number, percent) = match primary.strip_suffix('%') {
        Some(n) => (n.trim(), true),
        None => (primary, false),
    };
    let value = number.parse::<f64>().ok().filter(|v| v.is_finite())?;
    if percent || value > 1.0 {
        Some(value / 100.0)
    } else {
        Some(value)
    }
}

/// A grading bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    /// Header text exactly as exported; also the grade column's name
    pub label: String,
    pub name: String,
    /// Number of assignments; `None` marks an informational column
    pub count: Option<u32>,
    /// Fraction of the final grade
    pub weight: Option<f64>,
    /// Lowest scores to drop
    pub drop_count: Option<u32>,
}

impl Category {
    pub fn parse(label: &str, weight: &str) -> Self {
        let (name, count) = parse_annotated(label);
        let (weight_primary, drop_count) = parse_annotated(weight);
        Category {
            label: label.trim().to_string(),
            name,
            count,
            weight: parse_weight(&weight_primary),
            drop_count,
        }
    }

    /// Whether the category contributes to the recomputed final grade
    pub fn is_graded(&self) -> bool {
        self.count.is_some()
    }
}

/// Sum of the weights of the graded categories
pub fn graded_weight_sum(categories: &[Category]) -> f64 {
    categories
        .iter()
        .filter(|c| c.is_graded())
        .filter_map(|c| c.weight)
        .sum()
}

/// One row per category: label, name, count, weight, drop count, graded
pub fn categories_table(categories: &[Category]) -> Result<Table> {
    let columns = ["label", "name", "count", "weight", "drop_count", "graded"];
    let mut table = Table::new(columns.iter().map(|c| c.to_string()).collect());
    let optional = |v: Option<f64>| v.map_or(Cell::Empty, Cell::Number);
    for category in categories {
        table.push_row(vec![
            Cell::Text(category.label.clone()),
            Cell::Text(category.name.clone()),
            optional(category.count.map(f64::from)),
            optional(category.weight),
            optional(category.drop_count.map(f64::from)),
            Cell::Text(category.is_graded().to_string()),
        ])?;
    }
    Ok(table)
}
