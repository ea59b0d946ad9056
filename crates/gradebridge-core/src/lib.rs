//! Gradebridge Core Library
//!
//! Gradebook model, platform export parsers and the roster merge used by
//! the `gradebridge` converters.

pub mod config;
pub mod error;
pub mod gradescope;
pub mod logging;
pub mod nyuclasses;
pub mod output;
pub mod pattern;
pub mod table;
pub mod tabular;
pub mod webassign;
