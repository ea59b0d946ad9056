//! WebAssign exports: the tab-delimited GradeBook and the ClassView page

pub mod category;
pub mod classview;
pub mod gradebook;
pub mod pipeline;
pub mod recalc;

pub use category::{categories_table, Category};
pub use classview::{assignments_from_html, write_announcements, Assignment};
pub use gradebook::WebAssignGradebook;
pub use pipeline::GradePipeline;
