//! CLI commands for gradebridge

pub mod categories;
pub mod dispatch;
pub mod nyuc2gs;
pub mod wa2nyuc;
pub mod wacv2csv;
