//! NYU Classes gradebook import

pub mod merge;
pub mod roster;

pub use merge::{merge, JoinKey, MergeOptions, MergeReport};
pub use roster::ClassesRoster;
