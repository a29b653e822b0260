//! Database directory
//!
//! A thin name→table registry over the table core, plus whole-database
//! persistence as a single JSON document:
//!
//! ```text
//! { "<table name>": <table tree>, ... }
//! ```
//!
//! Tables keep their creation order, in memory and on disk.

mod catalog;
mod errors;

pub use catalog::Database;
pub use errors::{DatabaseError, DatabaseResult};
