//! Table subsystem
//!
//! A table owns one schema and an ordered list of rows. Every mutation goes
//! through schema validation, and after every successful operation the rows
//! and the schema agree on the set and order of columns.
//!
//! Rows are addressed by position; deleting a row shifts later rows down.

mod errors;
mod row;
mod table;

pub use errors::{TableError, TableResult};
pub use row::{Row, RowData};
pub use table::Table;
