//! tablestore - an in-memory table store with typed, schema-validated rows
//!
//! Tables are named collections of rows. Every row is checked against its
//! table's schema before it is stored, and a whole database round-trips
//! through a single JSON document.

pub mod cli;
pub mod database;
pub mod observability;
pub mod schema;
pub mod table;
pub mod value;
