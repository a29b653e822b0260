//! Schema subsystem
//!
//! A schema is an ordered list of typed fields. Order is significant: it is
//! the column order of the table and of every stored row.
//!
//! # Rules
//!
//! - Field names are unique within a schema
//! - Every declared field must be present and correctly typed on write
//! - No coercion: an integer never satisfies a float field and vice versa
//! - Types are persisted as symbolic tags, never as raw type handles

mod errors;
mod types;
mod validator;

pub use errors::{SchemaError, SchemaResult};
pub use types::{ExtraFields, Field, Schema};
