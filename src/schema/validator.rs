//! Validation of candidate row data against a schema
//!
//! Semantics:
//! - Fields are checked in schema order; the first failure wins
//! - A missing field fails before its type is considered
//! - The runtime variant must match the declared type exactly
//! - Floats must be finite, since JSON cannot persist NaN or infinities
//! - Lenient validation ignores undeclared keys, strict validation rejects them
//!
//! Validation never mutates the data.

use super::errors::{SchemaError, SchemaResult};
use super::types::{Field, Schema};
use crate::table::RowData;
use crate::value::Value;

impl Field {
    /// Returns true iff `value` is of this field's declared type.
    pub fn validate(&self, value: &Value) -> bool {
        match value {
            Value::Float(v) if !v.is_finite() => false,
            _ => value.data_type() == self.data_type(),
        }
    }
}

impl Schema {
    /// Checks that every declared field is present and correctly typed.
    /// Undeclared keys in `data` are not an error.
    ///
    /// # Errors
    ///
    /// - `MissingField` for the first declared field absent from `data`
    /// - `TypeMismatch` for the first declared field holding the wrong variant
    pub fn validate(&self, data: &RowData) -> SchemaResult<()> {
        for field in self.fields() {
            let value = data
                .get(field.name())
                .ok_or_else(|| SchemaError::MissingField(field.name().to_owned()))?;

            if !field.validate(value) {
                return Err(SchemaError::TypeMismatch {
                    field: field.name().to_owned(),
                    expected: field.data_type(),
                });
            }
        }
        Ok(())
    }

    /// Like `validate`, but also fails with `UnexpectedField` on the first
    /// key that the schema does not declare.
    pub fn validate_strict(&self, data: &RowData) -> SchemaResult<()> {
        self.validate(data)?;
        match self.undeclared_keys(data).next() {
            Some(key) => Err(SchemaError::UnexpectedField(key.to_owned())),
            None => Ok(()),
        }
    }

    /// Keys of `data` that the schema does not declare, in data order
    pub fn undeclared_keys<'a>(&'a self, data: &'a RowData) -> impl Iterator<Item = &'a str> {
        data.keys()
            .map(String::as_str)
            .filter(move |key| !self.has_field(key))
    }
}
