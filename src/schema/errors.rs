//! Schema error types
//!
//! Error codes:
//! - MISSING_FIELD: data lacks a declared field
//! - TYPE_MISMATCH: value does not satisfy the field's type
//! - UNEXPECTED_FIELD: data carries an undeclared field (strict validation)
//! - UNKNOWN_FIELD_TYPE: type tag outside the six supported tags
//! - DUPLICATE_FIELD_NAME: two fields share a name
//! - MALFORMED_SCHEMA: persisted schema tree has the wrong shape

use thiserror::Error;

use crate::value::DataType;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Schema errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("Field '{0}' is missing from the data")]
    MissingField(String),

    #[error("Field '{field}' must be of type {expected}")]
    TypeMismatch { field: String, expected: DataType },

    #[error("Field '{0}' is not declared in the schema")]
    UnexpectedField(String),

    #[error("Unknown field type: {0}")]
    UnknownFieldType(String),

    #[error("Duplicate field name: {0}")]
    DuplicateFieldName(String),

    #[error("Malformed schema: {0}")]
    Malformed(String),
}

impl SchemaError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::MissingField(_) => "MISSING_FIELD",
            SchemaError::TypeMismatch { .. } => "TYPE_MISMATCH",
            SchemaError::UnexpectedField(_) => "UNEXPECTED_FIELD",
            SchemaError::UnknownFieldType(_) => "UNKNOWN_FIELD_TYPE",
            SchemaError::DuplicateFieldName(_) => "DUPLICATE_FIELD_NAME",
            SchemaError::Malformed(_) => "MALFORMED_SCHEMA",
        }
    }

    /// Returns the field the error refers to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            SchemaError::MissingField(field)
            | SchemaError::TypeMismatch { field, .. }
            | SchemaError::UnexpectedField(field)
            | SchemaError::DuplicateFieldName(field) => Some(field),
            SchemaError::UnknownFieldType(_) | SchemaError::Malformed(_) => None,
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        SchemaError::Malformed(reason.into())
    }
}
