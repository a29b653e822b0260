//! Table error types
//!
//! Error codes:
//! - INDEX_OUT_OF_RANGE: row index past the end of the table
//! - COLUMN_COUNT_MISMATCH: new column order has the wrong length
//! - COLUMN_SET_MISMATCH: new column order is not a permutation of the columns
//! - DECODE_FAILED: a persisted cell does not decode
//! - MALFORMED_TABLE: persisted table tree has the wrong shape
//! - schema errors keep their own codes

use thiserror::Error;

use crate::schema::SchemaError;
use crate::value::ValueError;

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;

/// Table errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Row index {index} out of range for table with {len} rows")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Expected {expected} column names, got {found}")]
    ColumnCountMismatch { expected: usize, found: usize },

    #[error("New column order must name every current column exactly once: {0}")]
    ColumnSetMismatch(String),

    #[error("Cannot decode field '{field}': {source}")]
    Decode {
        field: String,
        #[source]
        source: ValueError,
    },

    #[error("Malformed table: {0}")]
    Malformed(String),
}

impl TableError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            TableError::Schema(e) => e.code(),
            TableError::IndexOutOfRange { .. } => "INDEX_OUT_OF_RANGE",
            TableError::ColumnCountMismatch { .. } => "COLUMN_COUNT_MISMATCH",
            TableError::ColumnSetMismatch(_) => "COLUMN_SET_MISMATCH",
            TableError::Decode { .. } => "DECODE_FAILED",
            TableError::Malformed(_) => "MALFORMED_TABLE",
        }
    }

    pub(crate) fn decode(field: impl Into<String>, source: ValueError) -> Self {
        TableError::Decode {
            field: field.into(),
            source,
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        TableError::Malformed(reason.into())
    }
}
