//! Database directory error types
//!
//! Error codes:
//! - TABLE_EXISTS: a table with that name is already registered
//! - TABLE_NOT_FOUND: no table with that name
//! - DATABASE_IO_ERROR: reading or writing the database file failed
//! - DATABASE_JSON_ERROR: the database file is not valid JSON
//! - MALFORMED_DATABASE: the top-level tree is not a name→table mapping, or a
//!   table is stored under a key other than its own name
//! - table errors keep their own codes

use thiserror::Error;

use crate::table::TableError;

/// Result type for database directory operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Database directory errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatabaseError {
    #[error("Table '{0}' already exists")]
    TableExists(String),

    #[error("Table '{0}' not found")]
    TableNotFound(String),

    #[error("Table '{table}': {source}")]
    Table {
        table: String,
        #[source]
        source: TableError,
    },

    #[error("I/O error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Malformed database: {0}")]
    Malformed(String),
}

impl DatabaseError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            DatabaseError::TableExists(_) => "TABLE_EXISTS",
            DatabaseError::TableNotFound(_) => "TABLE_NOT_FOUND",
            DatabaseError::Table { source, .. } => source.code(),
            DatabaseError::Io(_) => "DATABASE_IO_ERROR",
            DatabaseError::Json(_) => "DATABASE_JSON_ERROR",
            DatabaseError::Malformed(_) => "MALFORMED_DATABASE",
        }
    }

    /// Wraps a table error with the name of the table it came from
    pub fn in_table(table: impl Into<String>, source: TableError) -> Self {
        DatabaseError::Table {
            table: table.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for DatabaseError {
    fn from(e: serde_json::Error) -> Self {
        DatabaseError::Json(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DatabaseError::TableExists("t".into()).code(), "TABLE_EXISTS");
        assert_eq!(DatabaseError::TableNotFound("t".into()).code(), "TABLE_NOT_FOUND");
        assert_eq!(DatabaseError::Io("x".into()).code(), "DATABASE_IO_ERROR");
        assert_eq!(DatabaseError::Json("x".into()).code(), "DATABASE_JSON_ERROR");
    }

    #[test]
    fn test_table_error_keeps_code_and_name() {
        let err = DatabaseError::in_table(
            "people",
            TableError::IndexOutOfRange { index: 3, len: 1 },
        );
        assert_eq!(err.code(), "INDEX_OUT_OF_RANGE");
        assert!(err.to_string().starts_with("Table 'people'"));
    }
}
