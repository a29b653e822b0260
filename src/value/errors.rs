//! Value error types
//!
//! Error codes:
//! - INVALID_ARGUMENT: malformed custom value construction
//! - INCOMPATIBLE_VALUE: portable form does not fit the declared type
//! - VALUE_IO_ERROR: picture file could not be read or written

use thiserror::Error;

use super::types::DataType;

/// Result type for value operations
pub type ValueResult<T> = Result<T, ValueError>;

/// Errors raised while constructing, encoding or decoding values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Expected {expected} value, found {found}")]
    Incompatible {
        expected: DataType,
        found: &'static str,
    },

    #[error("I/O error: {0}")]
    Io(String),
}

impl ValueError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ValueError::InvalidArgument(_) => "INVALID_ARGUMENT",
            ValueError::Incompatible { .. } => "INCOMPATIBLE_VALUE",
            ValueError::Io(_) => "VALUE_IO_ERROR",
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ValueError::InvalidArgument(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ValueError::invalid("x").code(), "INVALID_ARGUMENT");
        assert_eq!(
            ValueError::Incompatible {
                expected: DataType::Int,
                found: "string"
            }
            .code(),
            "INCOMPATIBLE_VALUE"
        );
        assert_eq!(ValueError::Io("gone".into()).code(), "VALUE_IO_ERROR");
    }

    #[test]
    fn test_incompatible_display_names_tag() {
        let err = ValueError::Incompatible {
            expected: DataType::RealInterval,
            found: "string",
        };
        let display = err.to_string();
        assert!(display.contains("realInvl"));
        assert!(display.contains("string"));
    }
}
