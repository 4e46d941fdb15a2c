//! # Error Types
//!
//! Domain-specific error types for stockbook-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockbook-core errors (this file)                                     │
//! │  └── ValidationError  - Input validation failures (client fault)       │
//! │                                                                         │
//! │  stockbook-db errors (separate crate)                                  │
//! │  └── DbError          - Storage/transaction failures (server fault)    │
//! │                                                                         │
//! │  HTTP API errors (in apps/server)                                      │
//! │  └── ApiError         - Status-code mapping at the boundary only       │
//! │                                                                         │
//! │  Flow: ValidationError ─► ApiError (400)                               │
//! │        DbError         ─► ApiError (500)                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note that "not found" is NOT in this taxonomy: a missing product or stock
//! row is a normal result value (`Option`/zero), never an error.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field names, offending values)
//! 3. Errors are enum variants, never String
//! 4. Validation errors are raised before any storage side effect

use thiserror::Error;

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements. They are
/// raised before any transaction opens, so a request that fails validation
/// has no storage side effects at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be a positive integer.
    #[error("{field} must be a positive integer")]
    MustBePositive { field: String },

    /// Value must be zero or a positive integer.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Transfer endpoints must differ.
    #[error("from_location and to_location must differ")]
    SameLocation,

    /// A count was submitted with no lines.
    #[error("count must contain at least one line")]
    EmptyCount,

    /// A specific count line failed validation.
    ///
    /// ## All-Or-Nothing
    /// The first bad line aborts the entire count; no header and no lines
    /// are persisted.
    #[error("count line {index}: {source}")]
    InvalidCountLine {
        index: usize,
        #[source]
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Wraps a line-level error with its position in the count.
    pub fn count_line(index: usize, source: ValidationError) -> Self {
        ValidationError::InvalidCountLine {
            index,
            source: Box::new(source),
        }
    }
}

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::required("barcode");
        assert_eq!(err.to_string(), "barcode is required");

        let err = ValidationError::MustBePositive {
            field: "qty".to_string(),
        };
        assert_eq!(err.to_string(), "qty must be a positive integer");

        assert_eq!(
            ValidationError::SameLocation.to_string(),
            "from_location and to_location must differ"
        );
    }

    #[test]
    fn test_count_line_error_carries_index() {
        let err = ValidationError::count_line(2, ValidationError::required("barcode"));
        assert_eq!(err.to_string(), "count line 2: barcode is required");
    }
}
