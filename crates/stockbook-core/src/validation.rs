//! # Validation Module
//!
//! Input validation for the three mutating operations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Type checks: qty must be an integer, action must be IN/OUT       │
//! │  └── Rejected before a handler even runs                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (pure functions)                                 │
//! │  ├── Business rules: positive qty, distinct locations, ...             │
//! │  └── Runs BEFORE any transaction opens - zero storage side effects     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockbook_core::validation::validate_move;
//! use stockbook_core::MoveAction;
//!
//! validate_move(MoveAction::In, "4006381333931", 10, "MAIN").unwrap();
//! assert!(validate_move(MoveAction::Out, "", 10, "MAIN").is_err());
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::types::{CountLineInput, MoveAction};
use crate::MAX_CODE_LENGTH;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a code-like field (barcode or location name).
///
/// ## Rules
/// - Must not be empty or whitespace-only
/// - Must be at most [`MAX_CODE_LENGTH`] characters
fn validate_code(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.len() > MAX_CODE_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_CODE_LENGTH,
        });
    }

    Ok(())
}

/// Validates a movement/transfer quantity (must be strictly positive).
fn validate_positive_qty(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "qty".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Operation Validators
// =============================================================================

/// Validates a Move operation (receipt or issue).
///
/// ## Rules
/// - barcode and location non-empty
/// - qty a positive integer
///
/// The action itself needs no check here: [`MoveAction`] is a closed enum,
/// so an invalid action never survives deserialization.
pub fn validate_move(
    _action: MoveAction,
    barcode: &str,
    qty: i64,
    location: &str,
) -> ValidationResult<()> {
    validate_code("barcode", barcode)?;
    validate_code("location", location)?;
    validate_positive_qty(qty)?;
    Ok(())
}

/// Validates a Transfer operation.
///
/// ## Rules
/// - all fields non-empty
/// - qty a positive integer
/// - source and destination must differ
pub fn validate_transfer(
    barcode: &str,
    qty: i64,
    from_location: &str,
    to_location: &str,
) -> ValidationResult<()> {
    validate_code("barcode", barcode)?;
    validate_code("from_location", from_location)?;
    validate_code("to_location", to_location)?;
    validate_positive_qty(qty)?;

    if from_location.trim() == to_location.trim() {
        return Err(ValidationError::SameLocation);
    }

    Ok(())
}

/// Validates a Count operation (header + all lines).
///
/// ## All-Or-Nothing
/// Lines are checked in input order; the FIRST invalid line aborts the whole
/// count. The caller must not persist anything for a count that fails here.
///
/// ## Rules
/// - location non-empty
/// - at least one line
/// - each line: non-empty barcode, qty zero or positive
pub fn validate_count(location: &str, lines: &[CountLineInput]) -> ValidationResult<()> {
    validate_code("location", location)?;

    if lines.is_empty() {
        return Err(ValidationError::EmptyCount);
    }

    for (index, line) in lines.iter().enumerate() {
        validate_code("barcode", &line.barcode)
            .map_err(|e| ValidationError::count_line(index, e))?;

        if line.qty < 0 {
            return Err(ValidationError::count_line(
                index,
                ValidationError::MustNotBeNegative {
                    field: "qty".to_string(),
                },
            ));
        }
    }

    Ok(())
}

/// Validates a product upsert (barcode + name required, sku optional).
pub fn validate_product(barcode: &str, name: &str) -> ValidationResult<()> {
    validate_code("barcode", barcode)?;

    if name.trim().is_empty() {
        return Err(ValidationError::required("name"));
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(barcode: &str, qty: i64) -> CountLineInput {
        CountLineInput {
            barcode: barcode.to_string(),
            qty,
        }
    }

    #[test]
    fn test_validate_move() {
        assert!(validate_move(MoveAction::In, "123", 1, "A").is_ok());
        assert!(validate_move(MoveAction::Out, "123", 999, "A").is_ok());

        assert!(validate_move(MoveAction::In, "", 1, "A").is_err());
        assert!(validate_move(MoveAction::In, "   ", 1, "A").is_err());
        assert!(validate_move(MoveAction::In, "123", 1, "").is_err());
        assert!(validate_move(MoveAction::In, "123", 0, "A").is_err());
        assert!(validate_move(MoveAction::In, "123", -5, "A").is_err());
        assert!(validate_move(MoveAction::In, &"9".repeat(65), 1, "A").is_err());
    }

    #[test]
    fn test_validate_transfer() {
        assert!(validate_transfer("123", 5, "A", "B").is_ok());

        assert_eq!(
            validate_transfer("123", 5, "A", "A"),
            Err(ValidationError::SameLocation)
        );
        // Whitespace does not make locations distinct
        assert_eq!(
            validate_transfer("123", 5, "A", " A "),
            Err(ValidationError::SameLocation)
        );
        assert!(validate_transfer("", 5, "A", "B").is_err());
        assert!(validate_transfer("123", 0, "A", "B").is_err());
        assert!(validate_transfer("123", 5, "", "B").is_err());
        assert!(validate_transfer("123", 5, "A", "").is_err());
    }

    #[test]
    fn test_validate_count() {
        assert!(validate_count("A", &[line("123", 0), line("456", 7)]).is_ok());

        assert!(validate_count("", &[line("123", 1)]).is_err());
        assert_eq!(validate_count("A", &[]), Err(ValidationError::EmptyCount));
    }

    #[test]
    fn test_validate_count_reports_first_bad_line() {
        let err = validate_count("A", &[line("123", 1), line("", 2), line("456", -1)])
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidCountLine { index: 1, .. }
        ));

        let err = validate_count("A", &[line("123", 1), line("456", -1)]).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidCountLine { index: 1, .. }
        ));
    }

    #[test]
    fn test_validate_product() {
        assert!(validate_product("123", "Widget").is_ok());
        assert!(validate_product("", "Widget").is_err());
        assert!(validate_product("123", "").is_err());
        assert!(validate_product("123", "  ").is_err());
    }
}
