//! # Domain Types
//!
//! Core domain types used throughout Stockbook.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  LEDGER (append-only, source of truth)                                 │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Movement     │   │    Transfer     │   │  CountSession   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  action IN/OUT  │   │  from_location  │   │  location       │       │
//! │  │  barcode, qty   │   │  to_location    │   │  + CountLine[]  │       │
//! │  │  location       │   │  barcode, qty   │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  PROJECTION (materialized fold over the ledger)                        │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │   StockLevel    │   │    Product      │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  (barcode,      │   │  barcode (PK)   │  (descriptive only, not    │
//! │  │   location)→qty │   │  name, sku?     │   part of quantity math)   │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ledger records are immutable once written. `StockLevel.qty` always equals
//! the algebraic sum of the deltas the ledger implies for that
//! (barcode, location) pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Move Action
// =============================================================================

/// Direction of a stock movement.
///
/// Serialized as `"IN"` / `"OUT"` on the wire and in the `movements` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum MoveAction {
    /// Receipt into a location (+qty).
    In,
    /// Issue out of a location (-qty).
    Out,
}

impl MoveAction {
    /// Signed delta this action applies to a stock level for `qty` units.
    #[inline]
    pub const fn delta(&self, qty: i64) -> i64 {
        match self {
            MoveAction::In => qty,
            MoveAction::Out => -qty,
        }
    }

    /// Wire/storage spelling of the action.
    pub const fn as_str(&self) -> &'static str {
        match self {
            MoveAction::In => "IN",
            MoveAction::Out => "OUT",
        }
    }
}

impl std::fmt::Display for MoveAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A barcoded product.
///
/// Purely descriptive: products are looked up by barcode but take no part in
/// quantity invariants. Created (or fully replaced) by the upsert seed call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Barcode - the business key (EAN-13, UPC-A, etc.).
    pub barcode: String,

    /// Display name.
    pub name: String,

    /// Optional Stock Keeping Unit.
    pub sku: Option<String>,

    /// When the product was first created.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Stock Level (the projection)
// =============================================================================

/// Materialized current quantity for one (barcode, location) pair.
///
/// Rows are created lazily on the first movement affecting the pair and are
/// never deleted. The quantity is maintained incrementally as a fold over the
/// ledger; it may be negative (issuing from an existing row does not floor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StockLevel {
    pub barcode: String,
    pub location: String,
    pub qty: i64,
}

// =============================================================================
// Ledger Records
// =============================================================================

/// One receipt/issue entry in the movement ledger. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Movement {
    pub id: i64,
    pub action: MoveAction,
    pub barcode: String,
    /// Always positive; the sign lives in `action`.
    pub qty: i64,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

/// One inter-location transfer entry. Append-only.
///
/// Invariant: `from_location != to_location` (enforced by validation before
/// the record is ever written).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Transfer {
    pub id: i64,
    pub barcode: String,
    pub qty: i64,
    pub from_location: String,
    pub to_location: String,
    pub created_at: DateTime<Utc>,
}

/// Header of a physical count session.
///
/// Created atomically with all of its [`CountLine`]s. Deleting a session
/// cascades to its lines only; stock truth is unaffected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CountSession {
    pub id: i64,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

/// One counted (barcode, qty) pair within a session. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CountLine {
    pub id: i64,
    pub count_id: i64,
    pub barcode: String,
    /// Non-negative: a count states what is on the shelf, not a delta.
    pub qty: i64,
}

// =============================================================================
// Operation Inputs
// =============================================================================

/// One line of a count as submitted by the caller (no ids yet).
///
/// Lines are an *ordered* sequence: when the apply-count policy is enabled,
/// each line's corrective delta is computed against the level left behind by
/// the previous line, so later lines for the same barcode win.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountLineInput {
    pub barcode: String,
    pub qty: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_action_delta() {
        assert_eq!(MoveAction::In.delta(10), 10);
        assert_eq!(MoveAction::Out.delta(10), -10);
    }

    #[test]
    fn test_move_action_wire_format() {
        assert_eq!(serde_json::to_string(&MoveAction::In).unwrap(), "\"IN\"");
        assert_eq!(serde_json::to_string(&MoveAction::Out).unwrap(), "\"OUT\"");

        let action: MoveAction = serde_json::from_str("\"OUT\"").unwrap();
        assert_eq!(action, MoveAction::Out);

        // Anything else is rejected at the deserialization boundary
        assert!(serde_json::from_str::<MoveAction>("\"SIDEWAYS\"").is_err());
    }

    #[test]
    fn test_move_action_display() {
        assert_eq!(MoveAction::In.to_string(), "IN");
        assert_eq!(MoveAction::Out.to_string(), "OUT");
    }
}
