//! # Stock Projection
//!
//! The materialized current-quantity table and the projector that maintains
//! it.
//!
//! ## The Projector
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  apply_delta(barcode, location, delta)                  │
//! │                                                                         │
//! │  Row exists?                                                            │
//! │  ├── NO  → INSERT qty = max(0, delta)   ← floors a negative first      │
//! │  │                                        write at zero                 │
//! │  └── YES → UPDATE qty = qty + delta     ← NO floor; may go negative    │
//! │                                                                         │
//! │  The asymmetry is intentional and preserved: a single OUT against an   │
//! │  absent row yields 0, but an OUT against an existing row may drive     │
//! │  the quantity below zero.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `apply_delta` takes `&mut SqliteConnection` rather than the pool: it can
//! only run inside an already-open transaction, the same one that appends
//! the corresponding ledger record. That is what keeps the projection in
//! lock-step with the ledger - the projector is never invoked standalone.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use stockbook_core::StockLevel;

// =============================================================================
// Projector
// =============================================================================

/// Applies a signed delta to the materialized level of one
/// (barcode, location) pair, returning the resulting quantity.
///
/// Must be called from within the transaction that also appends the
/// corresponding ledger record; `pub(crate)` enforces that only the ledger
/// engine can reach it.
pub(crate) async fn apply_delta(
    conn: &mut SqliteConnection,
    barcode: &str,
    location: &str,
    delta: i64,
) -> DbResult<i64> {
    let current: Option<i64> =
        sqlx::query_scalar("SELECT qty FROM stock_levels WHERE barcode = ?1 AND location = ?2")
            .bind(barcode)
            .bind(location)
            .fetch_optional(&mut *conn)
            .await?;

    let new_qty = match current {
        Some(qty) => {
            // Existing row: plain addition, no floor.
            let new_qty = qty + delta;
            sqlx::query(
                "UPDATE stock_levels SET qty = ?3 WHERE barcode = ?1 AND location = ?2",
            )
            .bind(barcode)
            .bind(location)
            .bind(new_qty)
            .execute(&mut *conn)
            .await?;
            new_qty
        }
        None => {
            // First write for this pair: floor at zero.
            let new_qty = delta.max(0);
            sqlx::query("INSERT INTO stock_levels (barcode, location, qty) VALUES (?1, ?2, ?3)")
                .bind(barcode)
                .bind(location)
                .bind(new_qty)
                .execute(&mut *conn)
                .await?;
            new_qty
        }
    };

    debug!(barcode = %barcode, location = %location, delta, new_qty, "Applied stock delta");
    Ok(new_qty)
}

/// Reads the current level of one pair inside an open transaction.
///
/// Used by the count engine, where each line's corrective delta must see the
/// post-state of the previous line.
pub(crate) async fn current_level_tx(
    conn: &mut SqliteConnection,
    barcode: &str,
    location: &str,
) -> DbResult<i64> {
    let qty: Option<i64> =
        sqlx::query_scalar("SELECT qty FROM stock_levels WHERE barcode = ?1 AND location = ?2")
            .bind(barcode)
            .bind(location)
            .fetch_optional(&mut *conn)
            .await?;

    Ok(qty.unwrap_or(0))
}

// =============================================================================
// Read Views
// =============================================================================

/// Repository for stock level read views. Pure queries, no side effects.
#[derive(Debug, Clone)]
pub struct StockRepository {
    pool: SqlitePool,
}

impl StockRepository {
    /// Creates a new StockRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StockRepository { pool }
    }

    /// Current quantity at one (barcode, location) pair, 0 if no row exists.
    ///
    /// Absence is a normal result, not an error.
    pub async fn current_level(&self, barcode: &str, location: &str) -> DbResult<i64> {
        let qty: Option<i64> = sqlx::query_scalar(
            "SELECT qty FROM stock_levels WHERE barcode = ?1 AND location = ?2",
        )
        .bind(barcode)
        .bind(location)
        .fetch_optional(&self.pool)
        .await?;

        Ok(qty.unwrap_or(0))
    }

    /// All stock level rows, ordered by (location, barcode).
    pub async fn list_levels(&self) -> DbResult<Vec<StockLevel>> {
        let levels = sqlx::query_as::<_, StockLevel>(
            r#"
            SELECT barcode, location, qty
            FROM stock_levels
            ORDER BY location, barcode
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(levels)
    }
}
