//! # Ledger Repository
//!
//! The operations engine: Move, Transfer, and Count, each executed as one
//! atomic transaction that appends to the append-only ledger and applies the
//! implied deltas to the stock projection.
//!
//! ## Operation Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                One Mutating Operation == One Transaction                │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    1. INSERT ledger record(s)        ← takes SQLite's write lock       │
//! │    2. read + update stock_levels     ← sees a stable level; no other   │
//! │                                        writer can interleave here      │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Any failure between BEGIN and COMMIT rolls everything back: the       │
//! │  ledger and the projection move together or not at all.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The ledger append runs *first* on purpose. SQLite serializes writers, so
//! the INSERT acquires the write lock before the projector's read-modify-
//! write; a concurrent operation on the same (barcode, location) pair waits
//! at its own first INSERT instead of racing the level read.
//!
//! ## Retries
//! There are none. A failed transaction is reported to the caller, who may
//! resubmit - but resubmitting Move/Transfer appends a NEW ledger entry, so
//! these operations are not idempotent by design.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::repository::stock::{apply_delta, current_level_tx};
use stockbook_core::{CountLineInput, Movement, MoveAction, RECENT_MOVEMENTS_LIMIT};

/// Resulting quantities on both sides of a completed transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferOutcome {
    /// New ledger record id.
    pub transfer_id: i64,
    /// Quantity left at the source location.
    pub from_qty: i64,
    /// Quantity now at the destination location.
    pub to_qty: i64,
}

/// Repository for ledger operations.
///
/// Inputs are assumed to have passed `stockbook_core::validation` already;
/// this layer owns atomicity and the ledger/projection invariant, not field
/// checks (the schema's CHECK constraints remain as a backstop).
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    pool: SqlitePool,
}

impl LedgerRepository {
    /// Creates a new LedgerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        LedgerRepository { pool }
    }

    // =========================================================================
    // Move
    // =========================================================================

    /// Records a receipt (IN) or issue (OUT) movement.
    ///
    /// Appends one `movements` row and applies `+qty` (IN) or `-qty` (OUT)
    /// to the level at (barcode, location), in one transaction.
    ///
    /// ## Returns
    /// The resulting quantity at the pair (0 if the row did not exist and
    /// the delta was floored).
    pub async fn record_move(
        &self,
        action: MoveAction,
        barcode: &str,
        qty: i64,
        location: &str,
    ) -> DbResult<i64> {
        debug!(%action, barcode = %barcode, qty, location = %location, "Recording movement");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO movements (action, barcode, qty, location, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(action)
        .bind(barcode)
        .bind(qty)
        .bind(location)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let new_qty = apply_delta(&mut tx, barcode, location, action.delta(qty)).await?;

        tx.commit().await?;

        Ok(new_qty)
    }

    // =========================================================================
    // Transfer
    // =========================================================================

    /// Records an inter-location transfer.
    ///
    /// Appends one `transfers` row, debits the source and credits the
    /// destination - all in one transaction. A partial transfer (debit
    /// without credit) is never observable.
    pub async fn record_transfer(
        &self,
        barcode: &str,
        qty: i64,
        from_location: &str,
        to_location: &str,
    ) -> DbResult<TransferOutcome> {
        debug!(
            barcode = %barcode,
            qty,
            from = %from_location,
            to = %to_location,
            "Recording transfer"
        );

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO transfers (barcode, qty, from_location, to_location, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(barcode)
        .bind(qty)
        .bind(from_location)
        .bind(to_location)
        .bind(now)
        .execute(&mut *tx)
        .await?;
        let transfer_id = result.last_insert_rowid();

        let from_qty = apply_delta(&mut tx, barcode, from_location, -qty).await?;
        let to_qty = apply_delta(&mut tx, barcode, to_location, qty).await?;

        tx.commit().await?;

        Ok(TransferOutcome {
            transfer_id,
            from_qty,
            to_qty,
        })
    }

    // =========================================================================
    // Count
    // =========================================================================

    /// Records a physical count session.
    ///
    /// Creates the session header and all lines in one transaction. When
    /// `apply_to_stock` is enabled, each line additionally becomes
    /// authoritative: the engine computes `counted - current` and applies it
    /// as a corrective delta, so the projection lands on exactly the counted
    /// quantity while the fold semantics stay uniform.
    ///
    /// ## Line Ordering
    /// Lines are an ordered fold. Each line's delta reads the level *after*
    /// the previous line's correction, so two lines for the same barcode
    /// compose: the later line wins.
    ///
    /// ## Returns
    /// The new count session id.
    pub async fn record_count(
        &self,
        location: &str,
        lines: &[CountLineInput],
        apply_to_stock: bool,
    ) -> DbResult<i64> {
        debug!(
            location = %location,
            lines = lines.len(),
            apply_to_stock,
            "Recording count session"
        );

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("INSERT INTO counts (location, created_at) VALUES (?1, ?2)")
            .bind(location)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        let count_id = result.last_insert_rowid();

        for line in lines {
            sqlx::query("INSERT INTO count_lines (count_id, barcode, qty) VALUES (?1, ?2, ?3)")
                .bind(count_id)
                .bind(&line.barcode)
                .bind(line.qty)
                .execute(&mut *tx)
                .await?;

            if apply_to_stock {
                let current = current_level_tx(&mut tx, &line.barcode, location).await?;
                let delta = line.qty - current;
                apply_delta(&mut tx, &line.barcode, location, delta).await?;
            }
        }

        tx.commit().await?;

        debug!(count_id, "Count session committed");
        Ok(count_id)
    }

    // =========================================================================
    // Read Views
    // =========================================================================

    /// Most recent movements, newest first.
    ///
    /// `limit` is capped at [`RECENT_MOVEMENTS_LIMIT`].
    pub async fn recent_movements(&self, limit: u32) -> DbResult<Vec<Movement>> {
        let limit = limit.min(RECENT_MOVEMENTS_LIMIT);

        let movements = sqlx::query_as::<_, Movement>(
            r#"
            SELECT id, action, barcode, qty, location, created_at
            FROM movements
            ORDER BY created_at DESC, id DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(movements)
    }
}
