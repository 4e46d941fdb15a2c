//! Integration tests for the stock-ledger consistency engine.
//!
//! Every test runs against a fresh in-memory SQLite database with the full
//! migration set applied, exercising the real transactions rather than
//! mocked storage.

use stockbook_core::{CountLineInput, MoveAction};
use stockbook_db::{Database, DbConfig};

async fn test_db() -> Database {
    Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory database")
}

fn line(barcode: &str, qty: i64) -> CountLineInput {
    CountLineInput {
        barcode: barcode.to_string(),
        qty,
    }
}

// =============================================================================
// Move
// =============================================================================

#[tokio::test]
async fn move_sequence_folds_to_algebraic_sum() {
    let db = test_db().await;
    let ledger = db.ledger();

    let level = ledger
        .record_move(MoveAction::In, "123", 10, "A")
        .await
        .unwrap();
    assert_eq!(level, 10);

    let level = ledger
        .record_move(MoveAction::Out, "123", 3, "A")
        .await
        .unwrap();
    assert_eq!(level, 7);

    let level = ledger
        .record_move(MoveAction::In, "123", 5, "A")
        .await
        .unwrap();
    assert_eq!(level, 12);

    assert_eq!(db.stock().current_level("123", "A").await.unwrap(), 12);
}

#[tokio::test]
async fn out_against_absent_row_floors_at_zero() {
    let db = test_db().await;

    let level = db
        .ledger()
        .record_move(MoveAction::Out, "999", 5, "Z")
        .await
        .unwrap();
    assert_eq!(level, 0, "first write floors, never -5");
    assert_eq!(db.stock().current_level("999", "Z").await.unwrap(), 0);
}

#[tokio::test]
async fn out_against_existing_row_may_go_negative() {
    // The asymmetric floor: updates are NOT floored.
    let db = test_db().await;
    let ledger = db.ledger();

    ledger
        .record_move(MoveAction::In, "123", 2, "A")
        .await
        .unwrap();
    let level = ledger
        .record_move(MoveAction::Out, "123", 5, "A")
        .await
        .unwrap();
    assert_eq!(level, -3);
}

#[tokio::test]
async fn moves_append_to_ledger() {
    let db = test_db().await;
    let ledger = db.ledger();

    ledger
        .record_move(MoveAction::In, "123", 10, "A")
        .await
        .unwrap();
    ledger
        .record_move(MoveAction::Out, "123", 3, "A")
        .await
        .unwrap();

    let movements = ledger.recent_movements(100).await.unwrap();
    assert_eq!(movements.len(), 2);
    // Newest first
    assert_eq!(movements[0].action, MoveAction::Out);
    assert_eq!(movements[0].qty, 3);
    assert_eq!(movements[1].action, MoveAction::In);
    assert_eq!(movements[1].qty, 10);
}

#[tokio::test]
async fn recent_movements_respects_limit() {
    let db = test_db().await;
    let ledger = db.ledger();

    for _ in 0..5 {
        ledger
            .record_move(MoveAction::In, "123", 1, "A")
            .await
            .unwrap();
    }

    assert_eq!(ledger.recent_movements(3).await.unwrap().len(), 3);
    // Cap applies even for oversized requests
    assert_eq!(ledger.recent_movements(10_000).await.unwrap().len(), 5);
}

// =============================================================================
// Transfer
// =============================================================================

#[tokio::test]
async fn transfer_debits_and_credits_atomically() {
    let db = test_db().await;
    let ledger = db.ledger();

    ledger
        .record_move(MoveAction::In, "123", 10, "A")
        .await
        .unwrap();
    ledger
        .record_move(MoveAction::Out, "123", 3, "A")
        .await
        .unwrap();

    let outcome = ledger.record_transfer("123", 5, "A", "B").await.unwrap();
    assert_eq!(outcome.from_qty, 2);
    assert_eq!(outcome.to_qty, 5);

    let stock = db.stock();
    assert_eq!(stock.current_level("123", "A").await.unwrap(), 2);
    assert_eq!(stock.current_level("123", "B").await.unwrap(), 5);
}

#[tokio::test]
async fn transfer_into_absent_source_floors_then_credits() {
    let db = test_db().await;

    // Source row does not exist: debit side floors at 0, credit side gets +q.
    let outcome = db
        .ledger()
        .record_transfer("123", 4, "A", "B")
        .await
        .unwrap();
    assert_eq!(outcome.from_qty, 0);
    assert_eq!(outcome.to_qty, 4);
}

#[tokio::test]
async fn transfer_same_location_rejected_by_schema_backstop() {
    // Validation rejects this long before the db layer; the CHECK constraint
    // is defense in depth. Either way: no ledger entry, no level change.
    let db = test_db().await;
    let ledger = db.ledger();

    ledger
        .record_move(MoveAction::In, "123", 10, "A")
        .await
        .unwrap();

    let result = ledger.record_transfer("123", 5, "A", "A").await;
    assert!(result.is_err());

    assert_eq!(db.stock().current_level("123", "A").await.unwrap(), 10);
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transfers")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(count, 0);
}

// =============================================================================
// Count
// =============================================================================

#[tokio::test]
async fn count_with_policy_disabled_never_touches_stock() {
    let db = test_db().await;
    let ledger = db.ledger();

    ledger
        .record_move(MoveAction::In, "123", 10, "A")
        .await
        .unwrap();

    let count_id = ledger
        .record_count("A", &[line("123", 2), line("456", 99)], false)
        .await
        .unwrap();
    assert!(count_id > 0);

    let stock = db.stock();
    assert_eq!(stock.current_level("123", "A").await.unwrap(), 10);
    assert_eq!(stock.current_level("456", "A").await.unwrap(), 0);

    // Lines were still recorded in the ledger
    let lines: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM count_lines WHERE count_id = ?1")
        .bind(count_id)
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(lines, 2);
}

#[tokio::test]
async fn count_with_policy_enabled_overwrites_via_corrective_delta() {
    let db = test_db().await;
    let ledger = db.ledger();

    ledger
        .record_move(MoveAction::In, "123", 10, "A")
        .await
        .unwrap();
    ledger
        .record_move(MoveAction::Out, "123", 3, "A")
        .await
        .unwrap();
    ledger.record_transfer("123", 5, "A", "B").await.unwrap();
    // Level at A is now 2

    ledger
        .record_count("A", &[line("123", 0)], true)
        .await
        .unwrap();

    assert_eq!(db.stock().current_level("123", "A").await.unwrap(), 0);
    // B untouched: counts are per-location
    assert_eq!(db.stock().current_level("123", "B").await.unwrap(), 5);
}

#[tokio::test]
async fn count_lines_compose_in_order_later_line_wins() {
    let db = test_db().await;
    let ledger = db.ledger();

    ledger
        .record_move(MoveAction::In, "123", 10, "A")
        .await
        .unwrap();

    // Two lines for the same barcode: the second reads the level after the
    // first correction, so the session ends on the last line's qty.
    ledger
        .record_count("A", &[line("123", 4), line("123", 7)], true)
        .await
        .unwrap();

    assert_eq!(db.stock().current_level("123", "A").await.unwrap(), 7);
}

#[tokio::test]
async fn count_creates_lazy_rows_for_unseen_barcodes() {
    let db = test_db().await;

    db.ledger()
        .record_count("A", &[line("777", 12)], true)
        .await
        .unwrap();

    assert_eq!(db.stock().current_level("777", "A").await.unwrap(), 12);
}

#[tokio::test]
async fn invalid_count_line_rolls_back_everything() {
    // Validation catches negative quantities first; this drives the engine
    // directly to prove the CHECK constraint forces a full rollback.
    let db = test_db().await;
    let ledger = db.ledger();

    ledger
        .record_move(MoveAction::In, "123", 10, "A")
        .await
        .unwrap();

    let result = ledger
        .record_count("A", &[line("123", 4), line("456", -1)], true)
        .await;
    assert!(result.is_err());

    // No header, no lines, no corrective deltas survive
    let headers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM counts")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(headers, 0);

    let lines: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM count_lines")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(lines, 0);

    assert_eq!(db.stock().current_level("123", "A").await.unwrap(), 10);
}

#[tokio::test]
async fn deleting_count_session_cascades_to_lines_only() {
    let db = test_db().await;
    let ledger = db.ledger();

    ledger
        .record_move(MoveAction::In, "123", 10, "A")
        .await
        .unwrap();
    let count_id = ledger
        .record_count("A", &[line("123", 6)], true)
        .await
        .unwrap();
    assert_eq!(db.stock().current_level("123", "A").await.unwrap(), 6);

    sqlx::query("DELETE FROM counts WHERE id = ?1")
        .bind(count_id)
        .execute(db.pool())
        .await
        .unwrap();

    let lines: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM count_lines")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(lines, 0, "cascade removed the lines");

    // Stock truth is unaffected by deleting history metadata
    assert_eq!(db.stock().current_level("123", "A").await.unwrap(), 6);
}

// =============================================================================
// Read Views & Catalog
// =============================================================================

#[tokio::test]
async fn list_levels_is_ordered_by_location_then_barcode() {
    let db = test_db().await;
    let ledger = db.ledger();

    ledger
        .record_move(MoveAction::In, "222", 1, "B")
        .await
        .unwrap();
    ledger
        .record_move(MoveAction::In, "111", 2, "B")
        .await
        .unwrap();
    ledger
        .record_move(MoveAction::In, "333", 3, "A")
        .await
        .unwrap();

    let levels = db.stock().list_levels().await.unwrap();
    let keys: Vec<(String, String)> = levels
        .into_iter()
        .map(|l| (l.location, l.barcode))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("A".to_string(), "333".to_string()),
            ("B".to_string(), "111".to_string()),
            ("B".to_string(), "222".to_string()),
        ]
    );
}

#[tokio::test]
async fn product_upsert_replaces_by_barcode() {
    let db = test_db().await;
    let products = db.products();

    products.upsert("123", "Widget", Some("W-1")).await.unwrap();
    products.upsert("123", "Widget v2", None).await.unwrap();

    let product = products.get_by_barcode("123").await.unwrap().unwrap();
    assert_eq!(product.name, "Widget v2");
    assert_eq!(product.sku, None);

    assert_eq!(products.count().await.unwrap(), 1);
}

#[tokio::test]
async fn missing_product_is_none_not_error() {
    let db = test_db().await;
    assert!(db.products().get_by_barcode("nope").await.unwrap().is_none());
}
