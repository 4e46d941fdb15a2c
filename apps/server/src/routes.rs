//! HTTP route handlers.
//!
//! Each handler follows the same shape:
//! 1. deserialize (serde rejects type errors: non-integer qty, bad action)
//! 2. validate via stockbook-core (fail fast, before any transaction)
//! 3. call one repository operation
//! 4. map the result to JSON
//!
//! ## Operation Surface
//! | Route | Operation |
//! |---|---|
//! | `GET  /api/health`          | ok flag + current time |
//! | `GET  /api/products/{code}` | product or null |
//! | `POST /api/products`        | upsert by barcode |
//! | `POST /api/movements`       | Move → resulting level |
//! | `POST /api/transfers`       | Transfer → both resulting levels |
//! | `POST /api/counts`          | Count → new count id |
//! | `GET  /api/stock-levels`    | all levels |
//! | `GET  /api/movements`       | ≤100 most recent movements |

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use stockbook_core::validation::{
    validate_count, validate_move, validate_product, validate_transfer,
};
use stockbook_core::{
    CountLineInput, MoveAction, Movement, Product, StockLevel, RECENT_MOVEMENTS_LIMIT,
};
use stockbook_db::Database;

use crate::error::ApiError;

// =============================================================================
// Application State
// =============================================================================

/// Shared state injected into every handler.
///
/// The database handle is the only store dependency; there is no ambient
/// global.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    /// Apply-count policy toggle (see config).
    pub apply_counts: bool,
}

/// Builds the API router. CORS is layered on by the caller.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/products/{code}", get(lookup_product))
        .route("/api/products", post(upsert_product))
        .route("/api/movements", post(record_move).get(list_movements))
        .route("/api/transfers", post(record_transfer))
        .route("/api/counts", post(record_count))
        .route("/api/stock-levels", get(list_levels))
        .with_state(state)
}

// =============================================================================
// Health
// =============================================================================

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "ok": state.db.health_check().await,
        "time": Utc::now(),
    }))
}

// =============================================================================
// Products
// =============================================================================

#[derive(Debug, Deserialize)]
struct UpsertProductRequest {
    barcode: String,
    name: String,
    sku: Option<String>,
}

/// GET /api/products/{code} - product by barcode, or JSON null.
///
/// Absence is a valid result, not an error: the response is `null` with 200.
async fn lookup_product(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Option<Product>>, ApiError> {
    let product = state.db.products().get_by_barcode(&code).await?;
    Ok(Json(product))
}

/// POST /api/products - upsert (full replace-by-barcode).
async fn upsert_product(
    State(state): State<AppState>,
    Json(req): Json<UpsertProductRequest>,
) -> Result<Json<Value>, ApiError> {
    validate_product(&req.barcode, &req.name)?;

    state
        .db
        .products()
        .upsert(&req.barcode, &req.name, req.sku.as_deref())
        .await?;

    Ok(Json(json!({ "ok": true })))
}

// =============================================================================
// Move
// =============================================================================

#[derive(Debug, Deserialize)]
struct MoveRequest {
    action: MoveAction,
    barcode: String,
    qty: i64,
    location: String,
}

#[derive(Debug, Serialize)]
struct LevelResponse {
    barcode: String,
    location: String,
    qty: i64,
}

/// POST /api/movements - record a receipt/issue movement.
async fn record_move(
    State(state): State<AppState>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<LevelResponse>, ApiError> {
    validate_move(req.action, &req.barcode, req.qty, &req.location)?;

    let qty = state
        .db
        .ledger()
        .record_move(req.action, &req.barcode, req.qty, &req.location)
        .await?;

    info!(action = %req.action, barcode = %req.barcode, location = %req.location, qty, "Movement recorded");

    Ok(Json(LevelResponse {
        barcode: req.barcode,
        location: req.location,
        qty,
    }))
}

// =============================================================================
// Transfer
// =============================================================================

#[derive(Debug, Deserialize)]
struct TransferRequest {
    barcode: String,
    qty: i64,
    from_location: String,
    to_location: String,
}

#[derive(Debug, Serialize)]
struct TransferResponse {
    transfer_id: i64,
    from: LevelResponse,
    to: LevelResponse,
}

/// POST /api/transfers - move stock between two locations atomically.
async fn record_transfer(
    State(state): State<AppState>,
    Json(req): Json<TransferRequest>,
) -> Result<Json<TransferResponse>, ApiError> {
    validate_transfer(&req.barcode, req.qty, &req.from_location, &req.to_location)?;

    let outcome = state
        .db
        .ledger()
        .record_transfer(&req.barcode, req.qty, &req.from_location, &req.to_location)
        .await?;

    info!(
        barcode = %req.barcode,
        from = %req.from_location,
        to = %req.to_location,
        qty = req.qty,
        "Transfer recorded"
    );

    Ok(Json(TransferResponse {
        transfer_id: outcome.transfer_id,
        from: LevelResponse {
            barcode: req.barcode.clone(),
            location: req.from_location,
            qty: outcome.from_qty,
        },
        to: LevelResponse {
            barcode: req.barcode,
            location: req.to_location,
            qty: outcome.to_qty,
        },
    }))
}

// =============================================================================
// Count
// =============================================================================

#[derive(Debug, Deserialize)]
struct CountRequest {
    location: String,
    lines: Vec<CountLineInput>,
}

#[derive(Debug, Serialize)]
struct CountResponse {
    count_id: i64,
}

/// POST /api/counts - record a physical count session.
///
/// Whether the count also corrects the materialized levels is decided by the
/// server-wide apply-count policy, not by the request.
async fn record_count(
    State(state): State<AppState>,
    Json(req): Json<CountRequest>,
) -> Result<Json<CountResponse>, ApiError> {
    validate_count(&req.location, &req.lines)?;

    let count_id = state
        .db
        .ledger()
        .record_count(&req.location, &req.lines, state.apply_counts)
        .await?;

    info!(
        location = %req.location,
        lines = req.lines.len(),
        applied = state.apply_counts,
        count_id,
        "Count recorded"
    );

    Ok(Json(CountResponse { count_id }))
}

// =============================================================================
// Read Views
// =============================================================================

/// GET /api/stock-levels - all levels ordered by (location, barcode).
async fn list_levels(State(state): State<AppState>) -> Result<Json<Vec<StockLevel>>, ApiError> {
    let levels = state.db.stock().list_levels().await?;
    Ok(Json(levels))
}

/// GET /api/movements - most recent movements, newest first.
async fn list_movements(State(state): State<AppState>) -> Result<Json<Vec<Movement>>, ApiError> {
    let movements = state
        .db
        .ledger()
        .recent_movements(RECENT_MOVEMENTS_LIMIT)
        .await?;
    Ok(Json(movements))
}
