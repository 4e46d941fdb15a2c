//! # stockbook-db: Storage Layer for Stockbook
//!
//! This crate provides database access for the Stockbook stock-ledger
//! system. It uses SQLite for local storage with sqlx for async operations,
//! and it owns the one invariant that matters:
//!
//! > `stock_levels.qty` for every (barcode, location) pair equals the
//! > algebraic sum of the deltas implied by the append-only ledger
//! > (movements, transfers, and - when the apply-count policy is on -
//! > count corrections).
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Stockbook Data Flow                               │
//! │                                                                         │
//! │  HTTP handler (record_move, record_transfer, record_count)             │
//! │       │  (input already validated by stockbook-core)                   │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   stockbook-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (ledger.rs,   │    │  (embedded)  │  │   │
//! │  │   │               │    │  stock.rs,    │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│  product.rs)  │    │ 001_init.sql │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   One mutating operation == one SQLite transaction:            │   │
//! │  │   BEGIN → ledger append → projector update(s) → COMMIT        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Ledger engine, stock projector, product repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockbook_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./stockbook.db")).await?;
//!
//! let level = db.ledger().record_move(MoveAction::In, "123", 10, "MAIN").await?;
//! let levels = db.stock().list_levels().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::ledger::{LedgerRepository, TransferOutcome};
pub use repository::product::ProductRepository;
pub use repository::stock::StockRepository;
