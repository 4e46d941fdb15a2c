//! # stockbook-core: Pure Business Logic for Stockbook
//!
//! This crate is the **heart** of Stockbook. It contains the domain types and
//! the validation rules for the stock ledger as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Stockbook Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   HTTP API (apps/server)                        │   │
//! │  │    record_move, record_transfer, record_count, list_levels      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ stockbook-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐      ┌────────────┐      ┌───────────┐         │   │
//! │  │   │   types   │      │ validation │      │   error   │         │   │
//! │  │   │ Movement  │      │   rules    │      │ Validation│         │   │
//! │  │   │ Transfer  │      │   checks   │      │   Error   │         │   │
//! │  │   └───────────┘      └────────────┘      └───────────┘         │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  stockbook-db (Storage Layer)                   │   │
//! │  │         SQLite ledger tables, stock projector, migrations       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, StockLevel, Movement, Transfer, ...)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation for the three mutating operations
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Fail Fast**: Validation rejects bad input before any transaction opens
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use stockbook_core::Movement` instead of
// `use stockbook_core::types::Movement`

pub use error::ValidationError;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default cap on the movement listing.
///
/// ## Why a constant?
/// The recent-movements view is a diagnostic listing, not a reporting
/// surface. Capping it keeps the response bounded regardless of ledger size.
pub const RECENT_MOVEMENTS_LIMIT: u32 = 100;

/// Maximum length accepted for barcodes and location names.
///
/// ## Business Reason
/// Barcodes in the wild (EAN-13, UPC-A, Code 128) stay well under this;
/// anything longer is almost certainly scanner garbage.
pub const MAX_CODE_LENGTH: usize = 64;
