//! # Repository Module
//!
//! Repository implementations for database operations.
//!
//! ## Repository Pattern
//! Each repository owns the SQL for one area of the schema:
//!
//! - [`product`] - catalog upsert and barcode lookup
//! - [`stock`] - the materialized projection: delta application + read views
//! - [`ledger`] - the operations engine: Move / Transfer / Count, each as a
//!   single all-or-nothing transaction combining a ledger append with the
//!   projector updates it implies
//!
//! Repositories are cheap to create (they clone the pool handle), so they're
//! created on demand from [`crate::Database`].

pub mod ledger;
pub mod product;
pub mod stock;
