//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! The catalog is descriptive only: products are looked up by barcode for
//! display purposes and take no part in the stock-ledger invariants. There
//! is deliberately no richer catalog management (categories, prices, soft
//! delete) - out of scope for a stock ledger.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use stockbook_core::Product;

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by its barcode.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - No such barcode; a normal result, not an error
    pub async fn get_by_barcode(&self, barcode: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT barcode, name, sku, created_at
            FROM products
            WHERE barcode = ?1
            "#,
        )
        .bind(barcode)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Upserts a product by barcode.
    ///
    /// ## Replace-By-Barcode
    /// If the barcode already exists, name and sku are fully replaced;
    /// `created_at` keeps its original value.
    pub async fn upsert(&self, barcode: &str, name: &str, sku: Option<&str>) -> DbResult<()> {
        debug!(barcode = %barcode, name = %name, "Upserting product");

        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO products (barcode, name, sku, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (barcode) DO UPDATE SET
                name = excluded.name,
                sku = excluded.sku
            "#,
        )
        .bind(barcode)
        .bind(name)
        .bind(sku)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Counts catalog entries (for diagnostics and the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
