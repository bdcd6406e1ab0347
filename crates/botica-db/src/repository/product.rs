//! # Product Repository
//!
//! Catalog lookup and the stock reservation write.
//!
//! ## The Two Stock Checks
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Advisory check vs. authoritative check                  │
//! │                                                                         │
//! │  Validation phase (no writes):                                          │
//! │     get_by_id() → Product { quantity } → covers(requested)?             │
//! │     Purpose: precise user message BEFORE touching the database          │
//! │                                                                         │
//! │  Commit phase (inside the checkout transaction):                        │
//! │     UPDATE products SET quantity = quantity - ?                         │
//! │     WHERE id = ? AND quantity >= ?                                      │
//! │     Purpose: the AUTHORITATIVE check. rows_affected = 0 means a         │
//! │     concurrent sale won the race; the whole checkout rolls back.        │
//! │                                                                         │
//! │  A read-then-write of the validated quantity would be a race;           │
//! │  the conditional UPDATE is reservation and decrement in one write.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use botica_core::Product;

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

    /// Gets a product by its ID. No side effects.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, quantity, price_cents, created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product.
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (id, name, quantity, price_cents, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.quantity)
        .bind(product.price_cents)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Counts products (for diagnostics and the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Atomically reserves (decrements) stock for one line item.
    ///
    /// Takes an explicit transaction connection: this write only ever
    /// happens inside the checkout transaction, so reservation and
    /// decrement are one durable write that commits or rolls back with
    /// the sale rows.
    ///
    /// ## Returns
    /// * `Ok(true)` - Stock covered the quantity and was decremented
    /// * `Ok(false)` - Insufficient stock at commit time (or unknown
    ///   product); nothing was written
    pub async fn reserve_stock(
        conn: &mut SqliteConnection,
        product_id: &str,
        quantity: i64,
    ) -> DbResult<bool> {
        debug!(product_id = %product_id, quantity = %quantity, "Reserving stock");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products
            SET quantity = quantity - ?2,
                updated_at = ?3
            WHERE id = ?1 AND quantity >= ?2
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .bind(now)
        .execute(conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Helper to generate a new product ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}
