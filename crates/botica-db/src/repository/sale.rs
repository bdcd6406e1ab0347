//! # Sale Repository
//!
//! Row operations for sales and sale line items.
//!
//! ## Write Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sale Persistence                                 │
//! │                                                                         │
//! │  Sales and their line items are ONLY ever written by the checkout       │
//! │  coordinator, inside one transaction:                                   │
//! │                                                                         │
//! │     insert_sale(conn, sale)          ← 1 row                            │
//! │     insert_item(conn, item)          ← N rows, request order            │
//! │     ... (stock decrements interleaved per item)                         │
//! │     COMMIT                                                              │
//! │                                                                         │
//! │  That is why the insert methods take &mut SqliteConnection instead      │
//! │  of borrowing the pool: a sale row can never exist without its items.   │
//! │                                                                         │
//! │  Reads (get_by_id / get_items) use the pool and serve the               │
//! │  "list line items for this sale" accessor promised to callers.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use botica_core::{Sale, SaleLineItem};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, date, employee_id, receipt_type, payment_type,
                   total_cents, customer_id, branch_id, created_at
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Gets all line items for a sale, in the order they were persisted
    /// (which is the order they were requested).
    pub async fn get_items(&self, sale_id: &str) -> DbResult<Vec<SaleLineItem>> {
        let items = sqlx::query_as::<_, SaleLineItem>(
            r#"
            SELECT id, sale_id, product_id, quantity, price_cents,
                   subtotal_cents, total_cents, observation, created_at
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Counts sale rows (test/diagnostic helper).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Counts sale item rows (test/diagnostic helper).
    pub async fn count_items(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sale_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Inserts the sale header row. Transaction-scoped: only called by
    /// the checkout coordinator.
    pub async fn insert_sale(conn: &mut SqliteConnection, sale: &Sale) -> DbResult<()> {
        debug!(id = %sale.id, total = %sale.total(), "Inserting sale");

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, date, employee_id, receipt_type, payment_type,
                total_cents, customer_id, branch_id, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&sale.id)
        .bind(sale.date)
        .bind(&sale.employee_id)
        .bind(sale.receipt_type)
        .bind(sale.payment_type)
        .bind(sale.total_cents)
        .bind(&sale.customer_id)
        .bind(&sale.branch_id)
        .bind(sale.created_at)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Inserts one line item row bound to its sale. Transaction-scoped.
    pub async fn insert_item(conn: &mut SqliteConnection, item: &SaleLineItem) -> DbResult<()> {
        debug!(sale_id = %item.sale_id, product_id = %item.product_id, "Inserting sale item");

        sqlx::query(
            r#"
            INSERT INTO sale_items (
                id, sale_id, product_id, quantity, price_cents,
                subtotal_cents, total_cents, observation, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&item.id)
        .bind(&item.sale_id)
        .bind(&item.product_id)
        .bind(item.quantity)
        .bind(item.price_cents)
        .bind(item.subtotal_cents)
        .bind(item.total_cents)
        .bind(&item.observation)
        .bind(item.created_at)
        .execute(conn)
        .await?;

        Ok(())
    }
}

/// Generates a new sale ID.
pub fn generate_sale_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generates a new sale line item ID.
pub fn generate_line_item_id() -> String {
    Uuid::new_v4().to_string()
}
