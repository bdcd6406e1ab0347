//! # Customer Repository
//!
//! Read-only reference resolution for customers. The checkout core never
//! mutates customers; `insert` exists for seeding and tests.

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use botica_core::Customer;

/// Repository for customer lookups.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Gets a customer by ID.
    ///
    /// An absent id on a sale request never reaches this call; a present
    /// id that returns `None` here becomes `Cliente '<id>' no encontrado`.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, document, created_at
            FROM customers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Inserts a new customer (seed/tests).
    pub async fn insert(&self, customer: &Customer) -> DbResult<()> {
        debug!(id = %customer.id, name = %customer.name, "Inserting customer");

        sqlx::query(
            r#"
            INSERT INTO customers (id, name, document, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.document)
        .bind(customer.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Helper to generate a new customer ID.
pub fn generate_customer_id() -> String {
    Uuid::new_v4().to_string()
}
