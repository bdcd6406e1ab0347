//! # Branch Repository
//!
//! Read-only reference resolution for branches (sucursales).

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use botica_core::Branch;

/// Repository for branch lookups.
#[derive(Debug, Clone)]
pub struct BranchRepository {
    pool: SqlitePool,
}

impl BranchRepository {
    /// Creates a new BranchRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BranchRepository { pool }
    }

    /// Gets a branch by ID.
    ///
    /// A present id that returns `None` here becomes
    /// `Sucursal '<id>' no encontrada`.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Branch>> {
        let branch = sqlx::query_as::<_, Branch>(
            r#"
            SELECT id, name, created_at
            FROM branches
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(branch)
    }

    /// Inserts a new branch (seed/tests).
    pub async fn insert(&self, branch: &Branch) -> DbResult<()> {
        debug!(id = %branch.id, name = %branch.name, "Inserting branch");

        sqlx::query(
            r#"
            INSERT INTO branches (id, name, created_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&branch.id)
        .bind(&branch.name)
        .bind(branch.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Helper to generate a new branch ID.
pub fn generate_branch_id() -> String {
    Uuid::new_v4().to_string()
}
