//! Branch repository: plain CRUD, no business rules attached.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use belleza_core::Branch;

const BRANCH_COLUMNS: &str = "\
    id, name, address, phone, email, is_active, created_at, updated_at";

/// Repository for branch database operations.
#[derive(Debug, Clone)]
pub struct BranchRepository {
    pool: SqlitePool,
}

impl BranchRepository {
    /// Creates a new BranchRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BranchRepository { pool }
    }

    /// Lists active branches sorted by name.
    pub async fn list_active(&self) -> DbResult<Vec<Branch>> {
        let sql = format!(
            "SELECT {BRANCH_COLUMNS} FROM branches WHERE is_active = 1 ORDER BY name"
        );

        let branches = sqlx::query_as::<_, Branch>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(branches)
    }

    /// Gets a branch by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Branch>> {
        let sql = format!("SELECT {BRANCH_COLUMNS} FROM branches WHERE id = ?1");

        let branch = sqlx::query_as::<_, Branch>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(branch)
    }

    /// Inserts a new branch.
    pub async fn insert(&self, branch: &Branch) -> DbResult<()> {
        debug!(name = %branch.name, "Inserting branch");

        sqlx::query(
            r#"
            INSERT INTO branches (
                id, name, address, phone, email, is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&branch.id)
        .bind(&branch.name)
        .bind(&branch.address)
        .bind(&branch.phone)
        .bind(&branch.email)
        .bind(branch.is_active)
        .bind(branch.created_at)
        .bind(branch.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing branch.
    pub async fn update(&self, branch: &Branch) -> DbResult<()> {
        debug!(id = %branch.id, "Updating branch");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE branches SET
                name = ?2,
                address = ?3,
                phone = ?4,
                email = ?5,
                is_active = ?6,
                updated_at = ?7
            WHERE id = ?1
            "#,
        )
        .bind(&branch.id)
        .bind(&branch.name)
        .bind(&branch.address)
        .bind(&branch.phone)
        .bind(&branch.email)
        .bind(branch.is_active)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Branch", &branch.id));
        }

        Ok(())
    }

    /// Soft-deletes a branch by setting is_active = false.
    pub async fn soft_delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting branch");

        let now = Utc::now();

        let result = sqlx::query("UPDATE branches SET is_active = 0, updated_at = ?2 WHERE id = ?1")
            .bind(id)
            .bind(now)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Branch", id));
        }

        Ok(())
    }
}
