//! # Price List Repository
//!
//! Database operations for price lists.
//!
//! ## The Default Flag
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  At most one list carries is_default = 1. set_default() enforces       │
//! │  this transactionally: clear every flag, set one. The register         │
//! │  resolves "the price" of an article through the default list.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use belleza_core::PriceList;

const PRICE_LIST_COLUMNS: &str = "\
    id, name, description, is_default, is_active, created_at, updated_at";

/// Repository for price list database operations.
#[derive(Debug, Clone)]
pub struct PriceListRepository {
    pool: SqlitePool,
}

impl PriceListRepository {
    /// Creates a new PriceListRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PriceListRepository { pool }
    }

    /// Lists active price lists, default first.
    pub async fn list_active(&self) -> DbResult<Vec<PriceList>> {
        let sql = format!(
            "SELECT {PRICE_LIST_COLUMNS} FROM price_lists \
             WHERE is_active = 1 ORDER BY is_default DESC, name"
        );

        let lists = sqlx::query_as::<_, PriceList>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(lists)
    }

    /// Gets a price list by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<PriceList>> {
        let sql = format!("SELECT {PRICE_LIST_COLUMNS} FROM price_lists WHERE id = ?1");

        let list = sqlx::query_as::<_, PriceList>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(list)
    }

    /// Gets the default price list, if one is flagged.
    pub async fn get_default(&self) -> DbResult<Option<PriceList>> {
        let sql = format!(
            "SELECT {PRICE_LIST_COLUMNS} FROM price_lists \
             WHERE is_default = 1 AND is_active = 1"
        );

        let list = sqlx::query_as::<_, PriceList>(&sql)
            .fetch_optional(&self.pool)
            .await?;

        Ok(list)
    }

    /// Inserts a new price list.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - name already exists
    pub async fn insert(&self, list: &PriceList) -> DbResult<()> {
        debug!(name = %list.name, "Inserting price list");

        sqlx::query(
            r#"
            INSERT INTO price_lists (
                id, name, description, is_default, is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&list.id)
        .bind(&list.name)
        .bind(&list.description)
        .bind(list.is_default)
        .bind(list.is_active)
        .bind(list.created_at)
        .bind(list.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates a price list's name, description and active flag.
    ///
    /// The default flag only moves through
    /// [`PriceListRepository::set_default`].
    pub async fn update(&self, list: &PriceList) -> DbResult<()> {
        debug!(id = %list.id, "Updating price list");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE price_lists SET
                name = ?2,
                description = ?3,
                is_active = ?4,
                updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(&list.id)
        .bind(&list.name)
        .bind(&list.description)
        .bind(list.is_active)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("PriceList", &list.id));
        }

        Ok(())
    }

    /// Makes one list the default, clearing any previous default.
    ///
    /// Runs in a transaction so there is never a moment with two
    /// defaults visible.
    pub async fn set_default(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Setting default price list");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE price_lists SET is_default = 0, updated_at = ?1 WHERE is_default = 1")
            .bind(now)
            .execute(&mut *tx)
            .await?;

        let result =
            sqlx::query("UPDATE price_lists SET is_default = 1, updated_at = ?2 WHERE id = ?1")
                .bind(id)
                .bind(now)
                .execute(&mut *tx)
                .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(DbError::not_found("PriceList", id));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Permanently deletes a price list.
    ///
    /// Callers go through the price list service, which first rejects
    /// the default list and any list with priced articles.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting price list");

        let result = sqlx::query("DELETE FROM price_lists WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("PriceList", id));
        }

        Ok(())
    }
}
