//! # Price Repository
//!
//! Database operations for price entries: the price of one article on
//! one price list.
//!
//! Unique per `(article_id, price_list_id)`, so setting a price is an
//! upsert. The margin stored alongside is computed by
//! `belleza_core::pricing::profit_margin_bps` in the service before the
//! write.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use belleza_core::PriceEntry;

const PRICE_COLUMNS: &str = "\
    id, article_id, price_list_id, cost_cents, sale_price_cents, \
    profit_margin_bps, updated_at";

/// Repository for price entry database operations.
#[derive(Debug, Clone)]
pub struct PriceRepository {
    pool: SqlitePool,
}

impl PriceRepository {
    /// Creates a new PriceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PriceRepository { pool }
    }

    /// Lists all price entries for an article, across every list.
    pub async fn list_for_article(&self, article_id: &str) -> DbResult<Vec<PriceEntry>> {
        let sql = format!(
            "SELECT {PRICE_COLUMNS} FROM price_entries WHERE article_id = ?1"
        );

        let entries = sqlx::query_as::<_, PriceEntry>(&sql)
            .bind(article_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(entries)
    }

    /// Lists all price entries on a list.
    pub async fn list_for_list(&self, price_list_id: &str) -> DbResult<Vec<PriceEntry>> {
        let sql = format!(
            "SELECT {PRICE_COLUMNS} FROM price_entries WHERE price_list_id = ?1"
        );

        let entries = sqlx::query_as::<_, PriceEntry>(&sql)
            .bind(price_list_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(entries)
    }

    /// Gets one article's entry on one list.
    pub async fn get(
        &self,
        article_id: &str,
        price_list_id: &str,
    ) -> DbResult<Option<PriceEntry>> {
        let sql = format!(
            "SELECT {PRICE_COLUMNS} FROM price_entries \
             WHERE article_id = ?1 AND price_list_id = ?2"
        );

        let entry = sqlx::query_as::<_, PriceEntry>(&sql)
            .bind(article_id)
            .bind(price_list_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entry)
    }

    /// Inserts or replaces a price entry for `(article, list)`.
    ///
    /// ON CONFLICT keeps the original row id, so references stay stable
    /// across price updates.
    pub async fn upsert(&self, entry: &PriceEntry) -> DbResult<()> {
        debug!(
            article_id = %entry.article_id,
            price_list_id = %entry.price_list_id,
            sale_price_cents = %entry.sale_price_cents,
            "Upserting price entry"
        );

        sqlx::query(
            r#"
            INSERT INTO price_entries (
                id, article_id, price_list_id,
                cost_cents, sale_price_cents, profit_margin_bps, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT (article_id, price_list_id) DO UPDATE SET
                cost_cents = excluded.cost_cents,
                sale_price_cents = excluded.sale_price_cents,
                profit_margin_bps = excluded.profit_margin_bps,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.article_id)
        .bind(&entry.price_list_id)
        .bind(entry.cost_cents)
        .bind(entry.sale_price_cents)
        .bind(entry.profit_margin_bps)
        .bind(entry.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Removes an article's entry from a list.
    ///
    /// Deleting a price that was never set is not an error; the end state
    /// is the same.
    pub async fn delete(&self, article_id: &str, price_list_id: &str) -> DbResult<()> {
        debug!(
            article_id = %article_id,
            price_list_id = %price_list_id,
            "Deleting price entry"
        );

        sqlx::query("DELETE FROM price_entries WHERE article_id = ?1 AND price_list_id = ?2")
            .bind(article_id)
            .bind(price_list_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Counts priced articles on a list (used by the delete guard).
    pub async fn count_for_list(&self, price_list_id: &str) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM price_entries WHERE price_list_id = ?1")
                .bind(price_list_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}
