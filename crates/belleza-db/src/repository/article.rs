//! # Article Repository
//!
//! Database operations for articles.
//!
//! ## Key Operations
//! - CRUD with soft delete, plus guarded permanent delete
//! - Stock writes (value computed by belleza-core::stock)
//! - Report scans (tracked articles, dated articles)
//!
//! ## Stock Writes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  update_stock() writes an absolute value, not a delta. The new         │
//! │  value always comes out of belleza-core::stock::adjust_stock, which    │
//! │  has already rejected negative results and untracked articles.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use belleza_core::Article;

const ARTICLE_COLUMNS: &str = "\
    id, barcode, description, category_id, sale_unit, \
    track_stock, stock_on_hand, stock_min, stock_max, expires_on, \
    is_active, created_at, updated_at";

/// Repository for article database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ArticleRepository::new(pool);
///
/// let article = repo.get_by_barcode("7791234567890").await?;
/// let results = repo.search("shampoo", 20).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ArticleRepository {
    pool: SqlitePool,
}

impl ArticleRepository {
    /// Creates a new ArticleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ArticleRepository { pool }
    }

    /// Lists active articles sorted by description.
    pub async fn list_active(&self, limit: u32) -> DbResult<Vec<Article>> {
        let sql = format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles \
             WHERE is_active = 1 ORDER BY description LIMIT ?1"
        );

        let articles = sqlx::query_as::<_, Article>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(articles)
    }

    /// Searches active articles by barcode or description.
    pub async fn search(&self, query: &str, limit: u32) -> DbResult<Vec<Article>> {
        let query = query.trim();

        debug!(query = %query, limit = %limit, "Searching articles");

        if query.is_empty() {
            return self.list_active(limit).await;
        }

        let pattern = format!("%{query}%");
        let sql = format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles \
             WHERE is_active = 1 AND ( \
                 barcode LIKE ?1 \
                 OR description LIKE ?1 COLLATE NOCASE \
             ) \
             ORDER BY description LIMIT ?2"
        );

        let articles = sqlx::query_as::<_, Article>(&sql)
            .bind(&pattern)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = articles.len(), "Search returned articles");
        Ok(articles)
    }

    /// Gets an article by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Article>> {
        let sql = format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = ?1");

        let article = sqlx::query_as::<_, Article>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(article)
    }

    /// Gets an article by its barcode (the register's lookup path).
    pub async fn get_by_barcode(&self, barcode: &str) -> DbResult<Option<Article>> {
        let sql = format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE barcode = ?1");

        let article = sqlx::query_as::<_, Article>(&sql)
            .bind(barcode)
            .fetch_optional(&self.pool)
            .await?;

        Ok(article)
    }

    /// Lists active articles that track stock, for the low-stock report.
    pub async fn list_tracked(&self) -> DbResult<Vec<Article>> {
        let sql = format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles \
             WHERE is_active = 1 AND track_stock = 1 \
             ORDER BY description"
        );

        let articles = sqlx::query_as::<_, Article>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(articles)
    }

    /// Lists active articles carrying an expiration date, for the
    /// expiration report.
    pub async fn list_dated(&self) -> DbResult<Vec<Article>> {
        let sql = format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles \
             WHERE is_active = 1 AND expires_on IS NOT NULL \
             ORDER BY expires_on"
        );

        let articles = sqlx::query_as::<_, Article>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(articles)
    }

    /// Lists active articles in a category (used by delete guards too).
    pub async fn list_by_category(&self, category_id: &str) -> DbResult<Vec<Article>> {
        let sql = format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles \
             WHERE is_active = 1 AND category_id = ?1 \
             ORDER BY description"
        );

        let articles = sqlx::query_as::<_, Article>(&sql)
            .bind(category_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(articles)
    }

    /// Counts active articles in a category.
    pub async fn count_by_category(&self, category_id: &str) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM articles WHERE is_active = 1 AND category_id = ?1",
        )
        .bind(category_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Inserts a new article.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - barcode already exists
    pub async fn insert(&self, article: &Article) -> DbResult<()> {
        debug!(barcode = %article.barcode, "Inserting article");

        sqlx::query(
            r#"
            INSERT INTO articles (
                id, barcode, description, category_id, sale_unit,
                track_stock, stock_on_hand, stock_min, stock_max, expires_on,
                is_active, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5,
                ?6, ?7, ?8, ?9, ?10,
                ?11, ?12, ?13
            )
            "#,
        )
        .bind(&article.id)
        .bind(&article.barcode)
        .bind(&article.description)
        .bind(&article.category_id)
        .bind(article.sale_unit)
        .bind(article.track_stock)
        .bind(article.stock_on_hand)
        .bind(article.stock_min)
        .bind(article.stock_max)
        .bind(article.expires_on)
        .bind(article.is_active)
        .bind(article.created_at)
        .bind(article.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing article (everything except current stock).
    ///
    /// Stock only moves through [`ArticleRepository::update_stock`] so a
    /// stale form submit cannot silently revert an adjustment.
    pub async fn update(&self, article: &Article) -> DbResult<()> {
        debug!(id = %article.id, "Updating article");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE articles SET
                barcode = ?2,
                description = ?3,
                category_id = ?4,
                sale_unit = ?5,
                track_stock = ?6,
                stock_min = ?7,
                stock_max = ?8,
                expires_on = ?9,
                is_active = ?10,
                updated_at = ?11
            WHERE id = ?1
            "#,
        )
        .bind(&article.id)
        .bind(&article.barcode)
        .bind(&article.description)
        .bind(&article.category_id)
        .bind(article.sale_unit)
        .bind(article.track_stock)
        .bind(article.stock_min)
        .bind(article.stock_max)
        .bind(article.expires_on)
        .bind(article.is_active)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Article", &article.id));
        }

        Ok(())
    }

    /// Writes a new stock value computed by the stock rules.
    pub async fn update_stock(&self, id: &str, stock_thousandths: i64) -> DbResult<()> {
        debug!(id = %id, stock = %stock_thousandths, "Updating article stock");

        let now = Utc::now();

        let result =
            sqlx::query("UPDATE articles SET stock_on_hand = ?2, updated_at = ?3 WHERE id = ?1")
                .bind(id)
                .bind(stock_thousandths)
                .bind(now)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Article", id));
        }

        Ok(())
    }

    /// Soft-deletes an article by setting is_active = false.
    pub async fn soft_delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting article");

        let now = Utc::now();

        let result = sqlx::query("UPDATE articles SET is_active = 0, updated_at = ?2 WHERE id = ?1")
            .bind(id)
            .bind(now)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Article", id));
        }

        Ok(())
    }

    /// Permanently deletes an article and its dependent rows.
    ///
    /// Removes price entries and supplier links first, then the article,
    /// all inside one transaction. This is the data-hygiene path for rows
    /// created by mistake; normal removal is the soft delete.
    pub async fn delete_permanently(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Permanently deleting article");

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM price_entries WHERE article_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM article_suppliers WHERE article_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM articles WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            // Roll back the dependent deletes too
            tx.rollback().await?;
            return Err(DbError::not_found("Article", id));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Counts active articles (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles WHERE is_active = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
