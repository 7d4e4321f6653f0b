//! # Supplier Repository
//!
//! Database operations for suppliers and article-supplier links.
//!
//! ## Article Links
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  article_suppliers holds the negotiated cost per (article, supplier)   │
//! │  pair. At most one link per article is the default supplier;           │
//! │  set_default_link() enforces that transactionally, same shape as       │
//! │  the price-list default flag.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use belleza_core::{ArticleSupplier, Supplier};

const SUPPLIER_COLUMNS: &str = "\
    id, supplier_number, legal_name, trade_name, tax_id, \
    phone, email, contact_name, notes, is_active, created_at, updated_at";

const LINK_COLUMNS: &str = "\
    id, article_id, supplier_id, cost_cents, is_default, updated_at";

/// Repository for supplier database operations.
#[derive(Debug, Clone)]
pub struct SupplierRepository {
    pool: SqlitePool,
}

impl SupplierRepository {
    /// Creates a new SupplierRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SupplierRepository { pool }
    }

    /// Lists active suppliers sorted by legal name.
    pub async fn list_active(&self) -> DbResult<Vec<Supplier>> {
        let sql = format!(
            "SELECT {SUPPLIER_COLUMNS} FROM suppliers \
             WHERE is_active = 1 ORDER BY legal_name"
        );

        let suppliers = sqlx::query_as::<_, Supplier>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(suppliers)
    }

    /// Gets a supplier by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Supplier>> {
        let sql = format!("SELECT {SUPPLIER_COLUMNS} FROM suppliers WHERE id = ?1");

        let supplier = sqlx::query_as::<_, Supplier>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(supplier)
    }

    /// Gets a supplier by its fiscal identifier (CUIT).
    pub async fn get_by_tax_id(&self, tax_id: &str) -> DbResult<Option<Supplier>> {
        let sql = format!("SELECT {SUPPLIER_COLUMNS} FROM suppliers WHERE tax_id = ?1");

        let supplier = sqlx::query_as::<_, Supplier>(&sql)
            .bind(tax_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(supplier)
    }

    /// Inserts a new supplier.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - tax_id or supplier_number exists
    pub async fn insert(&self, supplier: &Supplier) -> DbResult<()> {
        debug!(legal_name = %supplier.legal_name, "Inserting supplier");

        sqlx::query(
            r#"
            INSERT INTO suppliers (
                id, supplier_number, legal_name, trade_name, tax_id,
                phone, email, contact_name, notes, is_active, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5,
                ?6, ?7, ?8, ?9, ?10, ?11, ?12
            )
            "#,
        )
        .bind(&supplier.id)
        .bind(&supplier.supplier_number)
        .bind(&supplier.legal_name)
        .bind(&supplier.trade_name)
        .bind(&supplier.tax_id)
        .bind(&supplier.phone)
        .bind(&supplier.email)
        .bind(&supplier.contact_name)
        .bind(&supplier.notes)
        .bind(supplier.is_active)
        .bind(supplier.created_at)
        .bind(supplier.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing supplier.
    pub async fn update(&self, supplier: &Supplier) -> DbResult<()> {
        debug!(id = %supplier.id, "Updating supplier");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE suppliers SET
                supplier_number = ?2,
                legal_name = ?3,
                trade_name = ?4,
                tax_id = ?5,
                phone = ?6,
                email = ?7,
                contact_name = ?8,
                notes = ?9,
                is_active = ?10,
                updated_at = ?11
            WHERE id = ?1
            "#,
        )
        .bind(&supplier.id)
        .bind(&supplier.supplier_number)
        .bind(&supplier.legal_name)
        .bind(&supplier.trade_name)
        .bind(&supplier.tax_id)
        .bind(&supplier.phone)
        .bind(&supplier.email)
        .bind(&supplier.contact_name)
        .bind(&supplier.notes)
        .bind(supplier.is_active)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Supplier", &supplier.id));
        }

        Ok(())
    }

    /// Soft-deletes a supplier by setting is_active = false.
    pub async fn soft_delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting supplier");

        let now = Utc::now();

        let result = sqlx::query("UPDATE suppliers SET is_active = 0, updated_at = ?2 WHERE id = ?1")
            .bind(id)
            .bind(now)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Supplier", id));
        }

        Ok(())
    }

    /// Counts all suppliers, active or not.
    ///
    /// Used for generating the next supplier number, so it must include
    /// soft-deleted rows or numbers would repeat.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM suppliers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // -------------------------------------------------------------------------
    // Article-supplier links
    // -------------------------------------------------------------------------

    /// Lists an article's supplier links, default first.
    pub async fn list_links_for_article(&self, article_id: &str) -> DbResult<Vec<ArticleSupplier>> {
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM article_suppliers \
             WHERE article_id = ?1 ORDER BY is_default DESC"
        );

        let links = sqlx::query_as::<_, ArticleSupplier>(&sql)
            .bind(article_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(links)
    }

    /// Gets one article-supplier link.
    pub async fn get_link(
        &self,
        article_id: &str,
        supplier_id: &str,
    ) -> DbResult<Option<ArticleSupplier>> {
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM article_suppliers \
             WHERE article_id = ?1 AND supplier_id = ?2"
        );

        let link = sqlx::query_as::<_, ArticleSupplier>(&sql)
            .bind(article_id)
            .bind(supplier_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(link)
    }

    /// Inserts or updates an article-supplier link with the negotiated cost.
    ///
    /// On an existing pair only the cost is touched: the default flag
    /// moves exclusively through [`SupplierRepository::set_default_link`],
    /// so re-negotiating a cost cannot strip an article of its default
    /// supplier.
    pub async fn upsert_link(&self, link: &ArticleSupplier) -> DbResult<()> {
        debug!(
            article_id = %link.article_id,
            supplier_id = %link.supplier_id,
            cost_cents = %link.cost_cents,
            "Upserting article-supplier link"
        );

        sqlx::query(
            r#"
            INSERT INTO article_suppliers (
                id, article_id, supplier_id, cost_cents, is_default, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT (article_id, supplier_id) DO UPDATE SET
                cost_cents = excluded.cost_cents,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&link.id)
        .bind(&link.article_id)
        .bind(&link.supplier_id)
        .bind(link.cost_cents)
        .bind(link.is_default)
        .bind(link.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Makes one supplier the article's default, clearing any previous one.
    pub async fn set_default_link(&self, article_id: &str, supplier_id: &str) -> DbResult<()> {
        debug!(
            article_id = %article_id,
            supplier_id = %supplier_id,
            "Setting default supplier"
        );

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "UPDATE article_suppliers SET is_default = 0, updated_at = ?2 \
             WHERE article_id = ?1 AND is_default = 1",
        )
        .bind(article_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query(
            "UPDATE article_suppliers SET is_default = 1, updated_at = ?3 \
             WHERE article_id = ?1 AND supplier_id = ?2",
        )
        .bind(article_id)
        .bind(supplier_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(DbError::not_found(
                "ArticleSupplier",
                format!("{article_id}/{supplier_id}"),
            ));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Removes an article-supplier link.
    pub async fn delete_link(&self, article_id: &str, supplier_id: &str) -> DbResult<()> {
        debug!(
            article_id = %article_id,
            supplier_id = %supplier_id,
            "Deleting article-supplier link"
        );

        sqlx::query("DELETE FROM article_suppliers WHERE article_id = ?1 AND supplier_id = ?2")
            .bind(article_id)
            .bind(supplier_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
