//! # Customer Repository
//!
//! Database operations for customers and their store-credit balances.
//!
//! ## Balance Writes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The balance column is only ever written through update_balance(),     │
//! │  and only with a value computed by belleza-core::ledger. The           │
//! │  repository itself does not know what a valid balance is.              │
//! │                                                                         │
//! │  CustomerService ──apply_payment()──▶ new balance ──▶ update_balance() │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use belleza_core::Customer;

const CUSTOMER_COLUMNS: &str = "\
    id, customer_number, kind, name, last_name, document_number, \
    phone, email, address, \
    credit_enabled, credit_limit_type, credit_limit_cents, balance_cents, \
    payment_term_days, notes, is_active, created_at, updated_at";

/// Repository for customer database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CustomerRepository::new(pool);
///
/// let customer = repo.get_by_id("uuid-here").await?;
/// let results = repo.search("fernández", 20).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Lists active customers sorted by name.
    pub async fn list_active(&self, limit: u32) -> DbResult<Vec<Customer>> {
        let sql = format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers \
             WHERE is_active = 1 ORDER BY name, last_name LIMIT ?1"
        );

        let customers = sqlx::query_as::<_, Customer>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(customers)
    }

    /// Searches active customers by name, last name, document or number.
    ///
    /// LIKE with a contains pattern is fine here: a single store has
    /// hundreds of customers, not tens of thousands.
    pub async fn search(&self, query: &str, limit: u32) -> DbResult<Vec<Customer>> {
        let query = query.trim();

        debug!(query = %query, limit = %limit, "Searching customers");

        if query.is_empty() {
            return self.list_active(limit).await;
        }

        let pattern = format!("%{query}%");
        let sql = format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers \
             WHERE is_active = 1 AND ( \
                 name LIKE ?1 COLLATE NOCASE \
                 OR last_name LIKE ?1 COLLATE NOCASE \
                 OR document_number LIKE ?1 \
                 OR customer_number LIKE ?1 \
             ) \
             ORDER BY name, last_name LIMIT ?2"
        );

        let customers = sqlx::query_as::<_, Customer>(&sql)
            .bind(&pattern)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = customers.len(), "Search returned customers");
        Ok(customers)
    }

    /// Gets a customer by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Customer))` - Customer found
    /// * `Ok(None)` - Customer not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = ?1");

        let customer = sqlx::query_as::<_, Customer>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer)
    }

    /// Gets a customer by its business number (e.g. "CLI000042").
    pub async fn get_by_number(&self, number: &str) -> DbResult<Option<Customer>> {
        let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE customer_number = ?1");

        let customer = sqlx::query_as::<_, Customer>(&sql)
            .bind(number)
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer)
    }

    /// Gets a customer by its document number.
    pub async fn get_by_document(&self, document: &str) -> DbResult<Option<Customer>> {
        let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE document_number = ?1");

        let customer = sqlx::query_as::<_, Customer>(&sql)
            .bind(document)
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer)
    }

    /// Checks whether a business number is already taken.
    pub async fn exists_by_number(&self, number: &str) -> DbResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM customers WHERE customer_number = ?1)")
                .bind(number)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// Checks whether a document number is already registered.
    pub async fn exists_by_document(&self, document: &str) -> DbResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM customers WHERE document_number = ?1)")
                .bind(document)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// Checks whether an email address is already registered.
    pub async fn exists_by_email(&self, email: &str) -> DbResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM customers WHERE email = ?1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// Lists customers whose credit account is enabled.
    ///
    /// Used by the credit standing report; classification happens in the
    /// service with belleza-core.
    pub async fn list_with_credit(&self) -> DbResult<Vec<Customer>> {
        let sql = format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers \
             WHERE is_active = 1 AND credit_enabled = 1 \
             ORDER BY balance_cents DESC"
        );

        let customers = sqlx::query_as::<_, Customer>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(customers)
    }

    /// Lists limited credit accounts whose balance exceeds the limit.
    pub async fn list_over_limit(&self) -> DbResult<Vec<Customer>> {
        let sql = format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers \
             WHERE is_active = 1 AND credit_enabled = 1 \
               AND credit_limit_type = 'limited' \
               AND balance_cents > credit_limit_cents \
             ORDER BY balance_cents DESC"
        );

        let customers = sqlx::query_as::<_, Customer>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(customers)
    }

    /// Lists credit accounts that still owe something.
    pub async fn list_with_pending_balance(&self) -> DbResult<Vec<Customer>> {
        let sql = format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers \
             WHERE is_active = 1 AND credit_enabled = 1 AND balance_cents > 0 \
             ORDER BY balance_cents DESC"
        );

        let customers = sqlx::query_as::<_, Customer>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(customers)
    }

    /// Inserts a new customer.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - customer_number already exists
    pub async fn insert(&self, customer: &Customer) -> DbResult<()> {
        debug!(id = %customer.id, "Inserting customer");

        sqlx::query(
            r#"
            INSERT INTO customers (
                id, customer_number, kind, name, last_name, document_number,
                phone, email, address,
                credit_enabled, credit_limit_type, credit_limit_cents, balance_cents,
                payment_term_days, notes, is_active, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6,
                ?7, ?8, ?9,
                ?10, ?11, ?12, ?13,
                ?14, ?15, ?16, ?17, ?18
            )
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.customer_number)
        .bind(customer.kind)
        .bind(&customer.name)
        .bind(&customer.last_name)
        .bind(&customer.document_number)
        .bind(&customer.phone)
        .bind(&customer.email)
        .bind(&customer.address)
        .bind(customer.credit_enabled)
        .bind(customer.credit_limit_type)
        .bind(customer.credit_limit_cents)
        .bind(customer.balance_cents)
        .bind(customer.payment_term_days)
        .bind(&customer.notes)
        .bind(customer.is_active)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing customer (everything except the balance).
    ///
    /// The balance column is deliberately excluded: it only moves through
    /// [`CustomerRepository::update_balance`].
    pub async fn update(&self, customer: &Customer) -> DbResult<()> {
        debug!(id = %customer.id, "Updating customer");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE customers SET
                customer_number = ?2,
                kind = ?3,
                name = ?4,
                last_name = ?5,
                document_number = ?6,
                phone = ?7,
                email = ?8,
                address = ?9,
                credit_enabled = ?10,
                credit_limit_type = ?11,
                credit_limit_cents = ?12,
                payment_term_days = ?13,
                notes = ?14,
                is_active = ?15,
                updated_at = ?16
            WHERE id = ?1
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.customer_number)
        .bind(customer.kind)
        .bind(&customer.name)
        .bind(&customer.last_name)
        .bind(&customer.document_number)
        .bind(&customer.phone)
        .bind(&customer.email)
        .bind(&customer.address)
        .bind(customer.credit_enabled)
        .bind(customer.credit_limit_type)
        .bind(customer.credit_limit_cents)
        .bind(customer.payment_term_days)
        .bind(&customer.notes)
        .bind(customer.is_active)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", &customer.id));
        }

        Ok(())
    }

    /// Writes a new balance computed by the credit ledger.
    pub async fn update_balance(&self, id: &str, balance_cents: i64) -> DbResult<()> {
        debug!(id = %id, balance_cents = %balance_cents, "Updating customer balance");

        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE customers SET balance_cents = ?2, updated_at = ?3 WHERE id = ?1",
        )
        .bind(id)
        .bind(balance_cents)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }

    /// Flips a customer's active flag (soft delete and reactivation).
    ///
    /// ## Why Soft Delete?
    /// - The credit balance and its history must survive
    /// - Can be restored if deactivated by mistake
    pub async fn set_active(&self, id: &str, active: bool) -> DbResult<()> {
        debug!(id = %id, active = %active, "Setting customer active flag");

        let now = Utc::now();

        let result =
            sqlx::query("UPDATE customers SET is_active = ?2, updated_at = ?3 WHERE id = ?1")
                .bind(id)
                .bind(active)
                .bind(now)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }

    /// Permanently deletes a customer row.
    ///
    /// The data-hygiene path for rows created by mistake. The service
    /// layer is the only caller; normal removal is the soft delete.
    pub async fn delete_permanently(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Permanently deleting customer");

        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }

    /// Counts all customers, active or not.
    ///
    /// Used for generating the next customer number, so it must include
    /// soft-deleted rows or numbers would repeat.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
