//! # Customer Service
//!
//! Customer registration and store-credit account operations.
//!
//! ## Credit Movements
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  register_payment / register_sale                                       │
//! │                                                                         │
//! │  Load customer ── missing? ──▶ DbError::NotFound                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ledger::apply_payment / apply_sale                                    │
//! │       ├── credit disabled ──▶ CoreError::CreditDisabled                │
//! │       ├── over the limit  ──▶ CoreError::CreditLimitExceeded           │
//! │       ▼                                                                 │
//! │  update_balance(new balance) ──▶ Ok(new balance)                       │
//! │                                                                         │
//! │  Single-store, single-writer assumption: the read and the write are    │
//! │  two statements, not one compare-and-swap.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::error::{DbError, ServiceResult};
use crate::pool::Database;
use crate::repository::generate_id;
use belleza_core::ledger;
use belleza_core::validation::{validate_credit_limit_cents, validate_name};
use belleza_core::{
    CreditLimitType, CreditSummary, Customer, CustomerKind, Money, ValidationError,
    CUSTOMER_NUMBER_PREFIX,
};

/// Input for registering a new customer.
///
/// The customer number is always generated by the service; the balance
/// starts at zero.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCustomer {
    pub kind: CustomerKind,
    pub name: String,
    pub last_name: Option<String>,
    pub document_number: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub credit_enabled: bool,
    pub credit_limit_type: CreditLimitType,
    pub credit_limit_cents: i64,
    pub payment_term_days: i64,
    pub notes: Option<String>,
}

/// Customer operations with credit-ledger rules applied.
#[derive(Debug, Clone)]
pub struct CustomerService {
    db: Database,
}

impl CustomerService {
    /// Creates a new CustomerService.
    pub fn new(db: Database) -> Self {
        CustomerService { db }
    }

    /// Registers a new customer, generating the business number.
    ///
    /// Numbers are sequential over the full row count (soft-deleted rows
    /// included): CLI000001, CLI000002, ...
    ///
    /// ## Checks
    /// - Name presence, non-negative credit limit
    /// - Document number and email uniqueness, when provided
    pub async fn create(&self, input: NewCustomer) -> ServiceResult<Customer> {
        validate_name(&input.name)?;
        validate_credit_limit_cents(input.credit_limit_cents)?;

        if let Some(document) = &input.document_number {
            if self.db.customers().exists_by_document(document).await? {
                return Err(ValidationError::Duplicate {
                    field: "document_number".to_string(),
                    value: document.clone(),
                }
                .into());
            }
        }

        if let Some(email) = &input.email {
            if self.db.customers().exists_by_email(email).await? {
                return Err(ValidationError::Duplicate {
                    field: "email".to_string(),
                    value: email.clone(),
                }
                .into());
            }
        }

        let count = self.db.customers().count().await?;
        let customer_number = format!("{CUSTOMER_NUMBER_PREFIX}{:06}", count + 1);

        let now = Utc::now();
        let customer = Customer {
            id: generate_id(),
            customer_number: Some(customer_number),
            kind: input.kind,
            name: input.name.trim().to_string(),
            last_name: input.last_name,
            document_number: input.document_number,
            phone: input.phone,
            email: input.email,
            address: input.address,
            credit_enabled: input.credit_enabled,
            credit_limit_type: input.credit_limit_type,
            credit_limit_cents: input.credit_limit_cents,
            balance_cents: 0,
            payment_term_days: input.payment_term_days,
            notes: input.notes,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        self.db.customers().insert(&customer).await?;

        info!(
            id = %customer.id,
            number = %customer.customer_number.as_deref().unwrap_or(""),
            "Customer registered"
        );

        Ok(customer)
    }

    /// Records a payment against a customer's credit balance.
    ///
    /// Returns the new balance. An overpayment clamps to zero.
    pub async fn register_payment(&self, id: &str, amount_cents: i64) -> ServiceResult<Money> {
        let customer = self.load(id).await?;

        let new_balance = ledger::apply_payment(&customer, Money::from_cents(amount_cents))?;
        self.db
            .customers()
            .update_balance(id, new_balance.cents())
            .await?;

        info!(
            customer_id = %id,
            amount_cents = %amount_cents,
            new_balance_cents = %new_balance.cents(),
            "Payment registered"
        );

        Ok(new_balance)
    }

    /// Records a credit sale against a customer's balance.
    ///
    /// Returns the new balance, or rejects when a limited account would
    /// exceed its limit.
    pub async fn register_sale(&self, id: &str, amount_cents: i64) -> ServiceResult<Money> {
        let customer = self.load(id).await?;

        let new_balance = ledger::apply_sale(&customer, Money::from_cents(amount_cents))?;
        self.db
            .customers()
            .update_balance(id, new_balance.cents())
            .await?;

        info!(
            customer_id = %id,
            amount_cents = %amount_cents,
            new_balance_cents = %new_balance.cents(),
            "Credit sale registered"
        );

        Ok(new_balance)
    }

    /// Returns a customer's available credit and standing.
    pub async fn credit_summary(&self, id: &str) -> ServiceResult<CreditSummary> {
        let customer = self.load(id).await?;
        Ok(ledger::credit_summary(&customer))
    }

    /// Lists all credit accounts with their computed standing, worst
    /// balances first.
    pub async fn credit_report(&self) -> ServiceResult<Vec<(Customer, CreditSummary)>> {
        let customers = self.db.customers().list_with_credit().await?;

        Ok(customers
            .into_iter()
            .map(|c| {
                let summary = ledger::credit_summary(&c);
                (c, summary)
            })
            .collect())
    }

    /// Lists limited accounts whose balance exceeds the limit, worst
    /// first.
    ///
    /// A limit lowered after sales were recorded is how an account ends
    /// up here; `register_sale` itself never lets one through.
    pub async fn over_limit_accounts(&self) -> ServiceResult<Vec<(Customer, CreditSummary)>> {
        let customers = self.db.customers().list_over_limit().await?;

        Ok(customers
            .into_iter()
            .map(|c| {
                let summary = ledger::credit_summary(&c);
                (c, summary)
            })
            .collect())
    }

    /// Lists credit accounts that still owe something, largest debt
    /// first.
    pub async fn pending_balance_accounts(&self) -> ServiceResult<Vec<(Customer, CreditSummary)>> {
        let customers = self.db.customers().list_with_pending_balance().await?;

        Ok(customers
            .into_iter()
            .map(|c| {
                let summary = ledger::credit_summary(&c);
                (c, summary)
            })
            .collect())
    }

    /// Deactivates or reactivates a customer.
    pub async fn set_active(&self, id: &str, active: bool) -> ServiceResult<()> {
        self.db.customers().set_active(id, active).await?;

        info!(customer_id = %id, active = %active, "Customer active flag changed");
        Ok(())
    }

    /// Permanently deletes a customer row.
    pub async fn delete_permanently(&self, id: &str) -> ServiceResult<()> {
        // Load first so a missing id reports as Customer, not Record
        self.load(id).await?;
        self.db.customers().delete_permanently(id).await?;

        info!(customer_id = %id, "Customer permanently deleted");
        Ok(())
    }

    async fn load(&self, id: &str) -> ServiceResult<Customer> {
        self.db
            .customers()
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Customer", id).into())
    }
}

// =============================================================================
// Integration Tests (in-memory SQLite)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::pool::DbConfig;
    use belleza_core::{CoreError, CreditState};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn credit_customer(limit_cents: i64) -> NewCustomer {
        NewCustomer {
            kind: CustomerKind::Individual,
            name: "Lucía".to_string(),
            last_name: Some("Fernández".to_string()),
            document_number: None,
            phone: None,
            email: None,
            address: None,
            credit_enabled: true,
            credit_limit_type: CreditLimitType::Limited,
            credit_limit_cents: limit_cents,
            payment_term_days: 30,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_generates_sequential_numbers() {
        let db = test_db().await;
        let service = db.customer_service();

        let first = service.create(credit_customer(100_000)).await.unwrap();
        let second = service.create(credit_customer(100_000)).await.unwrap();

        assert_eq!(first.customer_number.as_deref(), Some("CLI000001"));
        assert_eq!(second.customer_number.as_deref(), Some("CLI000002"));
        assert_eq!(first.balance_cents, 0);
    }

    #[tokio::test]
    async fn test_sale_and_payment_move_the_balance() {
        let db = test_db().await;
        let service = db.customer_service();
        let customer = service.create(credit_customer(100_000)).await.unwrap();

        let balance = service.register_sale(&customer.id, 45_000).await.unwrap();
        assert_eq!(balance, Money::from_cents(45_000));

        let balance = service.register_payment(&customer.id, 20_000).await.unwrap();
        assert_eq!(balance, Money::from_cents(25_000));

        // Persisted, not just returned
        let reloaded = db.customers().get_by_id(&customer.id).await.unwrap().unwrap();
        assert_eq!(reloaded.balance_cents, 25_000);
    }

    #[tokio::test]
    async fn test_sale_over_limit_is_rejected_and_not_persisted() {
        let db = test_db().await;
        let service = db.customer_service();
        let customer = service.create(credit_customer(100_000)).await.unwrap();

        service.register_sale(&customer.id, 90_000).await.unwrap();

        let err = service.register_sale(&customer.id, 20_000).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Business(CoreError::CreditLimitExceeded { .. })
        ));

        let reloaded = db.customers().get_by_id(&customer.id).await.unwrap().unwrap();
        assert_eq!(reloaded.balance_cents, 90_000);
    }

    #[tokio::test]
    async fn test_overpayment_clamps_to_zero() {
        let db = test_db().await;
        let service = db.customer_service();
        let customer = service.create(credit_customer(100_000)).await.unwrap();

        service.register_sale(&customer.id, 30_000).await.unwrap();
        let balance = service.register_payment(&customer.id, 50_000).await.unwrap();

        assert_eq!(balance, Money::zero());
    }

    #[tokio::test]
    async fn test_payment_on_missing_customer_is_not_found() {
        let db = test_db().await;
        let service = db.customer_service();

        let err = service
            .register_payment("no-such-customer", 1000)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Db(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_payment_on_disabled_account_is_rejected() {
        let db = test_db().await;
        let service = db.customer_service();

        let mut input = credit_customer(0);
        input.credit_enabled = false;
        let customer = service.create(input).await.unwrap();

        let err = service.register_payment(&customer.id, 1000).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Business(CoreError::CreditDisabled(_))
        ));
    }

    #[tokio::test]
    async fn test_credit_summary_and_report() {
        let db = test_db().await;
        let service = db.customer_service();
        let customer = service.create(credit_customer(100_000)).await.unwrap();

        service.register_sale(&customer.id, 85_000).await.unwrap();

        let summary = service.credit_summary(&customer.id).await.unwrap();
        assert_eq!(summary.state, CreditState::Warning);
        assert_eq!(summary.available, Money::from_cents(15_000));

        let report = service.credit_report().await.unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].1.state, CreditState::Warning);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_document() {
        let db = test_db().await;
        let service = db.customer_service();

        let mut first = credit_customer(100_000);
        first.document_number = Some("30123456".to_string());
        service.create(first).await.unwrap();

        let mut second = credit_customer(100_000);
        second.document_number = Some("30123456".to_string());

        let err = service.create(second).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Business(CoreError::Validation(
                belleza_core::ValidationError::Duplicate { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn test_lookup_by_document_and_number() {
        let db = test_db().await;
        let service = db.customer_service();

        let mut input = credit_customer(100_000);
        input.document_number = Some("30123456".to_string());
        let customer = service.create(input).await.unwrap();

        let found = db.customers().get_by_document("30123456").await.unwrap().unwrap();
        assert_eq!(found.id, customer.id);

        assert!(db.customers().exists_by_number("CLI000001").await.unwrap());
        assert!(!db.customers().exists_by_number("CLI000099").await.unwrap());
    }

    #[tokio::test]
    async fn test_over_limit_and_pending_balance_reports() {
        let db = test_db().await;
        let service = db.customer_service();

        // Owes nothing
        service.create(credit_customer(100_000)).await.unwrap();

        // Owes within the limit
        let debtor = service.create(credit_customer(100_000)).await.unwrap();
        service.register_sale(&debtor.id, 30_000).await.unwrap();

        // Sale was within the limit, then the limit was lowered
        let over = service.create(credit_customer(200_000)).await.unwrap();
        service.register_sale(&over.id, 150_000).await.unwrap();
        let mut shrunk = db.customers().get_by_id(&over.id).await.unwrap().unwrap();
        shrunk.credit_limit_cents = 100_000;
        db.customers().update(&shrunk).await.unwrap();

        let over_limit = service.over_limit_accounts().await.unwrap();
        assert_eq!(over_limit.len(), 1);
        assert_eq!(over_limit[0].0.id, over.id);
        assert_eq!(over_limit[0].1.state, CreditState::Exceeded);

        let pending = service.pending_balance_accounts().await.unwrap();
        assert_eq!(pending.len(), 2);
        // Largest debt first
        assert_eq!(pending[0].0.id, over.id);
        assert_eq!(pending[1].0.id, debtor.id);
    }

    #[tokio::test]
    async fn test_set_active_round_trip() {
        let db = test_db().await;
        let service = db.customer_service();
        let customer = service.create(credit_customer(100_000)).await.unwrap();

        service.set_active(&customer.id, false).await.unwrap();
        assert!(db.customers().list_active(10).await.unwrap().is_empty());

        service.set_active(&customer.id, true).await.unwrap();
        assert_eq!(db.customers().list_active(10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_permanently_removes_the_row() {
        let db = test_db().await;
        let service = db.customer_service();
        let customer = service.create(credit_customer(100_000)).await.unwrap();

        service.delete_permanently(&customer.id).await.unwrap();

        assert!(db.customers().get_by_id(&customer.id).await.unwrap().is_none());
    }
}
