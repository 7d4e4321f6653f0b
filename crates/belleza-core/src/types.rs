//! # Domain Types
//!
//! Core domain types used throughout Belleza POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐   │
//! │  │    Customer     │   │     Article     │   │   PriceEntry    │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │   │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  article_id     │   │
//! │  │  customer_number│   │  barcode        │   │  price_list_id  │   │
//! │  │  balance_cents  │   │  stock_on_hand  │   │  sale_price     │   │
//! │  │  credit_limit   │   │  expires_on     │   │  cost_cents     │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘   │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐   │
//! │  │ CreditLimitType │   │   StockLevel    │   │ ExpirationState │   │
//! │  │  Limited        │   │  Untracked      │   │  Expired        │   │
//! │  │  Unlimited      │   │  Empty/Critical │   │  Critical       │   │
//! │  └─────────────────┘   │  Low/Ok         │   │  Upcoming/Ok    │   │
//! │                        └─────────────────┘   └─────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - Business ID where the domain has one (barcode, customer number,
//!   tax id) - human-readable, unique, potentially mutable
//!
//! ## Soft Delete
//! Entities are never removed by normal deletion; the `is_active` flag is
//! flipped instead. Physical removal only happens through the explicit
//! permanent-delete operations, which check dependent rows first.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;
use crate::quantity::Quantity;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 2100 bps = 21% (the flat VAT surcharge)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Customer
// =============================================================================

/// Customer account kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum CustomerKind {
    Individual,
    Company,
}

impl Default for CustomerKind {
    fn default() -> Self {
        CustomerKind::Individual
    }
}

/// Governs how a customer's store-credit limit is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum CreditLimitType {
    /// Sales are rejected once the balance would exceed `credit_limit`.
    Limited,
    /// No limit is enforced; available credit reports as [`Money::MAX`].
    Unlimited,
}

impl Default for CreditLimitType {
    fn default() -> Self {
        CreditLimitType::Limited
    }
}

/// Computed credit standing of a customer account.
///
/// Never persisted; derived from balance and limit on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditState {
    /// Store-credit feature is not enabled for this customer.
    NoAccount,
    /// Unlimited credit type; never exceeded.
    Unlimited,
    /// Balance is above the credit limit.
    Exceeded,
    /// Balance is above 80% of the credit limit (strictly).
    Warning,
    /// Balance is within the comfortable range.
    Normal,
}

/// A customer, optionally carrying a store-credit account.
///
/// ## Credit Account Invariant (soft)
/// `balance_cents` should not exceed `credit_limit_cents` when the limit
/// type is [`CreditLimitType::Limited`], but this is only checked at the
/// moment a sale is recorded - not guaranteed under concurrent writers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Business identifier, e.g. "CLI000042". Generated when absent.
    pub customer_number: Option<String>,

    /// Individual or company account.
    pub kind: CustomerKind,

    /// First name (individuals) or company name.
    pub name: String,

    /// Last name, individuals only.
    pub last_name: Option<String>,

    /// National identity or tax document number.
    pub document_number: Option<String>,

    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,

    /// Whether the store-credit feature is enabled for this customer.
    pub credit_enabled: bool,

    /// Limited or unlimited credit.
    pub credit_limit_type: CreditLimitType,

    /// Credit limit in cents. Ignored when the type is unlimited.
    pub credit_limit_cents: i64,

    /// Running balance in cents (what the customer owes the store).
    pub balance_cents: i64,

    /// Agreed payment term in days.
    pub payment_term_days: i64,

    pub notes: Option<String>,

    /// Soft-delete flag.
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Returns the running balance as Money.
    #[inline]
    pub fn balance(&self) -> Money {
        Money::from_cents(self.balance_cents)
    }

    /// Returns the credit limit as Money.
    #[inline]
    pub fn credit_limit(&self) -> Money {
        Money::from_cents(self.credit_limit_cents)
    }

    /// Full display name: "name last_name" or just the name.
    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) if !last.is_empty() => format!("{} {}", self.name, last),
            _ => self.name.clone(),
        }
    }
}

/// Computed credit view of a customer: available credit plus standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CreditSummary {
    pub available: Money,
    pub state: CreditState,
}

// =============================================================================
// Article
// =============================================================================

/// How an article is sold: by unit or by weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum SaleUnit {
    Unit,
    Weight,
}

impl Default for SaleUnit {
    fn default() -> Self {
        SaleUnit::Unit
    }
}

/// Computed stock standing of an article.
///
/// ## Boundary Semantics (intentional)
/// Stock exactly equal to the minimum reads as `Low`, not `Ok` and not
/// `Critical`. The tie-break is equality-based, not `<=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    /// Article does not track stock.
    Untracked,
    /// Stock is exactly zero.
    Empty,
    /// Stock is strictly below the minimum.
    Critical,
    /// Stock is exactly at the minimum.
    Low,
    /// Stock is above the minimum.
    Ok,
}

/// Computed expiration standing of an article, relative to a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpirationState {
    /// Expiration date is in the past.
    Expired,
    /// Expires within 0..=7 days.
    Critical,
    /// Expires within 8..=30 days.
    Upcoming,
    /// More than 30 days away.
    Ok,
}

/// The kind of stock adjustment to apply.
///
/// A closed enum: there is no "unknown kind" at this level. Textual
/// adjustment kinds from an outer surface are parsed with [`FromStr`],
/// which rejects anything unrecognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockAdjustmentKind {
    /// Add the quantity to current stock (goods received).
    Increase,
    /// Subtract the quantity from current stock (shrinkage, returns out).
    Decrease,
    /// Replace current stock with the quantity (physical recount).
    Set,
}

impl StockAdjustmentKind {
    /// Canonical lowercase name, matching the serde representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            StockAdjustmentKind::Increase => "increase",
            StockAdjustmentKind::Decrease => "decrease",
            StockAdjustmentKind::Set => "set",
        }
    }
}

impl FromStr for StockAdjustmentKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "increase" => Ok(StockAdjustmentKind::Increase),
            "decrease" => Ok(StockAdjustmentKind::Decrease),
            "set" => Ok(StockAdjustmentKind::Set),
            _ => Err(ValidationError::NotAllowed {
                field: "adjustment_kind".to_string(),
                allowed: vec!["increase".into(), "decrease".into(), "set".into()],
            }),
        }
    }
}

/// A sellable article (product).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Article {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Unique barcode (EAN-13, UPC-A, or internal code).
    pub barcode: String,

    /// Display description shown at the register.
    pub description: String,

    /// Optional category reference.
    pub category_id: Option<String>,

    /// Sold by unit or by weight.
    pub sale_unit: SaleUnit,

    /// Whether min/max/current stock semantics apply.
    pub track_stock: bool,

    /// Current stock in thousandths of a unit.
    pub stock_on_hand: i64,

    /// Minimum stock threshold in thousandths.
    pub stock_min: i64,

    /// Maximum stock threshold in thousandths.
    pub stock_max: i64,

    /// Expiration date, when the article has one.
    pub expires_on: Option<NaiveDate>,

    /// Soft-delete flag.
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Returns the current stock as a Quantity.
    #[inline]
    pub fn stock(&self) -> Quantity {
        Quantity::from_thousandths(self.stock_on_hand)
    }

    /// Returns the minimum stock threshold as a Quantity.
    #[inline]
    pub fn min_stock(&self) -> Quantity {
        Quantity::from_thousandths(self.stock_min)
    }

    /// Returns the maximum stock threshold as a Quantity.
    #[inline]
    pub fn max_stock(&self) -> Quantity {
        Quantity::from_thousandths(self.stock_max)
    }
}

/// Low-stock report row: an article at or below its minimum.
#[derive(Debug, Clone, Serialize)]
pub struct LowStockAlert {
    pub article_id: String,
    pub barcode: String,
    pub description: String,
    pub stock_on_hand: Quantity,
    pub stock_min: Quantity,
    /// How far below minimum the stock is (`min - on_hand`, may be zero).
    pub shortfall: Quantity,
    pub level: StockLevel,
}

/// Expiration report row: an article with an expiration date in scope.
#[derive(Debug, Clone, Serialize)]
pub struct ExpirationAlert {
    pub article_id: String,
    pub barcode: String,
    pub description: String,
    pub expires_on: NaiveDate,
    /// Days until expiration; negative once expired.
    pub days_remaining: i64,
    pub stock_on_hand: Quantity,
    pub state: ExpirationState,
}

// =============================================================================
// Pricing
// =============================================================================

/// A named set of sale prices. Exactly one list may be marked default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PriceList {
    pub id: String,
    /// Unique list name, e.g. "Counter", "Wholesale".
    pub name: String,
    pub description: Option<String>,
    /// At most one list is the default; enforced by the service layer.
    pub is_default: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The price of one article on one price list.
///
/// Unique per `(article_id, price_list_id)` pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PriceEntry {
    pub id: String,
    pub article_id: String,
    pub price_list_id: String,
    /// Purchase cost in cents.
    pub cost_cents: i64,
    /// Sale price in cents; validated positive on write.
    pub sale_price_cents: i64,
    /// Profit margin over cost, in basis points (2500 = 25.00%).
    pub profit_margin_bps: i64,
    /// Refreshed on every price write.
    pub updated_at: DateTime<Utc>,
}

impl PriceEntry {
    /// Returns the purchase cost as Money.
    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_cents(self.cost_cents)
    }

    /// Returns the net sale price as Money.
    #[inline]
    pub fn sale_price(&self) -> Money {
        Money::from_cents(self.sale_price_cents)
    }
}

// =============================================================================
// Supplier
// =============================================================================

/// A goods supplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Supplier {
    pub id: String,
    /// Business identifier, e.g. "PRV000007".
    pub supplier_number: Option<String>,
    pub legal_name: String,
    pub trade_name: Option<String>,
    /// Unique fiscal identifier (CUIT).
    pub tax_id: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub contact_name: Option<String>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Links an article to a supplier with the negotiated cost.
///
/// Unique per `(article_id, supplier_id)`; at most one link per article
/// is flagged default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ArticleSupplier {
    pub id: String,
    pub article_id: String,
    pub supplier_id: String,
    /// Cost agreed with this supplier, in cents.
    pub cost_cents: i64,
    /// Whether this is the article's default supplier.
    pub is_default: bool,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Category
// =============================================================================

/// A product category (beauty retail: skincare, haircare, makeup, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: String,
    /// Unique category name.
    pub name: String,
    pub description: Option<String>,
    /// Category VAT rate in basis points. Stored but not consulted by
    /// price formatting, which uses the flat [`crate::VAT_RATE_BPS`].
    pub vat_bps: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Returns the category VAT rate.
    #[inline]
    pub fn vat_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.vat_bps as u32)
    }
}

// =============================================================================
// Branch
// =============================================================================

/// A store branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Branch {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// User
// =============================================================================

/// Application role. Closed enum with exhaustive matching - no string
/// parsing with exception fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Manager,
    Cashier,
    Salesperson,
}

/// A backoffice/register user.
///
/// Authentication (token issuance, password hashing) happens in an outer
/// layer; the hash is stored here as an opaque string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: String,
    /// Unique login name.
    pub username: String,
    /// Opaque password hash; never inspected by this crate.
    pub password_hash: String,
    pub full_name: String,
    pub role: UserRole,
    /// Branch this user works at, when assigned.
    pub branch_id: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
