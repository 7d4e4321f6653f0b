//! # belleza-core: Pure Business Logic for Belleza POS
//!
//! This crate is the **heart** of the Belleza POS management backend. It
//! contains the business rules for customer store-credit accounts, article
//! stock control and price lists as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Belleza POS Architecture                        │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │               Outer surface (HTTP API, desktop, CLI)          │ │
//! │  └──────────────────────────────┬────────────────────────────────┘ │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐ │
//! │  │               ★ belleza-core (THIS CRATE) ★                   │ │
//! │  │                                                               │ │
//! │  │  ┌─────────┐ ┌─────────┐ ┌────────┐ ┌───────┐ ┌───────────┐ │ │
//! │  │  │  types  │ │ ledger  │ │ stock  │ │pricing│ │validation │ │ │
//! │  │  │Customer │ │ credit  │ │ adjust │ │  VAT  │ │  rules    │ │ │
//! │  │  │Article  │ │ rules   │ │ levels │ │default│ │  checks   │ │ │
//! │  │  └─────────┘ └─────────┘ └────────┘ └───────┘ └───────────┘ │ │
//! │  │                                                               │ │
//! │  │  NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │ │
//! │  └──────────────────────────────┬────────────────────────────────┘ │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐ │
//! │  │                belleza-db (Database Layer)                    │ │
//! │  │          SQLite queries, migrations, repositories             │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, Article, PriceEntry, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`quantity`] - Stock quantity type in thousandths of a unit
//! - [`ledger`] - Customer store-credit rules
//! - [`stock`] - Stock adjustment and classification rules
//! - [`pricing`] - VAT-inclusive price and default-list resolution
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input =
//!    same output (date-dependent rules take `today` as a parameter)
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid
//!    float errors; stock quantities are in thousandths of a unit
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use belleza_core::money::Money;
//! use belleza_core::types::TaxRate;
//!
//! // Create money from cents (never from floats!)
//! let price = Money::from_cents(10_000); // $100.00
//!
//! // Add the flat 21% VAT surcharge
//! let gross = price.with_tax(TaxRate::from_bps(belleza_core::VAT_RATE_BPS));
//! assert_eq!(gross.cents(), 12_100); // $121.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ledger;
pub mod money;
pub mod pricing;
pub mod quantity;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use belleza_core::Money` instead of
// `use belleza_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use quantity::Quantity;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Flat VAT surcharge applied to every sale price, in basis points.
///
/// ## Known Inconsistency
/// Categories carry their own `vat_bps` column, but price formatting has
/// always used this flat 21% rate regardless of category. Kept as-is;
/// see DESIGN.md for the open question.
pub const VAT_RATE_BPS: u32 = 2100;

/// Balance-to-limit ratio above which a limited credit account is flagged
/// `Warning`, in basis points (8000 = 80%).
///
/// The comparison is strict: a balance at exactly 80% of the limit still
/// classifies as `Normal`.
pub const CREDIT_WARNING_RATIO_BPS: u32 = 8000;

/// Expiration horizon (in days) within which an article is `Critical`.
pub const EXPIRY_CRITICAL_DAYS: i64 = 7;

/// Expiration horizon (in days) within which an article is `Upcoming`.
pub const EXPIRY_UPCOMING_DAYS: i64 = 30;

/// Prefix and width used when generating customer numbers (CLI000001).
pub const CUSTOMER_NUMBER_PREFIX: &str = "CLI";
