//! # Error Types
//!
//! Domain-specific error types for belleza-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  belleza-core errors (this file)                                       │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  belleza-db errors (separate crate)                                    │
//! │  ├── DbError          - Database operation failures                    │
//! │  └── ServiceError     - Business OR database, unified at the seam      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError → Outer surface      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (barcode, customer id, amounts)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::money::Money;
use crate::quantity::Quantity;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. They should be caught
/// and translated to user-friendly messages by the outer surface.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A store-credit operation hit a customer without the feature enabled.
    ///
    /// ## When This Occurs
    /// - Recording a payment against a customer with `credit_enabled = false`
    /// - Recording a credit sale against such a customer
    #[error("Customer {0} does not have a credit account")]
    CreditDisabled(String),

    /// A credit sale would push a limited account over its limit.
    ///
    /// ## When This Occurs
    /// ```text
    /// Credit sale: $300.00
    ///      │
    ///      ▼
    /// balance $850.00 + $300.00 = $1150.00 > limit $1000.00
    ///      │
    ///      ▼
    /// CreditLimitExceeded { attempted: $1150.00, limit: $1000.00 }
    /// ```
    /// The balance already above the limit (from a raised-then-lowered
    /// limit) does not block payments, only new sales.
    #[error("Credit limit exceeded: balance would be {attempted}, limit is {limit}")]
    CreditLimitExceeded { attempted: Money, limit: Money },

    /// Stock adjustment attempted on an article that does not track stock.
    #[error("Article {0} does not track stock")]
    StockTrackingDisabled(String),

    /// A stock decrease would leave the article negative.
    ///
    /// ## When This Occurs
    /// - `Decrease` adjustment larger than current stock
    ///
    /// `Set` adjustments are exempt: a recount replaces the value and is
    /// validated non-negative at the input boundary instead.
    #[error("Insufficient stock for {barcode}: available {available}, requested {requested}")]
    InsufficientStock {
        barcode: String,
        available: Quantity,
        requested: Quantity,
    },

    /// A price list still referenced by article prices cannot be deleted.
    #[error("Price list '{name}' has {articles} priced articles and cannot be deleted")]
    PriceListInUse { name: String, articles: i64 },

    /// The default price list can never be deleted, priced or not.
    #[error("Price list '{name}' is the default list and cannot be deleted")]
    DefaultPriceListUndeletable { name: String },

    /// A category still referenced by articles cannot be deleted.
    #[error("Category '{name}' has {articles} articles and cannot be deleted")]
    CategoryInUse { name: String, articles: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g., duplicate barcode).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::CreditLimitExceeded {
            attempted: Money::from_cents(115_000),
            limit: Money::from_cents(100_000),
        };
        assert_eq!(
            err.to_string(),
            "Credit limit exceeded: balance would be $1150.00, limit is $1000.00"
        );

        let err = CoreError::InsufficientStock {
            barcode: "7791234567890".to_string(),
            available: Quantity::from_units(3),
            requested: Quantity::from_units(5),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for 7791234567890: available 3.000, requested 5.000"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "barcode".to_string(),
        };
        assert_eq!(err.to_string(), "barcode is required");

        let err = ValidationError::Duplicate {
            field: "barcode".to_string(),
            value: "7791234567890".to_string(),
        };
        assert_eq!(err.to_string(), "barcode '7791234567890' already exists");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "amount".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
