//! # Ledger Module
//!
//! Customer store-credit rules: available credit, account classification,
//! payments and credit sales.
//!
//! ## The Credit Account Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Store-Credit Account ("cuenta corriente")            │
//! │                                                                         │
//! │  balance  = what the customer owes the store (grows on credit sales,   │
//! │             shrinks on payments, never below zero)                     │
//! │  limit    = how much the store is willing to be owed                   │
//! │                                                                         │
//! │  $0 ─────────────── 80% of limit ─────────── limit ──────────▶         │
//! │  │      Normal     │        Warning         │   Exceeded               │
//! │  │                 │  (strictly above 80%)  │  (strictly above limit)  │
//! │                                                                         │
//! │  Unlimited accounts skip the scale entirely and always read            │
//! │  `Unlimited`; disabled accounts read `NoAccount`.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Pure Functions
//! Nothing here touches the database. Each function takes the customer as
//! loaded and returns either a classification or the **new balance** for
//! the caller to persist. Load → rule → store is the service layer's job.

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CreditLimitType, CreditState, CreditSummary, Customer};
use crate::validation::validate_payment_amount;
use crate::CREDIT_WARNING_RATIO_BPS;

// =============================================================================
// Classification
// =============================================================================

/// Returns the credit a customer still has available.
///
/// ## Rules
/// - Credit disabled        → zero
/// - Unlimited limit type   → [`Money::MAX`] (effectively infinite)
/// - Limited                → `limit - balance`, which goes **negative**
///   when the account is exceeded (a lowered limit can strand the balance
///   above it)
///
/// ## Example
/// ```rust
/// use belleza_core::ledger::available_credit;
/// # use belleza_core::types::*;
/// # use belleza_core::Money;
/// # use chrono::Utc;
/// # let now = Utc::now();
/// # let mut customer = Customer {
/// #     id: "c-1".into(), customer_number: None, kind: CustomerKind::Individual,
/// #     name: "Lucía".into(), last_name: None, document_number: None,
/// #     phone: None, email: None, address: None,
/// #     credit_enabled: true, credit_limit_type: CreditLimitType::Limited,
/// #     credit_limit_cents: 100_000, balance_cents: 25_000,
/// #     payment_term_days: 30, notes: None, is_active: true,
/// #     created_at: now, updated_at: now,
/// # };
/// assert_eq!(available_credit(&customer), Money::from_cents(75_000));
/// ```
pub fn available_credit(customer: &Customer) -> Money {
    if !customer.credit_enabled {
        return Money::zero();
    }

    match customer.credit_limit_type {
        CreditLimitType::Unlimited => Money::MAX,
        CreditLimitType::Limited => customer.credit_limit() - customer.balance(),
    }
}

/// Classifies a customer's credit standing.
///
/// ## Decision Order
/// ```text
/// credit_enabled == false ──────────────▶ NoAccount
/// limit type == Unlimited ──────────────▶ Unlimited
/// balance > limit ──────────────────────▶ Exceeded
/// balance > 80% of limit (strictly) ────▶ Warning
/// otherwise ────────────────────────────▶ Normal
/// ```
///
/// The 80% comparison is done in integer math: `balance × 10000` against
/// `limit × 8000`, with i128 intermediates so large limits cannot
/// overflow. A balance at exactly 80% of the limit is still `Normal`;
/// a balance exactly at the limit is `Warning`, not `Exceeded`.
pub fn classify_credit(customer: &Customer) -> CreditState {
    if !customer.credit_enabled {
        return CreditState::NoAccount;
    }

    if customer.credit_limit_type == CreditLimitType::Unlimited {
        return CreditState::Unlimited;
    }

    let balance = customer.balance_cents as i128;
    let limit = customer.credit_limit_cents as i128;

    if balance > limit {
        CreditState::Exceeded
    } else if balance * 10_000 > limit * CREDIT_WARNING_RATIO_BPS as i128 {
        CreditState::Warning
    } else {
        CreditState::Normal
    }
}

/// Builds the combined credit view used by customer read models.
pub fn credit_summary(customer: &Customer) -> CreditSummary {
    CreditSummary {
        available: available_credit(customer),
        state: classify_credit(customer),
    }
}

// =============================================================================
// Account Movements
// =============================================================================

/// Applies a payment against a customer's balance.
///
/// Returns the **new balance** for the caller to persist.
///
/// ## Rules
/// - Amount must be strictly positive
/// - Customer must have credit enabled
/// - An overpayment clamps the balance to zero, it never goes negative
///   (the store does not hold customer money as negative debt)
///
/// ## Workflow
/// ```text
/// Payment $300.00 against balance $250.00
///      │
///      ▼
/// $250.00 - $300.00 = -$50.00 → clamp → new balance $0.00
/// ```
pub fn apply_payment(customer: &Customer, amount: Money) -> CoreResult<Money> {
    validate_payment_amount(amount.cents())?;

    if !customer.credit_enabled {
        return Err(CoreError::CreditDisabled(customer.id.clone()));
    }

    let new_balance = customer.balance() - amount;
    if new_balance.is_negative() {
        Ok(Money::zero())
    } else {
        Ok(new_balance)
    }
}

/// Applies a credit sale against a customer's balance.
///
/// Returns the **new balance** for the caller to persist.
///
/// ## Rules
/// - Amount must be strictly positive
/// - Customer must have credit enabled
/// - On a `Limited` account the tentative balance may not exceed the
///   limit; landing **exactly on** the limit is allowed
/// - `Unlimited` accounts accept any amount
///
/// ## Errors
/// [`CoreError::CreditLimitExceeded`] carries the tentative balance that
/// was rejected, so the register can show how far over the sale went.
pub fn apply_sale(customer: &Customer, amount: Money) -> CoreResult<Money> {
    validate_payment_amount(amount.cents())?;

    if !customer.credit_enabled {
        return Err(CoreError::CreditDisabled(customer.id.clone()));
    }

    let tentative = customer.balance() + amount;

    if customer.credit_limit_type == CreditLimitType::Limited && tentative > customer.credit_limit()
    {
        return Err(CoreError::CreditLimitExceeded {
            attempted: tentative,
            limit: customer.credit_limit(),
        });
    }

    Ok(tentative)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CustomerKind;
    use chrono::Utc;

    fn customer(
        enabled: bool,
        limit_type: CreditLimitType,
        limit_cents: i64,
        balance_cents: i64,
    ) -> Customer {
        let now = Utc::now();
        Customer {
            id: "c-1".to_string(),
            customer_number: Some("CLI000001".to_string()),
            kind: CustomerKind::Individual,
            name: "Lucía".to_string(),
            last_name: Some("Fernández".to_string()),
            document_number: None,
            phone: None,
            email: None,
            address: None,
            credit_enabled: enabled,
            credit_limit_type: limit_type,
            credit_limit_cents: limit_cents,
            balance_cents,
            payment_term_days: 30,
            notes: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn limited(limit_cents: i64, balance_cents: i64) -> Customer {
        customer(true, CreditLimitType::Limited, limit_cents, balance_cents)
    }

    // -------------------------------------------------------------------------
    // available_credit
    // -------------------------------------------------------------------------

    #[test]
    fn test_available_credit_limited() {
        assert_eq!(
            available_credit(&limited(100_000, 25_000)),
            Money::from_cents(75_000)
        );
    }

    #[test]
    fn test_available_credit_negative_when_exceeded() {
        // Limit lowered after the balance grew; available goes negative.
        assert_eq!(
            available_credit(&limited(100_000, 120_000)),
            Money::from_cents(-20_000)
        );
    }

    #[test]
    fn test_available_credit_unlimited_is_max() {
        let c = customer(true, CreditLimitType::Unlimited, 0, 999_999);
        assert_eq!(available_credit(&c), Money::MAX);
    }

    #[test]
    fn test_available_credit_disabled_is_zero() {
        let c = customer(false, CreditLimitType::Limited, 100_000, 0);
        assert_eq!(available_credit(&c), Money::zero());
    }

    // -------------------------------------------------------------------------
    // classify_credit
    // -------------------------------------------------------------------------

    #[test]
    fn test_classify_no_account() {
        let c = customer(false, CreditLimitType::Limited, 100_000, 0);
        assert_eq!(classify_credit(&c), CreditState::NoAccount);
    }

    #[test]
    fn test_classify_unlimited() {
        let c = customer(true, CreditLimitType::Unlimited, 0, 5_000_000);
        assert_eq!(classify_credit(&c), CreditState::Unlimited);
    }

    #[test]
    fn test_classify_exceeded() {
        assert_eq!(classify_credit(&limited(100_000, 100_001)), CreditState::Exceeded);
    }

    #[test]
    fn test_classify_at_exactly_limit_is_warning() {
        // Strictly above the limit is required for Exceeded.
        assert_eq!(classify_credit(&limited(100_000, 100_000)), CreditState::Warning);
    }

    #[test]
    fn test_classify_at_exactly_eighty_percent_is_normal() {
        // 80_000 of 100_000: the warning comparison is strict.
        assert_eq!(classify_credit(&limited(100_000, 80_000)), CreditState::Normal);
    }

    #[test]
    fn test_classify_just_over_eighty_percent_is_warning() {
        assert_eq!(classify_credit(&limited(100_000, 80_001)), CreditState::Warning);
    }

    #[test]
    fn test_classify_zero_balance_is_normal() {
        assert_eq!(classify_credit(&limited(100_000, 0)), CreditState::Normal);
    }

    #[test]
    fn test_classify_large_limits_do_not_overflow() {
        // A limit near i64::MAX would overflow the × 10000 in i64 math.
        let huge = i64::MAX / 2;
        assert_eq!(classify_credit(&limited(huge, huge / 2)), CreditState::Normal);
    }

    #[test]
    fn test_credit_summary_combines_both() {
        let summary = credit_summary(&limited(100_000, 90_000));
        assert_eq!(summary.available, Money::from_cents(10_000));
        assert_eq!(summary.state, CreditState::Warning);
    }

    // -------------------------------------------------------------------------
    // apply_payment
    // -------------------------------------------------------------------------

    #[test]
    fn test_payment_reduces_balance() {
        let c = limited(100_000, 50_000);
        let new_balance = apply_payment(&c, Money::from_cents(20_000)).unwrap();
        assert_eq!(new_balance, Money::from_cents(30_000));
    }

    #[test]
    fn test_overpayment_clamps_to_zero() {
        let c = limited(100_000, 25_000);
        let new_balance = apply_payment(&c, Money::from_cents(30_000)).unwrap();
        assert_eq!(new_balance, Money::zero());
    }

    #[test]
    fn test_payment_rejects_non_positive_amount() {
        let c = limited(100_000, 50_000);
        assert!(matches!(
            apply_payment(&c, Money::zero()),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            apply_payment(&c, Money::from_cents(-100)),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_payment_rejects_disabled_account() {
        let c = customer(false, CreditLimitType::Limited, 100_000, 50_000);
        assert!(matches!(
            apply_payment(&c, Money::from_cents(1000)),
            Err(CoreError::CreditDisabled(_))
        ));
    }

    #[test]
    fn test_payment_allowed_on_exceeded_account() {
        // Payments must always be accepted, even above the limit.
        let c = limited(100_000, 150_000);
        let new_balance = apply_payment(&c, Money::from_cents(60_000)).unwrap();
        assert_eq!(new_balance, Money::from_cents(90_000));
    }

    // -------------------------------------------------------------------------
    // apply_sale
    // -------------------------------------------------------------------------

    #[test]
    fn test_sale_increases_balance() {
        let c = limited(100_000, 30_000);
        let new_balance = apply_sale(&c, Money::from_cents(20_000)).unwrap();
        assert_eq!(new_balance, Money::from_cents(50_000));
    }

    #[test]
    fn test_sale_landing_exactly_on_limit_is_allowed() {
        let c = limited(100_000, 70_000);
        let new_balance = apply_sale(&c, Money::from_cents(30_000)).unwrap();
        assert_eq!(new_balance, Money::from_cents(100_000));
    }

    #[test]
    fn test_sale_over_limit_is_rejected() {
        let c = limited(100_000, 70_000);
        let err = apply_sale(&c, Money::from_cents(30_001)).unwrap_err();
        match err {
            CoreError::CreditLimitExceeded { attempted, limit } => {
                assert_eq!(attempted, Money::from_cents(100_001));
                assert_eq!(limit, Money::from_cents(100_000));
            }
            other => panic!("expected CreditLimitExceeded, got {other:?}"),
        }
    }

    #[test]
    fn test_sale_on_unlimited_account_always_passes() {
        let c = customer(true, CreditLimitType::Unlimited, 0, 1_000_000);
        let new_balance = apply_sale(&c, Money::from_cents(5_000_000)).unwrap();
        assert_eq!(new_balance, Money::from_cents(6_000_000));
    }

    #[test]
    fn test_sale_rejects_non_positive_amount() {
        let c = limited(100_000, 0);
        assert!(matches!(
            apply_sale(&c, Money::zero()),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_sale_rejects_disabled_account() {
        let c = customer(false, CreditLimitType::Limited, 100_000, 0);
        assert!(matches!(
            apply_sale(&c, Money::from_cents(1000)),
            Err(CoreError::CreditDisabled(_))
        ));
    }

    #[test]
    fn test_payment_then_sale_round_trip() {
        // Pay down an account, then sell back up to the limit.
        let mut c = limited(100_000, 80_000);
        c.balance_cents = apply_payment(&c, Money::from_cents(30_000)).unwrap().cents();
        assert_eq!(c.balance_cents, 50_000);

        c.balance_cents = apply_sale(&c, Money::from_cents(50_000)).unwrap().cents();
        assert_eq!(c.balance_cents, 100_000);
        assert_eq!(classify_credit(&c), CreditState::Warning);
    }
}
