//! # Stock Module
//!
//! Stock adjustment and classification rules for articles.
//!
//! ## Adjustment Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Stock Adjustment Kinds                             │
//! │                                                                         │
//! │  Increase   stock + qty        goods received from a supplier          │
//! │  Decrease   stock - qty        shrinkage, breakage, returns out        │
//! │             └── rejected if it would leave the stock negative          │
//! │  Set        stock := qty       physical recount, replaces the value    │
//! │                                                                         │
//! │  Direction always comes from the kind. The quantity itself is          │
//! │  non-negative; a signed quantity is rejected at validation.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Level Classification
//! The boundary against the minimum is equality-based:
//! ```text
//! stock == 0      → Empty
//! stock <  min    → Critical
//! stock == min    → Low        (not Critical, not Ok)
//! stock >  min    → Ok
//! ```
//!
//! ## Date-Dependent Rules
//! Expiration classification takes `today` as a parameter, so the same
//! article classifies identically in a test and in production.

use chrono::NaiveDate;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::quantity::Quantity;
use crate::types::{
    Article, ExpirationAlert, ExpirationState, LowStockAlert, StockAdjustmentKind, StockLevel,
};
use crate::validation::validate_adjustment_quantity;
use crate::{EXPIRY_CRITICAL_DAYS, EXPIRY_UPCOMING_DAYS};

// =============================================================================
// Adjustment
// =============================================================================

/// Applies a stock adjustment to an article.
///
/// Returns the **new stock** for the caller to persist.
///
/// ## Rules
/// - The article must track stock ([`CoreError::StockTrackingDisabled`])
/// - The quantity is non-negative; `Increase` and `Decrease` additionally
///   require it strictly positive (a zero movement is a data-entry slip),
///   while `Set` accepts zero (counting a shelf down to nothing is real)
/// - A `Decrease` larger than the current stock is rejected with
///   [`CoreError::InsufficientStock`]; stock is never stored negative
pub fn adjust_stock(
    article: &Article,
    kind: StockAdjustmentKind,
    quantity: Quantity,
) -> CoreResult<Quantity> {
    if !article.track_stock {
        return Err(CoreError::StockTrackingDisabled(article.barcode.clone()));
    }

    validate_adjustment_quantity(quantity.thousandths())?;

    if quantity.is_zero() && kind != StockAdjustmentKind::Set {
        return Err(CoreError::Validation(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        }));
    }

    let current = article.stock();

    match kind {
        StockAdjustmentKind::Increase => Ok(current + quantity),
        StockAdjustmentKind::Decrease => {
            if quantity > current {
                Err(CoreError::InsufficientStock {
                    barcode: article.barcode.clone(),
                    available: current,
                    requested: quantity,
                })
            } else {
                Ok(current - quantity)
            }
        }
        StockAdjustmentKind::Set => Ok(quantity),
    }
}

// =============================================================================
// Classification
// =============================================================================

/// Classifies an article's current stock level.
///
/// ## Decision Order
/// ```text
/// track_stock == false ─────▶ Untracked
/// stock == 0 ───────────────▶ Empty
/// stock <  min ─────────────▶ Critical
/// stock == min ─────────────▶ Low
/// otherwise ────────────────▶ Ok
/// ```
pub fn classify_stock(article: &Article) -> StockLevel {
    if !article.track_stock {
        return StockLevel::Untracked;
    }

    let stock = article.stock();
    let min = article.min_stock();

    if stock.is_zero() {
        StockLevel::Empty
    } else if stock < min {
        StockLevel::Critical
    } else if stock == min {
        StockLevel::Low
    } else {
        StockLevel::Ok
    }
}

/// Classifies an article's expiration relative to `today`.
///
/// Returns `None` when the article has no expiration date; those articles
/// never appear in expiration reports.
///
/// ## Horizons
/// ```text
/// days < 0 ──────▶ Expired
/// days <= 7 ─────▶ Critical   (includes expiring today)
/// days <= 30 ────▶ Upcoming
/// otherwise ─────▶ Ok
/// ```
pub fn classify_expiration(article: &Article, today: NaiveDate) -> Option<ExpirationState> {
    let expires_on = article.expires_on?;
    let days = (expires_on - today).num_days();

    Some(if days < 0 {
        ExpirationState::Expired
    } else if days <= EXPIRY_CRITICAL_DAYS {
        ExpirationState::Critical
    } else if days <= EXPIRY_UPCOMING_DAYS {
        ExpirationState::Upcoming
    } else {
        ExpirationState::Ok
    })
}

// =============================================================================
// Report Rows
// =============================================================================

/// Builds a low-stock report row, or `None` when the article is fine.
///
/// Articles classify into the report when their level is `Empty`,
/// `Critical` or `Low`. Untracked articles never appear.
pub fn low_stock_alert(article: &Article) -> Option<LowStockAlert> {
    let level = classify_stock(article);

    match level {
        StockLevel::Empty | StockLevel::Critical | StockLevel::Low => {
            let shortfall = article.min_stock() - article.stock();
            Some(LowStockAlert {
                article_id: article.id.clone(),
                barcode: article.barcode.clone(),
                description: article.description.clone(),
                stock_on_hand: article.stock(),
                stock_min: article.min_stock(),
                shortfall: if shortfall.is_negative() {
                    Quantity::zero()
                } else {
                    shortfall
                },
                level,
            })
        }
        StockLevel::Untracked | StockLevel::Ok => None,
    }
}

/// Builds an expiration report row, or `None` when out of scope.
///
/// Articles without an expiration date, and articles whose date is more
/// than 30 days out, never appear.
pub fn expiration_alert(article: &Article, today: NaiveDate) -> Option<ExpirationAlert> {
    let state = classify_expiration(article, today)?;

    if state == ExpirationState::Ok {
        return None;
    }

    let expires_on = article.expires_on?;
    Some(ExpirationAlert {
        article_id: article.id.clone(),
        barcode: article.barcode.clone(),
        description: article.description.clone(),
        expires_on,
        days_remaining: (expires_on - today).num_days(),
        stock_on_hand: article.stock(),
        state,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SaleUnit;
    use chrono::{Duration, Utc};

    fn article(track: bool, stock_thousandths: i64, min_thousandths: i64) -> Article {
        let now = Utc::now();
        Article {
            id: "a-1".to_string(),
            barcode: "7791234567890".to_string(),
            description: "Shampoo Nutritivo 400ml".to_string(),
            category_id: None,
            sale_unit: SaleUnit::Unit,
            track_stock: track,
            stock_on_hand: stock_thousandths,
            stock_min: min_thousandths,
            stock_max: 50_000,
            expires_on: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn tracked(stock_units: i64, min_units: i64) -> Article {
        article(true, stock_units * 1000, min_units * 1000)
    }

    // -------------------------------------------------------------------------
    // adjust_stock
    // -------------------------------------------------------------------------

    #[test]
    fn test_increase_adds() {
        let a = tracked(10, 5);
        let new_stock = adjust_stock(&a, StockAdjustmentKind::Increase, Quantity::from_units(4));
        assert_eq!(new_stock.unwrap(), Quantity::from_units(14));
    }

    #[test]
    fn test_decrease_subtracts() {
        let a = tracked(10, 5);
        let new_stock = adjust_stock(&a, StockAdjustmentKind::Decrease, Quantity::from_units(4));
        assert_eq!(new_stock.unwrap(), Quantity::from_units(6));
    }

    #[test]
    fn test_decrease_to_exactly_zero_is_allowed() {
        let a = tracked(10, 5);
        let new_stock = adjust_stock(&a, StockAdjustmentKind::Decrease, Quantity::from_units(10));
        assert_eq!(new_stock.unwrap(), Quantity::zero());
    }

    #[test]
    fn test_decrease_below_zero_is_rejected() {
        let a = tracked(3, 5);
        let err =
            adjust_stock(&a, StockAdjustmentKind::Decrease, Quantity::from_units(5)).unwrap_err();
        match err {
            CoreError::InsufficientStock {
                barcode,
                available,
                requested,
            } => {
                assert_eq!(barcode, "7791234567890");
                assert_eq!(available, Quantity::from_units(3));
                assert_eq!(requested, Quantity::from_units(5));
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
    }

    #[test]
    fn test_set_replaces_value() {
        let a = tracked(10, 5);
        let new_stock = adjust_stock(&a, StockAdjustmentKind::Set, Quantity::from_units(2));
        assert_eq!(new_stock.unwrap(), Quantity::from_units(2));
    }

    #[test]
    fn test_set_to_zero_is_allowed() {
        let a = tracked(10, 5);
        let new_stock = adjust_stock(&a, StockAdjustmentKind::Set, Quantity::zero());
        assert_eq!(new_stock.unwrap(), Quantity::zero());
    }

    #[test]
    fn test_zero_increase_and_decrease_are_rejected() {
        let a = tracked(10, 5);
        assert!(adjust_stock(&a, StockAdjustmentKind::Increase, Quantity::zero()).is_err());
        assert!(adjust_stock(&a, StockAdjustmentKind::Decrease, Quantity::zero()).is_err());
    }

    #[test]
    fn test_negative_quantity_is_rejected() {
        let a = tracked(10, 5);
        let qty = Quantity::from_thousandths(-1000);
        assert!(matches!(
            adjust_stock(&a, StockAdjustmentKind::Increase, qty),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_untracked_article_rejects_adjustment() {
        let a = article(false, 0, 0);
        assert!(matches!(
            adjust_stock(&a, StockAdjustmentKind::Increase, Quantity::from_units(1)),
            Err(CoreError::StockTrackingDisabled(_))
        ));
    }

    #[test]
    fn test_fractional_adjustment_for_weighed_articles() {
        // 1.250 kg received on top of 0.500 kg
        let a = article(true, 500, 2000);
        let new_stock = adjust_stock(
            &a,
            StockAdjustmentKind::Increase,
            Quantity::from_thousandths(1250),
        );
        assert_eq!(new_stock.unwrap().thousandths(), 1750);
    }

    // -------------------------------------------------------------------------
    // classify_stock
    // -------------------------------------------------------------------------

    #[test]
    fn test_classify_untracked() {
        assert_eq!(classify_stock(&article(false, 0, 0)), StockLevel::Untracked);
    }

    #[test]
    fn test_classify_empty() {
        assert_eq!(classify_stock(&tracked(0, 10)), StockLevel::Empty);
    }

    #[test]
    fn test_classify_below_min_is_critical() {
        assert_eq!(classify_stock(&tracked(5, 10)), StockLevel::Critical);
    }

    #[test]
    fn test_classify_exactly_at_min_is_low() {
        assert_eq!(classify_stock(&tracked(10, 10)), StockLevel::Low);
    }

    #[test]
    fn test_classify_above_min_is_ok() {
        assert_eq!(classify_stock(&tracked(11, 10)), StockLevel::Ok);
    }

    #[test]
    fn test_classify_zero_wins_over_critical() {
        // Zero stock with a positive minimum is Empty, not Critical.
        assert_eq!(classify_stock(&tracked(0, 5)), StockLevel::Empty);
    }

    // -------------------------------------------------------------------------
    // classify_expiration
    // -------------------------------------------------------------------------

    fn expiring(days_from_today: i64, today: NaiveDate) -> Article {
        let mut a = tracked(10, 5);
        a.expires_on = Some(today + Duration::days(days_from_today));
        a
    }

    #[test]
    fn test_expiration_none_without_date() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert_eq!(classify_expiration(&tracked(10, 5), today), None);
    }

    #[test]
    fn test_expiration_past_date_is_expired() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let a = expiring(-1, today);
        assert_eq!(classify_expiration(&a, today), Some(ExpirationState::Expired));
    }

    #[test]
    fn test_expiration_today_is_critical() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let a = expiring(0, today);
        assert_eq!(classify_expiration(&a, today), Some(ExpirationState::Critical));
    }

    #[test]
    fn test_expiration_day_seven_is_critical() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let a = expiring(7, today);
        assert_eq!(classify_expiration(&a, today), Some(ExpirationState::Critical));
    }

    #[test]
    fn test_expiration_day_eight_is_upcoming() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let a = expiring(8, today);
        assert_eq!(classify_expiration(&a, today), Some(ExpirationState::Upcoming));
    }

    #[test]
    fn test_expiration_day_thirty_is_upcoming() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let a = expiring(30, today);
        assert_eq!(classify_expiration(&a, today), Some(ExpirationState::Upcoming));
    }

    #[test]
    fn test_expiration_day_thirty_one_is_ok() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let a = expiring(31, today);
        assert_eq!(classify_expiration(&a, today), Some(ExpirationState::Ok));
    }

    // -------------------------------------------------------------------------
    // report rows
    // -------------------------------------------------------------------------

    #[test]
    fn test_low_stock_alert_includes_shortfall() {
        let alert = low_stock_alert(&tracked(3, 10)).unwrap();
        assert_eq!(alert.level, StockLevel::Critical);
        assert_eq!(alert.shortfall, Quantity::from_units(7));
    }

    #[test]
    fn test_low_stock_alert_at_min_has_zero_shortfall() {
        let alert = low_stock_alert(&tracked(10, 10)).unwrap();
        assert_eq!(alert.level, StockLevel::Low);
        assert_eq!(alert.shortfall, Quantity::zero());
    }

    #[test]
    fn test_low_stock_alert_skips_healthy_and_untracked() {
        assert!(low_stock_alert(&tracked(20, 10)).is_none());
        assert!(low_stock_alert(&article(false, 0, 0)).is_none());
    }

    #[test]
    fn test_expiration_alert_carries_days_remaining() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let alert = expiration_alert(&expiring(-3, today), today).unwrap();
        assert_eq!(alert.state, ExpirationState::Expired);
        assert_eq!(alert.days_remaining, -3);
    }

    #[test]
    fn test_expiration_alert_skips_far_dates_and_undated() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert!(expiration_alert(&expiring(45, today), today).is_none());
        assert!(expiration_alert(&tracked(10, 5), today).is_none());
    }
}
