//! # Pricing Module
//!
//! VAT-inclusive price formatting and default-list price resolution.
//!
//! ## Price Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     "What does this article cost?"                      │
//! │                                                                         │
//! │  price lists:  [Counter (default)]  [Wholesale]  [Staff]               │
//! │                        │                                                │
//! │                        ▼                                                │
//! │  find the default list ── none flagged? ──▶ no price (None)            │
//! │                        │                                                │
//! │                        ▼                                                │
//! │  find this article's entry on it ── missing? ──▶ no price (None)       │
//! │                        │                                                │
//! │                        ▼                                                │
//! │  net sale price ──× 1.21──▶ gross price shown at the register          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The 21% VAT surcharge is flat across all articles; the per-category
//! `vat_bps` column exists but is not consulted here.

use crate::money::Money;
use crate::types::{PriceEntry, PriceList, TaxRate};
use crate::VAT_RATE_BPS;

// =============================================================================
// VAT
// =============================================================================

/// Returns the gross (VAT-inclusive) price for a net sale price.
///
/// ## Example
/// ```rust
/// use belleza_core::money::Money;
/// use belleza_core::pricing::price_with_vat;
///
/// let net = Money::from_cents(10_000);          // $100.00
/// assert_eq!(price_with_vat(net).cents(), 12_100); // $121.00
/// ```
pub fn price_with_vat(net: Money) -> Money {
    net.with_tax(TaxRate::from_bps(VAT_RATE_BPS))
}

// =============================================================================
// Default-List Resolution
// =============================================================================

/// Finds an article's price entry on a specific list.
pub fn price_on_list<'a>(entries: &'a [PriceEntry], price_list_id: &str) -> Option<&'a PriceEntry> {
    entries.iter().find(|e| e.price_list_id == price_list_id)
}

/// Resolves an article's sale price on the default price list.
///
/// `entries` are the article's price entries across all lists; `lists`
/// are the known price lists. Returns `None` when no list is flagged
/// default, or when the article has no entry on the default list. The
/// caller decides whether "no price" is an error or just an unpriced
/// article.
pub fn default_sale_price<'a>(
    entries: &'a [PriceEntry],
    lists: &[PriceList],
) -> Option<&'a PriceEntry> {
    let default_list = lists.iter().find(|l| l.is_default)?;
    price_on_list(entries, &default_list.id)
}

// =============================================================================
// Margin
// =============================================================================

/// Computes the profit margin over cost, in basis points.
///
/// `margin = (sale - cost) / cost`, so a $10.00 cost sold at $12.50 is a
/// 25.00% margin (2500 bps). Returns 0 when the cost is zero or negative
/// (cost not yet negotiated); a sale below cost yields a negative margin.
///
/// Integer math, truncating toward zero.
pub fn profit_margin_bps(cost: Money, sale: Money) -> i64 {
    if cost.cents() <= 0 {
        return 0;
    }

    let diff = (sale.cents() - cost.cents()) as i128;
    (diff * 10_000 / cost.cents() as i128) as i64
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(list_id: &str, cost_cents: i64, sale_cents: i64) -> PriceEntry {
        PriceEntry {
            id: format!("pe-{list_id}"),
            article_id: "a-1".to_string(),
            price_list_id: list_id.to_string(),
            cost_cents,
            sale_price_cents: sale_cents,
            profit_margin_bps: profit_margin_bps(
                Money::from_cents(cost_cents),
                Money::from_cents(sale_cents),
            ),
            updated_at: Utc::now(),
        }
    }

    fn list(id: &str, is_default: bool) -> PriceList {
        let now = Utc::now();
        PriceList {
            id: id.to_string(),
            name: format!("List {id}"),
            description: None,
            is_default,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_price_with_vat_round_amount() {
        assert_eq!(price_with_vat(Money::from_cents(10_000)).cents(), 12_100);
    }

    #[test]
    fn test_price_with_vat_rounds_half_up() {
        // $10.99 × 1.21 = $13.2979 → $13.30
        assert_eq!(price_with_vat(Money::from_cents(1099)).cents(), 1330);
    }

    #[test]
    fn test_default_sale_price_resolves_default_list() {
        let lists = vec![list("counter", true), list("wholesale", false)];
        let entries = vec![entry("wholesale", 400, 500), entry("counter", 400, 800)];

        let resolved = default_sale_price(&entries, &lists).unwrap();
        assert_eq!(resolved.sale_price_cents, 800);
    }

    #[test]
    fn test_default_sale_price_none_without_default_list() {
        let lists = vec![list("counter", false), list("wholesale", false)];
        let entries = vec![entry("counter", 400, 800)];

        assert!(default_sale_price(&entries, &lists).is_none());
    }

    #[test]
    fn test_default_sale_price_none_when_unpriced_on_default() {
        let lists = vec![list("counter", true)];
        let entries = vec![entry("wholesale", 400, 500)];

        assert!(default_sale_price(&entries, &lists).is_none());
    }

    #[test]
    fn test_price_on_list() {
        let entries = vec![entry("counter", 400, 800), entry("wholesale", 400, 500)];
        assert_eq!(price_on_list(&entries, "wholesale").unwrap().sale_price_cents, 500);
        assert!(price_on_list(&entries, "staff").is_none());
    }

    #[test]
    fn test_profit_margin() {
        // $10.00 cost sold at $12.50 → 25.00%
        assert_eq!(
            profit_margin_bps(Money::from_cents(1000), Money::from_cents(1250)),
            2500
        );
    }

    #[test]
    fn test_profit_margin_negative_when_sold_below_cost() {
        assert_eq!(
            profit_margin_bps(Money::from_cents(1000), Money::from_cents(900)),
            -1000
        );
    }

    #[test]
    fn test_profit_margin_zero_cost() {
        assert_eq!(profit_margin_bps(Money::zero(), Money::from_cents(500)), 0);
    }
}
