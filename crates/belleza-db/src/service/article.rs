//! # Article Service
//!
//! Article registration, stock movements, pricing and the two stock
//! reports.
//!
//! ## Stock Adjustment Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  adjust_stock(article_id, Decrease, 3.000)                              │
//! │                                                                         │
//! │  Load article ── missing? ──▶ DbError::NotFound                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  stock::adjust_stock                                                   │
//! │       ├── tracking disabled ──▶ CoreError::StockTrackingDisabled       │
//! │       ├── would go negative ──▶ CoreError::InsufficientStock           │
//! │       ▼                                                                 │
//! │  update_stock(new value) ──▶ Ok(new stock)                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{DbError, ServiceResult};
use crate::pool::Database;
use crate::repository::generate_id;
use belleza_core::validation::{
    validate_barcode, validate_cost_cents, validate_description, validate_sale_price_cents,
};
use belleza_core::{
    pricing, stock, Article, ArticleSupplier, ExpirationAlert, LowStockAlert, Money, PriceEntry,
    Quantity, SaleUnit, StockAdjustmentKind, ValidationError,
};

/// Input for registering a new article.
///
/// Stock always starts at zero; goods arrive through stock adjustments.
#[derive(Debug, Clone, Deserialize)]
pub struct NewArticle {
    pub barcode: String,
    pub description: String,
    pub category_id: Option<String>,
    pub sale_unit: SaleUnit,
    pub track_stock: bool,
    /// Minimum stock threshold in thousandths.
    pub stock_min: i64,
    /// Maximum stock threshold in thousandths.
    pub stock_max: i64,
    pub expires_on: Option<NaiveDate>,
}

/// An article's price resolved through the default list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedPrice {
    /// Net sale price from the default list.
    pub net: Money,
    /// Gross price: net plus the flat 21% VAT.
    pub gross: Money,
}

/// Article operations with stock and pricing rules applied.
#[derive(Debug, Clone)]
pub struct ArticleService {
    db: Database,
}

impl ArticleService {
    /// Creates a new ArticleService.
    pub fn new(db: Database) -> Self {
        ArticleService { db }
    }

    /// Registers a new article.
    ///
    /// ## Checks
    /// - Barcode format and uniqueness
    /// - Description presence
    /// - Category existence, when one is referenced
    pub async fn create(&self, input: NewArticle) -> ServiceResult<Article> {
        validate_barcode(&input.barcode)?;
        validate_description(&input.description)?;

        let barcode = input.barcode.trim().to_string();

        if self.db.articles().get_by_barcode(&barcode).await?.is_some() {
            return Err(ValidationError::Duplicate {
                field: "barcode".to_string(),
                value: barcode,
            }
            .into());
        }

        if let Some(category_id) = &input.category_id {
            if self.db.categories().get_by_id(category_id).await?.is_none() {
                return Err(DbError::not_found("Category", category_id).into());
            }
        }

        let now = Utc::now();
        let article = Article {
            id: generate_id(),
            barcode,
            description: input.description.trim().to_string(),
            category_id: input.category_id,
            sale_unit: input.sale_unit,
            track_stock: input.track_stock,
            stock_on_hand: 0,
            stock_min: input.stock_min,
            stock_max: input.stock_max,
            expires_on: input.expires_on,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        self.db.articles().insert(&article).await?;

        info!(id = %article.id, barcode = %article.barcode, "Article registered");
        Ok(article)
    }

    // -------------------------------------------------------------------------
    // Stock
    // -------------------------------------------------------------------------

    /// Applies a stock adjustment and persists the resulting stock.
    ///
    /// Returns the new stock level.
    pub async fn adjust_stock(
        &self,
        article_id: &str,
        kind: StockAdjustmentKind,
        quantity_thousandths: i64,
    ) -> ServiceResult<Quantity> {
        let article = self.load(article_id).await?;

        let new_stock = stock::adjust_stock(
            &article,
            kind,
            Quantity::from_thousandths(quantity_thousandths),
        )?;

        self.db
            .articles()
            .update_stock(article_id, new_stock.thousandths())
            .await?;

        info!(
            article_id = %article_id,
            kind = %kind.as_str(),
            quantity = %quantity_thousandths,
            new_stock = %new_stock.thousandths(),
            "Stock adjusted"
        );

        Ok(new_stock)
    }

    /// Convenience wrapper: goods received.
    pub async fn increase_stock(
        &self,
        article_id: &str,
        quantity_thousandths: i64,
    ) -> ServiceResult<Quantity> {
        self.adjust_stock(article_id, StockAdjustmentKind::Increase, quantity_thousandths)
            .await
    }

    /// Convenience wrapper: shrinkage or outgoing goods.
    pub async fn decrease_stock(
        &self,
        article_id: &str,
        quantity_thousandths: i64,
    ) -> ServiceResult<Quantity> {
        self.adjust_stock(article_id, StockAdjustmentKind::Decrease, quantity_thousandths)
            .await
    }

    /// Low-stock report: every tracked article at or below its minimum.
    pub async fn low_stock_report(&self) -> ServiceResult<Vec<LowStockAlert>> {
        let articles = self.db.articles().list_tracked().await?;

        Ok(articles.iter().filter_map(stock::low_stock_alert).collect())
    }

    /// Expiration report: dated articles expired or expiring within the
    /// 30-day horizon, relative to `today`.
    pub async fn expiration_report(&self, today: NaiveDate) -> ServiceResult<Vec<ExpirationAlert>> {
        let articles = self.db.articles().list_dated().await?;

        Ok(articles
            .iter()
            .filter_map(|a| stock::expiration_alert(a, today))
            .collect())
    }

    // -------------------------------------------------------------------------
    // Pricing
    // -------------------------------------------------------------------------

    /// Sets an article's price on a list (insert or update).
    ///
    /// The profit margin is computed here and stored alongside the
    /// prices, so list views never recompute it.
    pub async fn set_price(
        &self,
        article_id: &str,
        price_list_id: &str,
        cost_cents: i64,
        sale_price_cents: i64,
    ) -> ServiceResult<PriceEntry> {
        validate_cost_cents(cost_cents)?;
        validate_sale_price_cents(sale_price_cents)?;

        // Both sides must exist; the FK would catch it anyway but the
        // error would name the wrong thing.
        self.load(article_id).await?;
        if self.db.price_lists().get_by_id(price_list_id).await?.is_none() {
            return Err(DbError::not_found("PriceList", price_list_id).into());
        }

        let entry = PriceEntry {
            id: generate_id(),
            article_id: article_id.to_string(),
            price_list_id: price_list_id.to_string(),
            cost_cents,
            sale_price_cents,
            profit_margin_bps: pricing::profit_margin_bps(
                Money::from_cents(cost_cents),
                Money::from_cents(sale_price_cents),
            ),
            updated_at: Utc::now(),
        };

        self.db.prices().upsert(&entry).await?;

        info!(
            article_id = %article_id,
            price_list_id = %price_list_id,
            sale_price_cents = %sale_price_cents,
            "Price set"
        );

        Ok(entry)
    }

    /// Resolves an article's price through the default list.
    ///
    /// Returns `None` when no list is flagged default or the article has
    /// no entry on it. The gross price carries the flat 21% VAT.
    pub async fn resolve_default_price(
        &self,
        article_id: &str,
    ) -> ServiceResult<Option<ResolvedPrice>> {
        self.load(article_id).await?;

        let entries = self.db.prices().list_for_article(article_id).await?;
        let lists = self.db.price_lists().list_active().await?;

        Ok(pricing::default_sale_price(&entries, &lists).map(|entry| {
            let net = entry.sale_price();
            ResolvedPrice {
                net,
                gross: pricing::price_with_vat(net),
            }
        }))
    }

    // -------------------------------------------------------------------------
    // Suppliers
    // -------------------------------------------------------------------------

    /// Links a supplier to an article with the negotiated cost.
    ///
    /// Re-linking an existing pair updates the cost. When `make_default`
    /// is set, any previous default link is cleared.
    pub async fn link_supplier(
        &self,
        article_id: &str,
        supplier_id: &str,
        cost_cents: i64,
        make_default: bool,
    ) -> ServiceResult<ArticleSupplier> {
        validate_cost_cents(cost_cents)?;

        self.load(article_id).await?;
        if self.db.suppliers().get_by_id(supplier_id).await?.is_none() {
            return Err(DbError::not_found("Supplier", supplier_id).into());
        }

        let link = ArticleSupplier {
            id: generate_id(),
            article_id: article_id.to_string(),
            supplier_id: supplier_id.to_string(),
            cost_cents,
            is_default: false,
            updated_at: Utc::now(),
        };

        self.db.suppliers().upsert_link(&link).await?;

        if make_default {
            self.db
                .suppliers()
                .set_default_link(article_id, supplier_id)
                .await?;
        }

        info!(
            article_id = %article_id,
            supplier_id = %supplier_id,
            cost_cents = %cost_cents,
            "Supplier linked"
        );

        // Reload so the default flag reflects what was stored
        let stored = self
            .db
            .suppliers()
            .get_link(article_id, supplier_id)
            .await?
            .ok_or_else(|| DbError::not_found("ArticleSupplier", article_id))?;

        Ok(stored)
    }

    /// Makes one linked supplier the article's default.
    pub async fn set_default_supplier(
        &self,
        article_id: &str,
        supplier_id: &str,
    ) -> ServiceResult<()> {
        self.db
            .suppliers()
            .set_default_link(article_id, supplier_id)
            .await?;

        info!(
            article_id = %article_id,
            supplier_id = %supplier_id,
            "Default supplier set"
        );

        Ok(())
    }

    async fn load(&self, id: &str) -> ServiceResult<Article> {
        self.db
            .articles()
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Article", id).into())
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
    use belleza_core::{CoreError, ExpirationState, PriceList, StockLevel, Supplier};
    use chrono::Duration;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn tracked_article(barcode: &str) -> NewArticle {
        NewArticle {
            barcode: barcode.to_string(),
            description: "Shampoo Nutritivo 400ml".to_string(),
            category_id: None,
            sale_unit: SaleUnit::Unit,
            track_stock: true,
            stock_min: 10_000, // 10 units
            stock_max: 50_000,
            expires_on: None,
        }
    }

    async fn insert_list(db: &Database, id: &str, name: &str, is_default: bool) {
        let now = Utc::now();
        db.price_lists()
            .insert(&PriceList {
                id: id.to_string(),
                name: name.to_string(),
                description: None,
                is_default,
                is_active: true,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
    }

    async fn insert_supplier(db: &Database, id: &str, tax_id: &str) {
        let now = Utc::now();
        db.suppliers()
            .insert(&Supplier {
                id: id.to_string(),
                supplier_number: None,
                legal_name: "Distribuidora Bella SA".to_string(),
                trade_name: None,
                tax_id: tax_id.to_string(),
                phone: None,
                email: None,
                contact_name: None,
                notes: None,
                is_active: true,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_barcode() {
        let db = test_db().await;
        let service = db.article_service();

        service.create(tracked_article("7791234567890")).await.unwrap();

        let err = service
            .create(tracked_article("7791234567890"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Business(CoreError::Validation(ValidationError::Duplicate { .. }))
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_missing_category() {
        let db = test_db().await;
        let service = db.article_service();

        let mut input = tracked_article("7791234567890");
        input.category_id = Some("no-such-category".to_string());

        let err = service.create(input).await.unwrap_err();
        assert!(matches!(err, ServiceError::Db(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_stock_adjustment_round_trip() {
        let db = test_db().await;
        let service = db.article_service();
        let article = service.create(tracked_article("7791234567890")).await.unwrap();

        let stock = service.increase_stock(&article.id, 20_000).await.unwrap();
        assert_eq!(stock, Quantity::from_units(20));

        let stock = service.decrease_stock(&article.id, 5_000).await.unwrap();
        assert_eq!(stock, Quantity::from_units(15));

        let stock = service
            .adjust_stock(&article.id, StockAdjustmentKind::Set, 8_000)
            .await
            .unwrap();
        assert_eq!(stock, Quantity::from_units(8));

        let reloaded = db.articles().get_by_id(&article.id).await.unwrap().unwrap();
        assert_eq!(reloaded.stock_on_hand, 8_000);
    }

    #[tokio::test]
    async fn test_decrease_below_zero_rejected_and_not_persisted() {
        let db = test_db().await;
        let service = db.article_service();
        let article = service.create(tracked_article("7791234567890")).await.unwrap();

        service.increase_stock(&article.id, 3_000).await.unwrap();

        let err = service.decrease_stock(&article.id, 5_000).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Business(CoreError::InsufficientStock { .. })
        ));

        let reloaded = db.articles().get_by_id(&article.id).await.unwrap().unwrap();
        assert_eq!(reloaded.stock_on_hand, 3_000);
    }

    #[tokio::test]
    async fn test_low_stock_report() {
        let db = test_db().await;
        let service = db.article_service();

        let critical = service.create(tracked_article("CRIT-1")).await.unwrap();
        service.increase_stock(&critical.id, 5_000).await.unwrap();

        let healthy = service.create(tracked_article("OK-1")).await.unwrap();
        service.increase_stock(&healthy.id, 30_000).await.unwrap();

        let report = service.low_stock_report().await.unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].barcode, "CRIT-1");
        assert_eq!(report[0].level, StockLevel::Critical);
        assert_eq!(report[0].shortfall, Quantity::from_units(5));
    }

    #[tokio::test]
    async fn test_expiration_report_sorted_and_scoped() {
        let db = test_db().await;
        let service = db.article_service();
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

        let mut soon = tracked_article("SOON-1");
        soon.expires_on = Some(today + Duration::days(5));
        service.create(soon).await.unwrap();

        let mut far = tracked_article("FAR-1");
        far.expires_on = Some(today + Duration::days(90));
        service.create(far).await.unwrap();

        service.create(tracked_article("UNDATED-1")).await.unwrap();

        let report = service.expiration_report(today).await.unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].barcode, "SOON-1");
        assert_eq!(report[0].state, ExpirationState::Critical);
        assert_eq!(report[0].days_remaining, 5);
    }

    #[tokio::test]
    async fn test_set_price_and_resolve_default() {
        let db = test_db().await;
        let service = db.article_service();
        let article = service.create(tracked_article("7791234567890")).await.unwrap();

        insert_list(&db, "counter", "Mostrador", true).await;
        insert_list(&db, "wholesale", "Mayorista", false).await;

        service.set_price(&article.id, "counter", 4_000, 10_000).await.unwrap();
        service.set_price(&article.id, "wholesale", 4_000, 7_000).await.unwrap();

        let resolved = service.resolve_default_price(&article.id).await.unwrap().unwrap();
        assert_eq!(resolved.net, Money::from_cents(10_000));
        assert_eq!(resolved.gross, Money::from_cents(12_100));
    }

    #[tokio::test]
    async fn test_resolve_default_price_none_without_default_list() {
        let db = test_db().await;
        let service = db.article_service();
        let article = service.create(tracked_article("7791234567890")).await.unwrap();

        insert_list(&db, "wholesale", "Mayorista", false).await;
        service.set_price(&article.id, "wholesale", 4_000, 7_000).await.unwrap();

        let resolved = service.resolve_default_price(&article.id).await.unwrap();
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn test_set_price_stores_margin() {
        let db = test_db().await;
        let service = db.article_service();
        let article = service.create(tracked_article("7791234567890")).await.unwrap();

        insert_list(&db, "counter", "Mostrador", true).await;

        let entry = service.set_price(&article.id, "counter", 1_000, 1_250).await.unwrap();
        assert_eq!(entry.profit_margin_bps, 2_500);
    }

    #[tokio::test]
    async fn test_set_price_rejects_zero_sale_price() {
        let db = test_db().await;
        let service = db.article_service();
        let article = service.create(tracked_article("7791234567890")).await.unwrap();

        insert_list(&db, "counter", "Mostrador", true).await;

        let err = service.set_price(&article.id, "counter", 1_000, 0).await.unwrap_err();
        assert!(matches!(err, ServiceError::Business(_)));
    }

    #[tokio::test]
    async fn test_default_supplier_flag_moves() {
        let db = test_db().await;
        let service = db.article_service();
        let article = service.create(tracked_article("7791234567890")).await.unwrap();

        insert_supplier(&db, "s-1", "30-11111111-1").await;
        insert_supplier(&db, "s-2", "30-22222222-2").await;

        let first = service.link_supplier(&article.id, "s-1", 4_000, true).await.unwrap();
        assert!(first.is_default);

        let second = service.link_supplier(&article.id, "s-2", 3_800, true).await.unwrap();
        assert!(second.is_default);

        // The first supplier lost the flag
        let links = db.suppliers().list_links_for_article(&article.id).await.unwrap();
        let first_again = links.iter().find(|l| l.supplier_id == "s-1").unwrap();
        assert!(!first_again.is_default);
    }

    #[tokio::test]
    async fn test_relink_cost_update_keeps_default_flag() {
        let db = test_db().await;
        let service = db.article_service();
        let article = service.create(tracked_article("7791234567890")).await.unwrap();

        insert_supplier(&db, "s-1", "30-11111111-1").await;

        let link = service.link_supplier(&article.id, "s-1", 4_000, true).await.unwrap();
        assert!(link.is_default);

        // Re-negotiating the cost must not touch the default flag
        let relinked = service.link_supplier(&article.id, "s-1", 3_500, false).await.unwrap();
        assert_eq!(relinked.cost_cents, 3_500);
        assert!(relinked.is_default);
    }
}
