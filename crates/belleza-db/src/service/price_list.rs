//! # Price List Service
//!
//! Price list lifecycle with the single-default invariant and guarded
//! deletion.
//!
//! ## Delete Guards
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  delete("wholesale")                                                    │
//! │                                                                         │
//! │  is_default? ──▶ CoreError::DefaultPriceListUndeletable                │
//! │       │          (the register would lose its price source)            │
//! │       ▼                                                                 │
//! │  priced articles on it? ──▶ CoreError::PriceListInUse                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DELETE row                                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::info;

use crate::error::{DbError, ServiceResult};
use crate::pool::Database;
use crate::repository::generate_id;
use belleza_core::validation::validate_name;
use belleza_core::{CoreError, PriceList};

/// Price list operations with the default-list rules applied.
#[derive(Debug, Clone)]
pub struct PriceListService {
    db: Database,
}

impl PriceListService {
    /// Creates a new PriceListService.
    pub fn new(db: Database) -> Self {
        PriceListService { db }
    }

    /// Creates a price list.
    ///
    /// When `make_default` is set, or when no default exists yet, the new
    /// list becomes the default (the store must always end up with a
    /// usable price source once it has any list).
    pub async fn create(
        &self,
        name: &str,
        description: Option<String>,
        make_default: bool,
    ) -> ServiceResult<PriceList> {
        validate_name(name)?;

        let now = Utc::now();
        let list = PriceList {
            id: generate_id(),
            name: name.trim().to_string(),
            description,
            is_default: false,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        self.db.price_lists().insert(&list).await?;

        let no_default_yet = self.db.price_lists().get_default().await?.is_none();
        if make_default || no_default_yet {
            self.db.price_lists().set_default(&list.id).await?;
        }

        info!(id = %list.id, name = %list.name, "Price list created");

        // Reload so the default flag reflects what was stored
        self.db
            .price_lists()
            .get_by_id(&list.id)
            .await?
            .ok_or_else(|| DbError::not_found("PriceList", &list.id).into())
    }

    /// Updates a list's name, description and active flag.
    ///
    /// The default flag only moves through [`PriceListService::set_default`],
    /// so an update can never leave the store without a default.
    pub async fn update(&self, list: &PriceList) -> ServiceResult<()> {
        validate_name(&list.name)?;
        self.db.price_lists().update(list).await?;
        Ok(())
    }

    /// Makes one list the default, clearing any previous default.
    pub async fn set_default(&self, id: &str) -> ServiceResult<()> {
        self.db.price_lists().set_default(id).await?;
        info!(id = %id, "Default price list changed");
        Ok(())
    }

    /// Permanently deletes a price list, unless it is the default or
    /// still prices articles.
    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        let list = self
            .db
            .price_lists()
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("PriceList", id))?;

        if list.is_default {
            return Err(CoreError::DefaultPriceListUndeletable { name: list.name }.into());
        }

        let articles = self.db.prices().count_for_list(id).await?;
        if articles > 0 {
            return Err(CoreError::PriceListInUse {
                name: list.name,
                articles,
            }
            .into());
        }

        self.db.price_lists().delete(id).await?;

        info!(id = %id, "Price list deleted");
        Ok(())
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
    use crate::service::article::NewArticle;
    use belleza_core::SaleUnit;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_first_list_becomes_default() {
        let db = test_db().await;
        let service = db.price_list_service();

        let first = service.create("Mostrador", None, false).await.unwrap();
        assert!(first.is_default);

        let second = service.create("Mayorista", None, false).await.unwrap();
        assert!(!second.is_default);
    }

    #[tokio::test]
    async fn test_set_default_moves_the_flag() {
        let db = test_db().await;
        let service = db.price_list_service();

        let first = service.create("Mostrador", None, false).await.unwrap();
        let second = service.create("Mayorista", None, false).await.unwrap();

        service.set_default(&second.id).await.unwrap();

        let default = db.price_lists().get_default().await.unwrap().unwrap();
        assert_eq!(default.id, second.id);

        let first_again = db.price_lists().get_by_id(&first.id).await.unwrap().unwrap();
        assert!(!first_again.is_default);
    }

    #[tokio::test]
    async fn test_delete_default_list_is_rejected() {
        let db = test_db().await;
        let service = db.price_list_service();

        let list = service.create("Mostrador", None, true).await.unwrap();

        let err = service.delete(&list.id).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Business(CoreError::DefaultPriceListUndeletable { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_priced_list_is_rejected() {
        let db = test_db().await;
        let service = db.price_list_service();

        service.create("Mostrador", None, true).await.unwrap();
        let wholesale = service.create("Mayorista", None, false).await.unwrap();

        let article = db
            .article_service()
            .create(NewArticle {
                barcode: "7791234567890".to_string(),
                description: "Crema de Manos 75ml".to_string(),
                category_id: None,
                sale_unit: SaleUnit::Unit,
                track_stock: false,
                stock_min: 0,
                stock_max: 0,
                expires_on: None,
            })
            .await
            .unwrap();

        db.article_service()
            .set_price(&article.id, &wholesale.id, 2_000, 4_500)
            .await
            .unwrap();

        let err = service.delete(&wholesale.id).await.unwrap_err();
        match err {
            ServiceError::Business(CoreError::PriceListInUse { name, articles }) => {
                assert_eq!(name, "Mayorista");
                assert_eq!(articles, 1);
            }
            other => panic!("expected PriceListInUse, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_unused_list_succeeds() {
        let db = test_db().await;
        let service = db.price_list_service();

        service.create("Mostrador", None, true).await.unwrap();
        let staff = service.create("Empleados", None, false).await.unwrap();

        service.delete(&staff.id).await.unwrap();
        assert!(db.price_lists().get_by_id(&staff.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_name_is_rejected() {
        let db = test_db().await;
        let service = db.price_list_service();

        service.create("Mostrador", None, false).await.unwrap();

        let err = service.create("Mostrador", None, false).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Db(DbError::UniqueViolation { .. })
        ));
    }
}
