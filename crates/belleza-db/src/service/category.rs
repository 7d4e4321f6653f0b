//! # Category Service
//!
//! Category lifecycle. The only rule worth a service: a category that
//! still holds active articles cannot be deleted.

use chrono::Utc;
use tracing::info;

use crate::error::{DbError, ServiceResult};
use crate::pool::Database;
use crate::repository::generate_id;
use belleza_core::validation::{validate_name, validate_tax_rate_bps};
use belleza_core::{Category, CoreError};

/// Category operations with the delete guard applied.
#[derive(Debug, Clone)]
pub struct CategoryService {
    db: Database,
}

impl CategoryService {
    /// Creates a new CategoryService.
    pub fn new(db: Database) -> Self {
        CategoryService { db }
    }

    /// Creates a category.
    pub async fn create(
        &self,
        name: &str,
        description: Option<String>,
        vat_bps: u32,
    ) -> ServiceResult<Category> {
        validate_name(name)?;
        validate_tax_rate_bps(vat_bps)?;

        let now = Utc::now();
        let category = Category {
            id: generate_id(),
            name: name.trim().to_string(),
            description,
            vat_bps: vat_bps as i64,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        self.db.categories().insert(&category).await?;

        info!(id = %category.id, name = %category.name, "Category created");
        Ok(category)
    }

    /// Updates a category.
    pub async fn update(&self, category: &Category) -> ServiceResult<()> {
        validate_name(&category.name)?;
        validate_tax_rate_bps(category.vat_bps as u32)?;
        self.db.categories().update(category).await?;
        Ok(())
    }

    /// Permanently deletes a category, unless articles still reference it.
    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        let category = self
            .db
            .categories()
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Category", id))?;

        let articles = self.db.articles().count_by_category(id).await?;
        if articles > 0 {
            return Err(CoreError::CategoryInUse {
                name: category.name,
                articles,
            }
            .into());
        }

        self.db.categories().delete(id).await?;

        info!(id = %id, "Category deleted");
        Ok(())
    }
}

// =============================================================================
// Integration Tests (in-memory SQLite)
// =============================================================================
