//! # Repository Module
//!
//! Database repository implementations for Belleza POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Service / outer surface                                               │
//! │       │                                                                 │
//! │       │  db.articles().get_by_barcode("7791234567890")                 │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  ArticleRepository                                                     │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── get_by_barcode(&self, barcode)                                    │
//! │  ├── insert(&self, article)                                            │
//! │  └── update(&self, article)                                            │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Repositories never apply business rules. A stock decrement that       │
//! │  would go negative is rejected by the SERVICE (via belleza-core)       │
//! │  before any repository write happens.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`customer::CustomerRepository`] - Customer CRUD and balance writes
//! - [`article::ArticleRepository`] - Article CRUD and stock writes
//! - [`price::PriceRepository`] - Price entries per article and list
//! - [`price_list::PriceListRepository`] - Price list CRUD and default flag
//! - [`category::CategoryRepository`] - Category CRUD
//! - [`supplier::SupplierRepository`] - Supplier CRUD and article links
//! - [`branch::BranchRepository`] - Branch CRUD
//! - [`user::UserRepository`] - User CRUD

pub mod article;
pub mod branch;
pub mod category;
pub mod customer;
pub mod price;
pub mod price_list;
pub mod supplier;
pub mod user;

/// Generates a fresh entity ID (UUID v4).
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
