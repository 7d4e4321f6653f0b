//! # Service Module
//!
//! Orchestration layer: load → business rule → store.
//!
//! ## Why Services Exist
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Repositories execute SQL. belleza-core decides what is allowed.       │
//! │  Services glue the two:                                                 │
//! │                                                                         │
//! │  register_sale("c-1", 45_000)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  customers.get_by_id("c-1") ──── None? ──▶ DbError::NotFound           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ledger::apply_sale(&customer, $450.00) ── rejected? ──▶ CoreError     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  customers.update_balance("c-1", new_balance)                          │
//! │                                                                         │
//! │  Either failure surfaces as one ServiceError; outer surfaces match     │
//! │  on it to pick a status code or dialog.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Services
//!
//! - [`customer::CustomerService`] - Credit accounts: payments and sales
//! - [`article::ArticleService`] - Stock adjustments, reports, pricing
//! - [`price_list::PriceListService`] - Default handling, guarded deletes
//! - [`category::CategoryService`] - Guarded deletes

pub mod article;
pub mod category;
pub mod customer;
pub mod price_list;
