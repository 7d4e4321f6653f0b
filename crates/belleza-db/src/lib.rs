//! # belleza-db: Database Layer for Belleza POS
//!
//! SQLite persistence for the Belleza POS management backend.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │               Outer surface (HTTP API, desktop, CLI)                │
//! └──────────────────────────────┬──────────────────────────────────────┘
//!                                │
//! ┌──────────────────────────────▼──────────────────────────────────────┐
//! │                   ★ belleza-db (THIS CRATE) ★                       │
//! │                                                                     │
//! │  ┌──────────────────────────┐   ┌─────────────────────────────────┐│
//! │  │       service/           │   │         repository/             ││
//! │  │  load → core rule →      │──▶│  customers, articles, prices,   ││
//! │  │  store orchestration     │   │  suppliers, branches, users     ││
//! │  └────────────┬─────────────┘   └───────────────┬─────────────────┘│
//! │               │                                 │                  │
//! │               ▼                                 ▼                  │
//! │  ┌──────────────────────────┐   ┌─────────────────────────────────┐│
//! │  │  belleza-core (rules)    │   │  SqlitePool + migrations        ││
//! │  └──────────────────────────┘   └─────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Repository vs Service
//!
//! Repositories are thin: one SQL statement per method, no business
//! rules. Services compose them with belleza-core: a credit sale loads
//! the customer, asks the ledger for the new balance, and persists it.
//! Outer surfaces should call services; repositories exist for reads
//! and plumbing.
//!
//! ## Example
//! ```rust,ignore
//! use belleza_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./belleza.db")).await?;
//!
//! let balance = db.customer_service()
//!     .register_sale("customer-uuid", 45_000)
//!     .await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod service;

pub use error::{DbError, DbResult, ServiceError, ServiceResult};
pub use pool::{Database, DbConfig};
