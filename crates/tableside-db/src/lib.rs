//! # tableside-db: Database Layer for Tableside
//!
//! This crate provides database access for the Tableside API.
//! It uses SQLite with sqlx for async operations and implements the store
//! ports declared in `tableside-core`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tableside Data Flow                              │
//! │                                                                         │
//! │  HTTP handler (POST /orders)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  tableside-core::ordering::place_order(&sessions, &products, &orders)  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   tableside-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │    │  (embedded)  │  │   │
//! │  │   │               │    │ TableRepo      │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ SessionRepo    │    │ 0001_initial │  │   │
//! │  │   │               │    │ ProductRepo    │    │   _schema    │  │   │
//! │  │   │               │    │ OrderRepo      │    │              │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (./data/tableside.db)                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Store port implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tableside_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./data/tableside.db")).await?;
//! let tables = db.tables().list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::order::OrderRepository;
pub use repository::product::ProductRepository;
pub use repository::session::SessionRepository;
pub use repository::table::TableRepository;
