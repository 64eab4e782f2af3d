//! # Store Ports
//!
//! Traits through which the lifecycle, ordering and catalog operations
//! reach storage.
//!
//! ```text
//! ┌───────────────────┐        ┌──────────────────────────────────────┐
//! │  lifecycle        │───────►│ TableStore + SessionStore            │
//! │  ordering         │───────►│ SessionStore + ProductStore          │
//! │                   │        │   + OrderStore                       │
//! │  catalog          │───────►│ ProductStore                         │
//! └───────────────────┘        └───────────────┬──────────────────────┘
//!                                              │ implemented by
//!                              ┌───────────────┴──────────────┐
//!                              │ tableside-db repositories    │
//!                              │ in-memory store (tests)      │
//!                              └──────────────────────────────┘
//! ```
//!
//! Implementations own the clock: `opened_at`, `closed_at`, `created_at`
//! and `updated_at` are stamped by the store.

use async_trait::async_trait;

use crate::commands::{ProductDraft, ProductFilter};
use crate::error::CoreResult;
use crate::types::{NewOrder, Order, OrderLine, Product, SessionSummary, Table, TableSession};

/// Read access to dining room tables.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// All tables ordered by `table_number`.
    async fn list_tables(&self) -> CoreResult<Vec<Table>>;

    async fn find_table(&self, id: i64) -> CoreResult<Option<Table>>;
}

/// Table session persistence.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// All sessions, open ones first, then by `closed_at` ascending.
    async fn list_sessions(&self) -> CoreResult<Vec<TableSession>>;

    async fn find_session(&self, id: i64) -> CoreResult<Option<TableSession>>;

    /// The most recent session of a table by `opened_at`.
    async fn latest_session_for_table(&self, table_id: i64) -> CoreResult<Option<TableSession>>;

    /// Inserts an open session.
    ///
    /// Fails with `CoreError::TableAlreadyOpen` if the table already has an
    /// open session, even when that session was created concurrently.
    async fn insert_open_session(&self, table_id: i64) -> CoreResult<TableSession>;

    /// Sets `closed_at` on a session that is still open.
    ///
    /// Returns `None` when no open session with this id exists.
    async fn close_session(&self, id: i64) -> CoreResult<Option<TableSession>>;
}

/// Menu persistence.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Products matching the filter, ordered by name.
    async fn list_products(&self, filter: &ProductFilter) -> CoreResult<Vec<Product>>;

    async fn find_product(&self, id: i64) -> CoreResult<Option<Product>>;

    async fn insert_product(&self, draft: &ProductDraft) -> CoreResult<Product>;

    /// Returns `None` if the product does not exist.
    async fn update_product(&self, id: i64, draft: &ProductDraft) -> CoreResult<Option<Product>>;

    /// Returns `false` if the product does not exist.
    ///
    /// Fails with `CoreError::ProductInUse` if orders reference it.
    async fn delete_product(&self, id: i64) -> CoreResult<bool>;
}

/// Order persistence and read models.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Inserts the order only if its session is still open.
    ///
    /// Returns `None` when the session is closed (or missing) at insert time.
    async fn insert_order_if_session_open(&self, order: &NewOrder) -> CoreResult<Option<Order>>;

    /// Orders of a session joined with product names, newest first.
    async fn list_order_lines(&self, table_session_id: i64) -> CoreResult<Vec<OrderLine>>;

    /// Totals of a session; zero when it has no orders.
    async fn summarize_session(&self, table_session_id: i64) -> CoreResult<SessionSummary>;
}
