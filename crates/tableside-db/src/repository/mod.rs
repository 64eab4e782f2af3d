//! # Repository Module
//!
//! Database repository implementations for Tableside.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repositories and Store Ports                         │
//! │                                                                         │
//! │  tableside-core operation                                              │
//! │       │                                                                 │
//! │       │  sessions.insert_open_session(4)     (port: SessionStore)      │
//! │       ▼                                                                 │
//! │  SessionRepository                                                     │
//! │  ├── insert_open(&self, table_id)   → DbResult<TableSession>           │
//! │  ├── close(&self, id)               → DbResult<Option<TableSession>>   │
//! │  └── impl SessionStore              → maps DbError → CoreError         │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Inherent methods speak `DbResult`; the port impls translate the
//! constraint failures the domain cares about into `CoreError` variants.
//!
//! ## Available Repositories
//!
//! - [`TableRepository`](table::TableRepository) - Dining room tables
//! - [`SessionRepository`](session::SessionRepository) - Table sessions
//! - [`ProductRepository`](product::ProductRepository) - Menu CRUD and search
//! - [`OrderRepository`](order::OrderRepository) - Orders and session read models

pub mod order;
pub mod product;
pub mod session;
pub mod table;
