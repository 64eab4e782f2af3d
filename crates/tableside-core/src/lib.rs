//! # tableside-core: Pure Business Logic for Tableside
//!
//! This crate is the **heart** of Tableside. It owns the table session
//! lifecycle, order attachment and the validation of every inbound command.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tableside Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  │    /tables-sessions ──► /orders ──► /products ──► /metrics      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ tableside-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ lifecycle │  │ ordering  │  │  catalog  │  │ validation│  │   │
//! │  │   │ open/close│  │ snapshot  │  │   CRUD    │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                         │ ports (traits)                        │   │
//! │  └─────────────────────────┼───────────────────────────────────────┘   │
//! │                            │                                            │
//! │  ┌─────────────────────────▼───────────────────────────────────────┐   │
//! │  │                 tableside-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Table, TableSession, Product, Order, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//! - [`commands`] - Typed input contracts for each operation
//! - [`ports`] - Store traits the operations depend on
//! - [`lifecycle`] - Opening and closing table sessions
//! - [`ordering`] - Attaching priced orders to open sessions
//! - [`catalog`] - Product maintenance
//!
//! ## Example Usage
//!
//! ```rust
//! use tableside_core::money::Money;
//!
//! let price = Money::parse_decimal("25.50").unwrap();
//! assert_eq!(price.cents(), 2550);
//! assert_eq!(price.multiply_quantity(2).unwrap().cents(), 5100);
//! ```

pub mod catalog;
pub mod commands;
pub mod error;
pub mod lifecycle;
pub mod money;
pub mod ordering;
pub mod ports;
pub mod types;
pub mod validation;

#[cfg(test)]
pub(crate) mod memory;

pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use money::Money;
pub use types::*;

/// Maximum quantity of a single order line.
///
/// Guards against typing 1000 instead of 10 on a handheld.
pub const MAX_ORDER_QUANTITY: i64 = 999;

/// Largest accepted unit price, in cents (1,000,000.00).
///
/// Keeps `price × quantity` and session sums well inside an `i64`.
pub const MAX_PRICE_CENTS: i64 = 100_000_000;

const _: () = assert!(MAX_PRICE_CENTS.checked_mul(MAX_ORDER_QUANTITY).is_some());

/// Minimum product name length, measured after trimming.
pub const MIN_PRODUCT_NAME_LEN: usize = 6;

/// Maximum product name length, measured after trimming.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;
