//! # Domain Types
//!
//! Core domain types used throughout Tableside.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐ 1   N ┌─────────────────┐ 1   N ┌──────────────┐  │
//! │  │     Table       │──────►│  TableSession   │──────►│    Order     │  │
//! │  │  ─────────────  │       │  ─────────────  │       │ ──────────── │  │
//! │  │  id             │       │  id             │       │ id           │  │
//! │  │  table_number   │       │  table_id (FK)  │       │ session (FK) │  │
//! │  │  capacity?      │       │  opened_at      │       │ product (FK) │  │
//! │  └─────────────────┘       │  closed_at?     │       │ quantity     │  │
//! │                            └─────────────────┘       │ price (snap) │  │
//! │  ┌─────────────────┐ 1                          N    └──────────────┘  │
//! │  │    Product      │─────────────────────────────────────────┘         │
//! │  │  name, price    │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identifiers are the integer primary keys assigned by storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Table
// =============================================================================

/// A physical table in the dining room.
///
/// Created at seed time; never changed while the service runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Table {
    pub id: i64,
    /// Number printed on the table, unique.
    pub table_number: i64,
    /// Number of seats, if known.
    pub capacity: Option<i64>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Table Session
// =============================================================================

/// One visit at a table, from opening until closing.
///
/// ## Lifecycle
/// ```text
///   NONE ──open──► OPEN ──close──► CLOSED
///                   │                 │
///             closed_at = null   closed_at = time of close
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct TableSession {
    pub id: i64,
    pub table_id: i64,
    #[ts(as = "String")]
    pub opened_at: DateTime<Utc>,
    #[ts(as = "Option<String>")]
    pub closed_at: Option<DateTime<Utc>>,
}

impl TableSession {
    /// A session is open until `closed_at` is set.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.closed_at.is_none()
    }
}

/// State of a table, derived from its most recent session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// The table has never been opened.
    None,
    /// The most recent session is open.
    Open,
    /// The most recent session has been closed.
    Closed,
}

impl SessionState {
    /// Derives the state from the most recent session by `opened_at`.
    pub fn of(latest: Option<&TableSession>) -> Self {
        match latest {
            None => SessionState::None,
            Some(session) if session.is_open() => SessionState::Open,
            Some(_) => SessionState::Closed,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    pub id: i64,
    /// Display name, trimmed.
    pub name: String,
    /// Current menu price.
    #[ts(type = "number")]
    pub price: Money,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Order
// =============================================================================

/// A line item ordered during a table session.
///
/// Uses the snapshot pattern: `price` is copied from the product when the
/// order is placed and never follows later menu changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Order {
    pub id: i64,
    pub table_session_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    /// Unit price at the time of ordering (frozen).
    #[ts(type = "number")]
    pub price: Money,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Line total (price × quantity), `None` if it overflows.
    #[inline]
    pub fn total(&self) -> Option<Money> {
        self.price.multiply_quantity(self.quantity)
    }
}

/// A priced order ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub table_session_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub price: Money,
}

// =============================================================================
// Read Models
// =============================================================================

/// An order joined with its product, as shown on the session screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct OrderLine {
    pub id: i64,
    pub table_session_id: i64,
    pub product_id: i64,
    /// Current product name.
    pub product_name: String,
    /// Snapshot unit price.
    #[ts(type = "number")]
    pub price: Money,
    pub quantity: i64,
    /// `price × quantity`.
    #[ts(type = "number")]
    pub total: Money,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Running totals of a session. Zero for a session without orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct SessionSummary {
    #[ts(type = "number")]
    pub total: Money,
    pub quantity: i64,
}

impl SessionSummary {
    /// Folds a list of orders into a summary, `None` on overflow.
    pub fn from_orders<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Option<Self> {
        orders.into_iter().try_fold(Self::default(), |acc, order| {
            Some(Self {
                total: acc.total.checked_add(order.total()?)?,
                quantity: acc.quantity.checked_add(order.quantity)?,
            })
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn session(closed: bool) -> TableSession {
        let now = Utc::now();
        TableSession {
            id: 1,
            table_id: 1,
            opened_at: now,
            closed_at: closed.then_some(now),
        }
    }

    fn order(price_cents: i64, quantity: i64) -> Order {
        let now = Utc::now();
        Order {
            id: 1,
            table_session_id: 1,
            product_id: 1,
            quantity,
            price: Money::from_cents(price_cents),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_session_state_derivation() {
        assert_eq!(SessionState::of(None), SessionState::None);
        assert_eq!(SessionState::of(Some(&session(false))), SessionState::Open);
        assert_eq!(SessionState::of(Some(&session(true))), SessionState::Closed);
    }

    #[test]
    fn test_order_total() {
        assert_eq!(order(2550, 2).total().unwrap().cents(), 5100);
        assert_eq!(order(i64::MAX / 2 + 1, 2).total(), None);
    }

    #[test]
    fn test_summary_from_orders() {
        let orders = vec![order(2550, 2), order(400, 3)];
        let summary = SessionSummary::from_orders(&orders).unwrap();
        assert_eq!(summary.total.cents(), 6300);
        assert_eq!(summary.quantity, 5);

        let empty = SessionSummary::from_orders(&[]).unwrap();
        assert_eq!(empty, SessionSummary::default());

        let huge = vec![order(i64::MAX / 4, 3), order(i64::MAX / 4, 3)];
        assert_eq!(SessionSummary::from_orders(&huge), None);
    }

    #[test]
    fn test_session_serializes_null_closed_at() {
        let json = serde_json::to_value(session(false)).unwrap();
        assert!(json["closed_at"].is_null());
    }
}
