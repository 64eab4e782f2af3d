//! # Commands
//!
//! Typed input contracts, one per operation.
//!
//! ```text
//! JSON body ──serde──► *Input ──validate()──► Command ──► lifecycle / ordering / catalog
//!                        │                        │
//!                 shape & types            ranges & lengths
//! ```
//!
//! A command can only be built through `validate()`, so the operations
//! never see unchecked input.

use serde::Deserialize;
use ts_rs::TS;

use crate::money::Money;
use crate::validation::{
    validate_id, validate_price, validate_product_name, validate_quantity, validate_search_query,
    ValidationResult,
};

// =============================================================================
// Session Commands
// =============================================================================

/// Body of `POST /tables-sessions`.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct OpenSessionInput {
    pub table_id: i64,
}

impl OpenSessionInput {
    pub fn validate(self) -> ValidationResult<OpenSession> {
        Ok(OpenSession {
            table_id: validate_id("table_id", self.table_id)?,
        })
    }
}

/// Open a session on a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenSession {
    table_id: i64,
}

impl OpenSession {
    pub fn table_id(&self) -> i64 {
        self.table_id
    }
}

/// Close a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseSession {
    session_id: i64,
}

impl CloseSession {
    pub fn new(session_id: i64) -> ValidationResult<Self> {
        Ok(Self {
            session_id: validate_id("id", session_id)?,
        })
    }

    pub fn session_id(&self) -> i64 {
        self.session_id
    }
}

// =============================================================================
// Order Commands
// =============================================================================

/// Body of `POST /orders`.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct PlaceOrderInput {
    pub table_session_id: i64,
    pub product_id: i64,
    pub quantity: i64,
}

impl PlaceOrderInput {
    pub fn validate(self) -> ValidationResult<PlaceOrder> {
        Ok(PlaceOrder {
            table_session_id: validate_id("table_session_id", self.table_session_id)?,
            product_id: validate_id("product_id", self.product_id)?,
            quantity: validate_quantity(self.quantity)?,
        })
    }
}

/// Attach an order line to an open session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceOrder {
    table_session_id: i64,
    product_id: i64,
    quantity: i64,
}

impl PlaceOrder {
    pub fn table_session_id(&self) -> i64 {
        self.table_session_id
    }

    pub fn product_id(&self) -> i64 {
        self.product_id
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }
}

// =============================================================================
// Product Commands
// =============================================================================

/// Body of `POST /products` and `PUT|PATCH /products/{id}`.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct ProductInput {
    pub name: String,
    #[ts(type = "number")]
    pub price: Money,
}

impl ProductInput {
    pub fn validate(self) -> ValidationResult<ProductDraft> {
        Ok(ProductDraft {
            name: validate_product_name(&self.name)?,
            price: validate_price(self.price)?,
        })
    }
}

/// A validated product name and price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    name: String,
    price: Money,
}

impl ProductDraft {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }
}

/// Query of `GET /products`.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
pub struct ProductFilterInput {
    pub name: Option<String>,
}

impl ProductFilterInput {
    pub fn validate(self) -> ValidationResult<ProductFilter> {
        Ok(ProductFilter {
            name: validate_search_query(self.name.as_deref())?,
        })
    }
}

/// Case-insensitive substring filter on product names.
///
/// Case folding covers ASCII letters only, the same as SQLite `LIKE`:
/// `"crêpe"` finds `"Crêpe Suzette"` but `"CRÊPE"` does not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    name: Option<String>,
}

impl ProductFilter {
    /// Matches every product.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// In-process equivalent of the storage filter.
    pub fn matches(&self, product_name: &str) -> bool {
        match &self.name {
            None => true,
            Some(needle) => product_name
                .to_ascii_lowercase()
                .contains(&needle.to_ascii_lowercase()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
