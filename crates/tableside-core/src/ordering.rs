//! # Order Attachment
//!
//! Attaches priced order lines to open table sessions and serves the
//! session read models.
//!
//! ## Snapshot Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  t0  Product "Pizza Margherita" price 25.50                             │
//! │  t1  place_order(session 1, pizza, qty 2)                               │
//! │        └── Order.price = 25.50   ← copied from product                  │
//! │  t2  Product price updated to 27.00                                     │
//! │  t3  Order.price is still 25.50; summary total still 51.00              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::commands::PlaceOrder;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::ports::{OrderStore, ProductStore, SessionStore};
use crate::types::{NewOrder, Order, OrderLine, Product, SessionSummary, TableSession};
use crate::validation::validate_id;

/// Prices an order line against the session and product it targets.
///
/// Pure: fails with `SessionClosed` if the session is closed, otherwise
/// freezes the product's current price into the new order. A line total
/// that would not fit in an `i64` of cents is rejected.
pub fn price_order(
    session: &TableSession,
    product: &Product,
    quantity: i64,
) -> CoreResult<NewOrder> {
    if !session.is_open() {
        return Err(CoreError::SessionClosed);
    }
    if product.price.multiply_quantity(quantity).is_none() {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: i64::MAX / product.price.cents(),
        }
        .into());
    }

    Ok(NewOrder {
        table_session_id: session.id,
        product_id: product.id,
        quantity,
        price: product.price,
    })
}

/// Places an order on an open session.
///
/// ## Flow
/// ```text
/// PlaceOrder { table_session_id, product_id, quantity }
///      │
///      ├── session missing?   → SessionNotFound          (404)
///      ├── session closed?    → SessionClosed            (409)
///      ├── product missing?   → OrderedProductNotFound   (404)
///      └── insert if session still open
///               └── closed meanwhile? → SessionClosed    (409)
/// ```
pub async fn place_order(
    sessions: &impl SessionStore,
    products: &impl ProductStore,
    orders: &impl OrderStore,
    cmd: PlaceOrder,
) -> CoreResult<Order> {
    let session = sessions
        .find_session(cmd.table_session_id())
        .await?
        .ok_or(CoreError::SessionNotFound)?;

    if !session.is_open() {
        return Err(CoreError::SessionClosed);
    }

    let product = products
        .find_product(cmd.product_id())
        .await?
        .ok_or(CoreError::OrderedProductNotFound)?;

    let new_order = price_order(&session, &product, cmd.quantity())?;

    orders
        .insert_order_if_session_open(&new_order)
        .await?
        .ok_or(CoreError::SessionClosed)
}

/// Orders of a session joined with product names, newest first.
///
/// An unknown session yields an empty list.
pub async fn list_orders(
    orders: &impl OrderStore,
    table_session_id: i64,
) -> CoreResult<Vec<OrderLine>> {
    let id = validate_id("table_session_id", table_session_id)?;
    orders.list_order_lines(id).await
}

/// Total amount and item count of a session.
pub async fn summarize(
    orders: &impl OrderStore,
    table_session_id: i64,
) -> CoreResult<SessionSummary> {
    let id = validate_id("table_session_id", table_session_id)?;
    orders.summarize_session(id).await
}

// =============================================================================
// Unit Tests
// =============================================================================
