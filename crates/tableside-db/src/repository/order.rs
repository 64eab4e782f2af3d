//! # Order Repository
//!
//! Database operations for orders and the per-session read models.
//!
//! ## Conditional Insert
//! ```text
//! INSERT INTO orders (...)
//! SELECT ...
//! WHERE EXISTS (open session ?1)      ← checked in the same statement
//!      │
//!      ├── 1 row  → order stored
//!      └── 0 rows → session closed meanwhile → None
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use tableside_core::ports::OrderStore;
use tableside_core::{CoreResult, NewOrder, Order, OrderLine, SessionSummary};

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts an order if its session is still open.
    ///
    /// ## Returns
    /// * `Ok(Some(Order))` - Order stored
    /// * `Ok(None)` - Session missing or closed at insert time
    pub async fn insert_if_session_open(&self, order: &NewOrder) -> DbResult<Option<Order>> {
        debug!(
            table_session_id = order.table_session_id,
            product_id = order.product_id,
            quantity = order.quantity,
            price = %order.price,
            "Inserting order"
        );

        let now = Utc::now();

        let stored = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (
                table_session_id, product_id, quantity, price_cents, created_at, updated_at
            )
            SELECT ?1, ?2, ?3, ?4, ?5, ?5
            WHERE EXISTS (
                SELECT 1 FROM tables_sessions
                WHERE id = ?1 AND closed_at IS NULL
            )
            RETURNING id, table_session_id, product_id, quantity, price_cents AS price,
                      created_at, updated_at
            "#,
        )
        .bind(order.table_session_id)
        .bind(order.product_id)
        .bind(order.quantity)
        .bind(order.price)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        if stored.is_none() {
            debug!(
                table_session_id = order.table_session_id,
                "Order not inserted, session is not open"
            );
        }

        Ok(stored)
    }

    /// Orders of a session joined with their product, newest first.
    pub async fn list_for_session(&self, table_session_id: i64) -> DbResult<Vec<OrderLine>> {
        let lines = sqlx::query_as::<_, OrderLine>(
            r#"
            SELECT
                o.id,
                o.table_session_id,
                o.product_id,
                p.name AS product_name,
                o.price_cents AS price,
                o.quantity,
                o.price_cents * o.quantity AS total,
                o.created_at,
                o.updated_at
            FROM orders o
            INNER JOIN products p ON p.id = o.product_id
            WHERE o.table_session_id = ?1
            ORDER BY o.created_at DESC, o.id DESC
            "#,
        )
        .bind(table_session_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(table_session_id, count = lines.len(), "Listed session orders");
        Ok(lines)
    }

    /// Total amount and quantity of a session; zero when it has no orders.
    pub async fn summary_for_session(&self, table_session_id: i64) -> DbResult<SessionSummary> {
        let summary = sqlx::query_as::<_, SessionSummary>(
            r#"
            SELECT
                COALESCE(SUM(price_cents * quantity), 0) AS total,
                COALESCE(SUM(quantity), 0) AS quantity
            FROM orders
            WHERE table_session_id = ?1
            "#,
        )
        .bind(table_session_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }
}

#[async_trait]
impl OrderStore for OrderRepository {
    async fn insert_order_if_session_open(&self, order: &NewOrder) -> CoreResult<Option<Order>> {
        Ok(self.insert_if_session_open(order).await?)
    }

    async fn list_order_lines(&self, table_session_id: i64) -> CoreResult<Vec<OrderLine>> {
        Ok(self.list_for_session(table_session_id).await?)
    }

    async fn summarize_session(&self, table_session_id: i64) -> CoreResult<SessionSummary> {
        Ok(self.summary_for_session(table_session_id).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::db_with_tables;
    use crate::Database;
    use tableside_core::commands::{OpenSessionInput, PlaceOrderInput};
    use tableside_core::{lifecycle, ordering, CoreError, Money, Product, TableSession};

    async fn setup() -> (Database, TableSession, Product) {
        let db = db_with_tables(1).await;
        let session = db.sessions().insert_open(1).await.unwrap();
        let pizza = db
            .products()
            .insert("Pizza Margherita", Money::from_cents(2550))
            .await
            .unwrap();
        (db, session, pizza)
    }

    fn new_order(session: &TableSession, product: &Product, quantity: i64) -> NewOrder {
        NewOrder {
            table_session_id: session.id,
            product_id: product.id,
            quantity,
            price: product.price,
        }
    }

    #[tokio::test]
    async fn test_insert_into_open_session() {
        let (db, session, pizza) = setup().await;

        let order = db
            .orders()
            .insert_if_session_open(&new_order(&session, &pizza, 2))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(order.table_session_id, session.id);
        assert_eq!(order.price.cents(), 2550);
        assert_eq!(order.quantity, 2);
    }

    #[tokio::test]
    async fn test_insert_into_closed_session_stores_nothing() {
        let (db, session, pizza) = setup().await;
        db.sessions().close(session.id).await.unwrap();

        let stored = db
            .orders()
            .insert_if_session_open(&new_order(&session, &pizza, 1))
            .await
            .unwrap();
        assert!(stored.is_none());
        assert!(db.orders().list_for_session(session.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_price_snapshot_survives_product_update() {
        let (db, session, pizza) = setup().await;
        db.orders()
            .insert_if_session_open(&new_order(&session, &pizza, 2))
            .await
            .unwrap();

        db.products()
            .update(pizza.id, "Pizza Margherita", Money::from_cents(2700))
            .await
            .unwrap();

        let lines = db.orders().list_for_session(session.id).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].price.cents(), 2550);
        assert_eq!(lines[0].total.cents(), 5100);
        assert_eq!(lines[0].product_name, "Pizza Margherita");
    }

    #[tokio::test]
    async fn test_summary() {
        let (db, session, pizza) = setup().await;
        let empty = db.orders().summary_for_session(session.id).await.unwrap();
        assert_eq!(empty, SessionSummary::default());

        let wine = db
            .products()
            .insert("House Red Wine", Money::from_cents(900))
            .await
            .unwrap();
        let orders = db.orders();
        orders
            .insert_if_session_open(&new_order(&session, &pizza, 2))
            .await
            .unwrap();
        orders
            .insert_if_session_open(&new_order(&session, &wine, 1))
            .await
            .unwrap();

        let summary = orders.summary_for_session(session.id).await.unwrap();
        assert_eq!(summary.total.cents(), 6000);
        assert_eq!(summary.quantity, 3);
    }

    #[tokio::test]
    async fn test_referenced_product_cannot_be_deleted() {
        let (db, session, pizza) = setup().await;
        db.orders()
            .insert_if_session_open(&new_order(&session, &pizza, 1))
            .await
            .unwrap();

        let err = tableside_core::ports::ProductStore::delete_product(&db.products(), pizza.id)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ProductInUse));
        assert!(db.products().get_by_id(pizza.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_order_flow_through_core() {
        let db = db_with_tables(1).await;
        let pizza = db
            .products()
            .insert("Pizza Margherita", Money::from_cents(2550))
            .await
            .unwrap();

        let session = lifecycle::open_session(
            &db.tables(),
            &db.sessions(),
            OpenSessionInput { table_id: 1 }.validate().unwrap(),
        )
        .await
        .unwrap();

        let cmd = PlaceOrderInput {
            table_session_id: session.id,
            product_id: pizza.id,
            quantity: 2,
        }
        .validate()
        .unwrap();
        let order = ordering::place_order(&db.sessions(), &db.products(), &db.orders(), cmd)
            .await
            .unwrap();
        assert_eq!(order.total().unwrap().cents(), 5100);

        let summary = ordering::summarize(&db.orders(), session.id).await.unwrap();
        assert_eq!(summary.total.cents(), 5100);
        assert_eq!(summary.quantity, 2);
    }
}
