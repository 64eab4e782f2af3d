//! In-memory implementation of the store ports, used by the unit tests of
//! lifecycle, ordering and catalog.
//!
//! Mirrors the SQLite semantics that matter to the operations: the one
//! open session per table constraint, conditional close and insert, and
//! the ordering of each list.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::commands::{ProductDraft, ProductFilter};
use crate::error::{CoreError, CoreResult};
use crate::ports::{OrderStore, ProductStore, SessionStore, TableStore};
use crate::types::{NewOrder, Order, OrderLine, Product, SessionSummary, Table, TableSession};

#[derive(Default)]
struct State {
    tick: i64,
    tables: Vec<Table>,
    sessions: Vec<TableSession>,
    products: Vec<Product>,
    orders: Vec<Order>,
}

impl State {
    /// Strictly increasing timestamps keep "most recent" unambiguous.
    fn now(&mut self) -> DateTime<Utc> {
        self.tick += 1;
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + Duration::milliseconds(self.tick)
    }

    fn next_id(len: usize) -> i64 {
        len as i64 + 1
    }
}

pub(crate) struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// A store with tables numbered `1..=table_count`.
    pub(crate) fn with_tables(table_count: i64) -> Self {
        let mut state = State::default();
        for n in 1..=table_count {
            let now = state.now();
            state.tables.push(Table {
                id: n,
                table_number: n,
                capacity: Some(4),
                created_at: now,
                updated_at: now,
            });
        }
        Self {
            state: Mutex::new(state),
        }
    }

    pub(crate) fn order_count(&self) -> usize {
        self.state.lock().unwrap().orders.len()
    }

    pub(crate) fn open_session_count(&self, table_id: i64) -> usize {
        self.state
            .lock()
            .unwrap()
            .sessions
            .iter()
            .filter(|s| s.table_id == table_id && s.is_open())
            .count()
    }
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn list_tables(&self) -> CoreResult<Vec<Table>> {
        let mut tables = self.state.lock().unwrap().tables.clone();
        tables.sort_by_key(|t| t.table_number);
        Ok(tables)
    }

    async fn find_table(&self, id: i64) -> CoreResult<Option<Table>> {
        let state = self.state.lock().unwrap();
        Ok(state.tables.iter().find(|t| t.id == id).cloned())
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn list_sessions(&self) -> CoreResult<Vec<TableSession>> {
        let mut sessions = self.state.lock().unwrap().sessions.clone();
        // None sorts before Some: open sessions first
        sessions.sort_by(|a, b| {
            a.closed_at
                .cmp(&b.closed_at)
                .then_with(|| b.opened_at.cmp(&a.opened_at))
        });
        Ok(sessions)
    }

    async fn find_session(&self, id: i64) -> CoreResult<Option<TableSession>> {
        let state = self.state.lock().unwrap();
        Ok(state.sessions.iter().find(|s| s.id == id).cloned())
    }

    async fn latest_session_for_table(&self, table_id: i64) -> CoreResult<Option<TableSession>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .sessions
            .iter()
            .filter(|s| s.table_id == table_id)
            .max_by_key(|s| (s.opened_at, s.id))
            .cloned())
    }

    async fn insert_open_session(&self, table_id: i64) -> CoreResult<TableSession> {
        let mut state = self.state.lock().unwrap();
        if state
            .sessions
            .iter()
            .any(|s| s.table_id == table_id && s.is_open())
        {
            return Err(CoreError::TableAlreadyOpen);
        }
        let session = TableSession {
            id: State::next_id(state.sessions.len()),
            table_id,
            opened_at: state.now(),
            closed_at: None,
        };
        state.sessions.push(session.clone());
        Ok(session)
    }

    async fn close_session(&self, id: i64) -> CoreResult<Option<TableSession>> {
        let mut state = self.state.lock().unwrap();
        let now = state.now();
        Ok(state
            .sessions
            .iter_mut()
            .find(|s| s.id == id && s.is_open())
            .map(|s| {
                s.closed_at = Some(now);
                s.clone()
            }))
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn list_products(&self, filter: &ProductFilter) -> CoreResult<Vec<Product>> {
        let state = self.state.lock().unwrap();
        let mut products: Vec<Product> = state
            .products
            .iter()
            .filter(|p| filter.matches(&p.name))
            .cloned()
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    async fn find_product(&self, id: i64) -> CoreResult<Option<Product>> {
        let state = self.state.lock().unwrap();
        Ok(state.products.iter().find(|p| p.id == id).cloned())
    }

    async fn insert_product(&self, draft: &ProductDraft) -> CoreResult<Product> {
        let mut state = self.state.lock().unwrap();
        let now = state.now();
        let id = state.products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let product = Product {
            id,
            name: draft.name().to_string(),
            price: draft.price(),
            created_at: now,
            updated_at: now,
        };
        state.products.push(product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: i64, draft: &ProductDraft) -> CoreResult<Option<Product>> {
        let mut state = self.state.lock().unwrap();
        let now = state.now();
        Ok(state.products.iter_mut().find(|p| p.id == id).map(|p| {
            p.name = draft.name().to_string();
            p.price = draft.price();
            p.updated_at = now;
            p.clone()
        }))
    }

    async fn delete_product(&self, id: i64) -> CoreResult<bool> {
        let mut state = self.state.lock().unwrap();
        if state.orders.iter().any(|o| o.product_id == id) {
            return Err(CoreError::ProductInUse);
        }
        let before = state.products.len();
        state.products.retain(|p| p.id != id);
        Ok(state.products.len() < before)
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn insert_order_if_session_open(&self, order: &NewOrder) -> CoreResult<Option<Order>> {
        let mut state = self.state.lock().unwrap();
        let open = state
            .sessions
            .iter()
            .any(|s| s.id == order.table_session_id && s.is_open());
        if !open {
            return Ok(None);
        }
        let now = state.now();
        let stored = Order {
            id: State::next_id(state.orders.len()),
            table_session_id: order.table_session_id,
            product_id: order.product_id,
            quantity: order.quantity,
            price: order.price,
            created_at: now,
            updated_at: now,
        };
        state.orders.push(stored.clone());
        Ok(Some(stored))
    }

    async fn list_order_lines(&self, table_session_id: i64) -> CoreResult<Vec<OrderLine>> {
        let state = self.state.lock().unwrap();
        let mut lines: Vec<OrderLine> = state
            .orders
            .iter()
            .filter(|o| o.table_session_id == table_session_id)
            .filter_map(|o| {
                let product = state.products.iter().find(|p| p.id == o.product_id)?;
                let total = match o.total() {
                    Some(total) => total,
                    None => return Some(Err(CoreError::storage("order total overflow"))),
                };
                Some(Ok(OrderLine {
                    id: o.id,
                    table_session_id: o.table_session_id,
                    product_id: o.product_id,
                    product_name: product.name.clone(),
                    price: o.price,
                    quantity: o.quantity,
                    total,
                    created_at: o.created_at,
                    updated_at: o.updated_at,
                }))
            })
            .collect::<CoreResult<_>>()?;
        lines.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(lines)
    }

    async fn summarize_session(&self, table_session_id: i64) -> CoreResult<SessionSummary> {
        let state = self.state.lock().unwrap();
        SessionSummary::from_orders(
            state
                .orders
                .iter()
                .filter(|o| o.table_session_id == table_session_id),
        )
        .ok_or_else(|| CoreError::storage("session total overflow"))
    }
}
