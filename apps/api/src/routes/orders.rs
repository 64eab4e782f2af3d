//! Orders and the per-session read models.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use tableside_core::commands::PlaceOrderInput;
use tableside_core::validation::parse_id;
use tableside_core::{ordering, CoreError, Order, OrderLine, SessionSummary};

use crate::error::ApiResult;
use crate::extract::{AppJson, AppPath};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", post(create))
        .route("/orders/{table_session_id}", get(list))
        .route("/orders/{table_session_id}/summary", get(summary))
}

/// POST /orders - attach an order to an open session
async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<PlaceOrderInput>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    let cmd = input.validate().map_err(CoreError::from)?;
    let db = &state.db;
    let order = ordering::place_order(&db.sessions(), &db.products(), &db.orders(), cmd).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /orders/{table_session_id} - order lines, newest first
async fn list(
    State(state): State<AppState>,
    AppPath(table_session_id): AppPath<String>,
) -> ApiResult<Json<Vec<OrderLine>>> {
    let id = parse_id("table_session_id", &table_session_id).map_err(CoreError::from)?;
    let lines = ordering::list_orders(&state.db.orders(), id).await?;
    Ok(Json(lines))
}

/// GET /orders/{table_session_id}/summary - `{total, quantity}`
async fn summary(
    State(state): State<AppState>,
    AppPath(table_session_id): AppPath<String>,
) -> ApiResult<Json<SessionSummary>> {
    let id = parse_id("table_session_id", &table_session_id).map_err(CoreError::from)?;
    let summary = ordering::summarize(&state.db.orders(), id).await?;
    Ok(Json(summary))
}
