//! Dining room tables.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tableside_core::{lifecycle, Table};

use crate::error::ApiResult;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/tables", get(list))
}

/// GET /tables - all tables ordered by number
async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Table>>> {
    let tables = lifecycle::list_tables(&state.db.tables()).await?;
    Ok(Json(tables))
}
