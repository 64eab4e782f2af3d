//! Table sessions: open, close and list.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use tableside_core::commands::{CloseSession, OpenSessionInput};
use tableside_core::validation::parse_id;
use tableside_core::{lifecycle, CoreError, TableSession};
use tracing::info;

use crate::error::ApiResult;
use crate::extract::{AppJson, AppPath};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tables-sessions", get(list).post(open))
        .route("/tables-sessions/{id}", patch(close))
}

/// GET /tables-sessions - open sessions first
async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<TableSession>>> {
    let sessions = lifecycle::list_sessions(&state.db.sessions()).await?;
    Ok(Json(sessions))
}

/// POST /tables-sessions - open a table
async fn open(
    State(state): State<AppState>,
    AppJson(input): AppJson<OpenSessionInput>,
) -> ApiResult<(StatusCode, Json<TableSession>)> {
    let cmd = input.validate().map_err(CoreError::from)?;
    let session = lifecycle::open_session(&state.db.tables(), &state.db.sessions(), cmd).await?;

    info!(session_id = session.id, table_id = session.table_id, "Table opened");
    Ok((StatusCode::CREATED, Json(session)))
}

/// PATCH /tables-sessions/{id} - close a table
async fn close(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> ApiResult<Json<TableSession>> {
    let cmd = parse_id("id", &id)
        .and_then(CloseSession::new)
        .map_err(CoreError::from)?;
    let session = lifecycle::close_session(&state.db.sessions(), cmd).await?;

    info!(session_id = session.id, table_id = session.table_id, "Table closed");
    Ok(Json(session))
}
