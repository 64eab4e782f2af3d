//! Liveness, readiness, metrics and the presentation banner.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::warn;

use crate::AppState;

/// Greeting served on `/presentation`.
pub const PRESENTATION_MESSAGE: &str = "Welcome to the Tableside API";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/db", get(health_db))
        .route("/metrics", get(metrics))
        .route("/presentation", get(presentation))
}

/// ISO-8601 UTC with milliseconds, e.g. `2023-10-15T10:30:00.000Z`.
fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
    #[serde(rename = "timeStamp")]
    time_stamp: String,
}

#[derive(Serialize)]
struct DatabaseHealthBody {
    status: &'static str,
    database: &'static str,
}

#[derive(Serialize)]
struct PresentationBody {
    message: &'static str,
    #[serde(rename = "timeStamp")]
    time_stamp: String,
}

/// GET /health
async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "OK",
        time_stamp: timestamp(),
    })
}

/// GET /health/db - 503 when the pool cannot run a query
async fn health_db(State(state): State<AppState>) -> (StatusCode, Json<DatabaseHealthBody>) {
    if state.db.health_check().await {
        (
            StatusCode::OK,
            Json(DatabaseHealthBody {
                status: "OK",
                database: "up",
            }),
        )
    } else {
        warn!("Database health check failed");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(DatabaseHealthBody {
                status: "ERROR",
                database: "down",
            }),
        )
    }
}

/// GET /metrics - Prometheus text exposition
async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    state.process.refresh();
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// GET /presentation
async fn presentation() -> Json<PresentationBody> {
    Json(PresentationBody {
        message: PRESENTATION_MESSAGE,
        time_stamp: timestamp(),
    })
}
