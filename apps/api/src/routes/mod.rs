//! HTTP routes.

mod health;
mod orders;
mod products;
mod sessions;
mod tables;

use axum::extract::Request;
use axum::{middleware, Router};
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::info_span;

use crate::error::ApiError;
use crate::metrics::track_metrics;
use crate::AppState;

/// Assembles every route under the shared middleware.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .merge(tables::router())
        .merge(sessions::router())
        .merge(products::router())
        .merge(orders::router())
        .merge(health::router())
        .fallback(route_not_found)
        .layer(middleware::from_fn(track_metrics))
        .with_state(state);

    api.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http().make_span_with(|req: &Request| {
                let request_id = req
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                info_span!(
                    "request",
                    method = %req.method(),
                    uri = %req.uri(),
                    request_id = %request_id,
                )
            }))
            .layer(PropagateRequestIdLayer::x_request_id()),
    )
}

async fn route_not_found() -> ApiError {
    ApiError::not_found("route not found")
}
