//! Menu maintenance.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tableside_core::commands::{ProductFilterInput, ProductInput};
use tableside_core::validation::parse_id;
use tableside_core::{catalog, CoreError, Product};

use crate::error::ApiResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list).post(create))
        .route(
            "/products/{id}",
            axum::routing::put(update).patch(update).delete(delete),
        )
}

/// GET /products?name= - optionally filtered by name
async fn list(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ProductFilterInput>,
) -> ApiResult<Json<Vec<Product>>> {
    let filter = query.validate().map_err(CoreError::from)?;
    let products = catalog::list_products(&state.db.products(), &filter).await?;
    Ok(Json(products))
}

/// POST /products
async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<ProductInput>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let draft = input.validate().map_err(CoreError::from)?;
    let product = catalog::create_product(&state.db.products(), draft).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT|PATCH /products/{id} - replace name and price
async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
    AppJson(input): AppJson<ProductInput>,
) -> ApiResult<Json<Product>> {
    let id = parse_id("id", &id).map_err(CoreError::from)?;
    let draft = input.validate().map_err(CoreError::from)?;
    let product = catalog::update_product(&state.db.products(), id, draft).await?;
    Ok(Json(product))
}

/// DELETE /products/{id}
async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id("id", &id).map_err(CoreError::from)?;
    catalog::delete_product(&state.db.products(), id).await?;
    Ok(StatusCode::OK)
}
