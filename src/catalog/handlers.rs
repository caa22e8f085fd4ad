use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::dto::{LookupQuery, Product, SearchQuery, SearchResponse};
use super::services::{normalize_paging, search_products};
use crate::{error::ApiError, state::AppState};

pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/products/search", get(search))
        .route("/products/:code", get(get_product))
}

#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(q): Query<SearchQuery>,
) -> Json<SearchResponse> {
    let (page, page_size) = normalize_paging(q.page, q.page_size, &state.config.catalog);
    let catalog = state.catalogs.pick(q.source);
    Json(search_products(catalog.as_ref(), &q.q, page, page_size).await)
}

#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(q): Query<LookupQuery>,
) -> Result<Json<Product>, ApiError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(ApiError::bad_request("Product code is required"));
    }
    state
        .catalogs
        .pick(q.source)
        .get_by_code(code)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Product not found"))
}
