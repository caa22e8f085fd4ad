use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::repo::{self, WishlistEntry};
use crate::{
    auth::AuthUser,
    error::ApiError,
    extract::{parse_id, required, ApiJson},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct AddToWishlistRequest {
    pub product_id: String,
}

#[derive(Debug, Serialize)]
pub struct RemovedResponse {
    pub message: String,
    pub id: Uuid,
}

pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/wishlist", get(list_wishlist).post(add_to_wishlist))
        .route("/wishlist/:id", delete(remove_from_wishlist))
}

#[instrument(skip(state))]
pub async fn list_wishlist(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<WishlistEntry>>, ApiError> {
    Ok(Json(repo::list_by_user(&state.db, user_id).await?))
}

#[instrument(skip(state, payload))]
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(payload): ApiJson<AddToWishlistRequest>,
) -> Result<(StatusCode, Json<WishlistEntry>), ApiError> {
    let product_id = required(&payload.product_id, "product_id")?;
    let entry = repo::insert(&state.db, user_id, product_id).await?;
    info!(%user_id, product_id, entry_id = %entry.id, "added to wishlist");
    Ok((StatusCode::CREATED, Json(entry)))
}

#[instrument(skip(state))]
pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<RemovedResponse>, ApiError> {
    let entry_id = parse_id(&id, "wishlist")?;
    if !repo::delete(&state.db, user_id, entry_id).await? {
        warn!(%user_id, %entry_id, "wishlist entry not found");
        return Err(ApiError::not_found("Wishlist item not found"));
    }
    info!(%user_id, %entry_id, "removed from wishlist");
    Ok(Json(RemovedResponse {
        message: "Item removed from wishlist".into(),
        id: entry_id,
    }))
}
