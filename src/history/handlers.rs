use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Deserialize;
use tracing::{debug, instrument};

use super::repo::{self, HistoryEntry};
use crate::{
    auth::AuthUser,
    error::ApiError,
    extract::{required, ApiJson},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RecordViewRequest {
    pub item_id: String,
}

pub fn history_routes() -> Router<AppState> {
    Router::new().route("/history", get(list_history).post(record_view))
}

#[instrument(skip(state))]
pub async fn list_history(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    Ok(Json(repo::list_by_user(&state.db, user_id).await?))
}

#[instrument(skip(state, payload))]
pub async fn record_view(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(payload): ApiJson<RecordViewRequest>,
) -> Result<(StatusCode, Json<HistoryEntry>), ApiError> {
    let item_id = required(&payload.item_id, "item_id")?;
    let entry = repo::record(&state.db, user_id, item_id).await?;
    debug!(%user_id, item_id, "view recorded");
    Ok((StatusCode::CREATED, Json(entry)))
}
