use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument};

use super::{
    dto::{validate_rating, CreateNoteRequest, UpdateNoteRequest},
    repo::{self, ProductNote},
};
use crate::{
    auth::AuthUser,
    error::ApiError,
    extract::{parse_id, required, ApiJson},
    state::AppState,
};

pub fn note_routes() -> Router<AppState> {
    Router::new()
        .route("/productnotes", get(list_notes).post(create_note))
        .route("/productnotes/:id", put(update_note))
}

#[instrument(skip(state))]
pub async fn list_notes(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<ProductNote>>, ApiError> {
    Ok(Json(repo::list_by_user(&state.db, user_id).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_note(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(payload): ApiJson<CreateNoteRequest>,
) -> Result<(StatusCode, Json<ProductNote>), ApiError> {
    let product_id = required(&payload.product_id, "product_id")?;
    let note = required(&payload.note, "note")?;
    let rating = validate_rating(payload.rating)?;

    let saved = repo::insert(&state.db, user_id, product_id, note, rating).await?;
    info!(%user_id, product_id, note_id = %saved.id, "note created");
    Ok((StatusCode::CREATED, Json(saved)))
}

#[instrument(skip(state, payload))]
pub async fn update_note(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateNoteRequest>,
) -> Result<Json<ProductNote>, ApiError> {
    let note_id = parse_id(&id, "note")?;
    let note = required(&payload.note, "note")?;
    let rating = validate_rating(payload.rating)?;

    let saved = repo::update(&state.db, user_id, note_id, note, rating)
        .await?
        .ok_or_else(|| ApiError::not_found("Note not found"))?;
    info!(%user_id, %note_id, "note updated");
    Ok(Json(saved))
}
