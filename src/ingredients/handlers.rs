use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};

use super::repo::{self, Ingredient, NewIngredient};
use crate::{
    auth::AuthUser,
    error::ApiError,
    extract::{required, ApiJson},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CreateIngredientRequest {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub properties: Option<Value>,
    pub safety_level: Option<String>,
}

pub fn ingredient_routes() -> Router<AppState> {
    Router::new().route(
        "/productingredients",
        get(list_ingredients).post(create_ingredient),
    )
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[instrument(skip(state))]
pub async fn list_ingredients(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
) -> Result<Json<Vec<Ingredient>>, ApiError> {
    Ok(Json(repo::list_all(&state.db).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_ingredient(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(payload): ApiJson<CreateIngredientRequest>,
) -> Result<(StatusCode, Json<Ingredient>), ApiError> {
    let name = required(&payload.name, "name")?;
    let ingredient = repo::insert(
        &state.db,
        NewIngredient {
            name,
            description: non_blank(&payload.description),
            category: non_blank(&payload.category),
            properties: payload.properties.clone(),
            safety_level: non_blank(&payload.safety_level),
        },
    )
    .await?;
    info!(%user_id, ingredient_id = %ingredient.id, name, "ingredient created");
    Ok((StatusCode::CREATED, Json(ingredient)))
}
