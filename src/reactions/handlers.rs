use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tracing::{info, instrument};

use super::{
    dto::{
        DeletedResponse, IngredientReaction, IngredientReactionRequest, ProductReaction,
        ProductReactionRequest,
    },
    repo,
    repo_types::ReactionTarget,
};
use crate::{
    auth::AuthUser,
    error::ApiError,
    extract::{required, ApiJson},
    state::AppState,
};

pub fn reaction_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/product-reactions",
            get(list_product_reactions).post(save_product_reaction),
        )
        .route("/product-reactions/:product_id", delete(delete_product_reaction))
        .route(
            "/ingredient-reactions",
            get(list_ingredient_reactions).post(save_ingredient_reaction),
        )
        .route(
            "/ingredient-reactions/:ingredient_name",
            delete(delete_ingredient_reaction),
        )
}

fn created_or_updated(inserted: bool) -> StatusCode {
    if inserted {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    }
}

#[instrument(skip(state))]
pub async fn list_product_reactions(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<ProductReaction>>, ApiError> {
    let rows = repo::list_by_user(&state.db, ReactionTarget::Product, user_id).await?;
    Ok(Json(rows.into_iter().map(ProductReaction::from).collect()))
}

#[instrument(skip(state, payload))]
pub async fn save_product_reaction(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(payload): ApiJson<ProductReactionRequest>,
) -> Result<(StatusCode, Json<ProductReaction>), ApiError> {
    let product_id = required(&payload.product_id, "product_id")?;
    let (record, inserted) = repo::upsert(
        &state.db,
        ReactionTarget::Product,
        user_id,
        product_id,
        payload.reaction,
    )
    .await?;
    info!(%user_id, product_id, reaction = %record.reaction, inserted, "product reaction saved");
    Ok((created_or_updated(inserted), Json(record.into())))
}

#[instrument(skip(state))]
pub async fn delete_product_reaction(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(product_id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let product_id = required(&product_id, "product_id")?;
    let deleted = repo::delete(&state.db, ReactionTarget::Product, user_id, product_id).await?;
    Ok(Json(DeletedResponse {
        message: "Reaction deleted successfully".into(),
        deleted,
    }))
}

#[instrument(skip(state))]
pub async fn list_ingredient_reactions(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<IngredientReaction>>, ApiError> {
    let rows = repo::list_by_user(&state.db, ReactionTarget::Ingredient, user_id).await?;
    Ok(Json(rows.into_iter().map(IngredientReaction::from).collect()))
}

#[instrument(skip(state, payload))]
pub async fn save_ingredient_reaction(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(payload): ApiJson<IngredientReactionRequest>,
) -> Result<(StatusCode, Json<IngredientReaction>), ApiError> {
    let name = required(&payload.ingredient_name, "ingredient_name")?;
    let (record, inserted) = repo::upsert(
        &state.db,
        ReactionTarget::Ingredient,
        user_id,
        name,
        payload.reaction,
    )
    .await?;
    info!(%user_id, ingredient = name, reaction = %record.reaction, inserted, "ingredient reaction saved");
    Ok((created_or_updated(inserted), Json(record.into())))
}

#[instrument(skip(state))]
pub async fn delete_ingredient_reaction(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(ingredient_name): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let name = required(&ingredient_name, "ingredient_name")?;
    let deleted = repo::delete(&state.db, ReactionTarget::Ingredient, user_id, name).await?;
    Ok(Json(DeletedResponse {
        message: "Ingredient reaction deleted successfully".into(),
        deleted,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_status() {
        assert_eq!(created_or_updated(true), StatusCode::CREATED);
        assert_eq!(created_or_updated(false), StatusCode::OK);
    }
}
