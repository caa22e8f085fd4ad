//! Shared reference descriptions of food ingredients.

pub mod handlers;
pub mod repo;

use axum::Router;

use crate::state::AppState;

pub use repo::Ingredient;

pub fn router() -> Router<AppState> {
    handlers::ingredient_routes()
}
