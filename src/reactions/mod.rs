//! Reaction labels recorded per (user, product) and per (user, ingredient).

pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;

use axum::Router;

use crate::state::AppState;

pub use repo_types::{Reaction, ReactionTarget};

pub fn router() -> Router<AppState> {
    handlers::reaction_routes()
}
