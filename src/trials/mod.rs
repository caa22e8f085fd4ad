//! Fixed-duration sensitivity tests, one running test per (user, product).

pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod services;

use axum::Router;

use crate::state::AppState;

pub use repo_types::Test;

pub fn router() -> Router<AppState> {
    handlers::trial_routes()
}
