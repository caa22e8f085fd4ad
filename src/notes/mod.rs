//! Free-text product notes with an optional 1..=5 rating.

pub mod dto;
pub mod handlers;
pub mod repo;

use axum::Router;

use crate::state::AppState;

pub use repo::ProductNote;

pub fn router() -> Router<AppState> {
    handlers::note_routes()
}
