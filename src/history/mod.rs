//! Products the user has looked at, newest first.

pub mod handlers;
pub mod repo;

use axum::Router;

use crate::state::AppState;

pub use repo::HistoryEntry;

pub fn router() -> Router<AppState> {
    handlers::history_routes()
}
