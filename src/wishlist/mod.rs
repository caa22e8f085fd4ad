//! Per-user list of products saved for later.

pub mod handlers;
pub mod repo;

use axum::Router;

use crate::state::AppState;

pub use repo::WishlistEntry;

pub fn router() -> Router<AppState> {
    handlers::wishlist_routes()
}
