//! Personal info sub-document, derived profile completeness and the
//! trial-days counter.

pub mod dto;
pub mod handlers;
pub mod repo;
pub mod services;

use axum::Router;

use crate::state::AppState;

pub use dto::{PaymentKind, PaymentMethod, PersonalInfo};

pub fn router() -> Router<AppState> {
    handlers::profile_routes()
}
