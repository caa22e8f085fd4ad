use std::time::Duration;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

const DB_PING_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub db: &'static str,
    pub uptime_secs: u64,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

async fn db_reachable(state: &AppState) -> bool {
    match tokio::time::timeout(DB_PING_TIMEOUT, sqlx::query("SELECT 1").execute(&state.db)).await {
        Ok(Ok(_)) => true,
        Ok(Err(e)) => {
            warn!(error = %e, "health db ping failed");
            false
        }
        Err(_) => {
            warn!("health db ping timed out");
            false
        }
    }
}

/// Always 200 while the process serves requests; `db` reports the pool.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db = if db_reachable(&state).await {
        "connected"
    } else {
        "disconnected"
    };
    Json(HealthResponse {
        status: "ok",
        db,
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}
