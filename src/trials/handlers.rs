use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use super::{
    dto::{CompleteTestRequest, StartTestRequest, TestResponse},
    repo,
    services::finish_date,
};
use crate::{
    auth::AuthUser,
    error::{is_unique_violation, ApiError},
    extract::{json_or_default, parse_id, required, ApiJson},
    state::AppState,
};

const ALREADY_RUNNING: &str = "Test already in progress for this product";

pub fn trial_routes() -> Router<AppState> {
    Router::new()
        .route("/tests", get(list_tests).post(start_test))
        .route("/tests/:id", put(complete_test))
}

#[instrument(skip(state))]
pub async fn list_tests(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<TestResponse>>, ApiError> {
    let now = OffsetDateTime::now_utc();
    let tests = repo::list_by_user(&state.db, user_id).await?;
    Ok(Json(
        tests
            .into_iter()
            .map(|t| TestResponse::from_test(t, now))
            .collect(),
    ))
}

#[instrument(skip(state, payload))]
pub async fn start_test(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(payload): ApiJson<StartTestRequest>,
) -> Result<(StatusCode, Json<TestResponse>), ApiError> {
    let item_id = required(&payload.item_id, "item_id")?;

    if repo::find_active(&state.db, user_id, item_id).await?.is_some() {
        warn!(%user_id, item_id, "test already running");
        return Err(ApiError::conflict(ALREADY_RUNNING));
    }

    let start = OffsetDateTime::now_utc();
    let test = match repo::insert(&state.db, user_id, item_id, start, finish_date(start)).await {
        Ok(t) => t,
        // lost a race against a concurrent start; the partial unique index caught it
        Err(e) if is_unique_violation(&e) => return Err(ApiError::conflict(ALREADY_RUNNING)),
        Err(e) => return Err(e.into()),
    };

    info!(%user_id, item_id, test_id = %test.id, "test started");
    Ok((StatusCode::CREATED, Json(TestResponse::from_test(test, start))))
}

#[instrument(skip(state, body))]
pub async fn complete_test(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<TestResponse>, ApiError> {
    let test_id = parse_id(&id, "test")?;
    let payload: CompleteTestRequest = json_or_default(&body)?;
    let test = repo::complete(&state.db, user_id, test_id, payload.result)
        .await?
        .ok_or_else(|| ApiError::not_found("Test not found"))?;

    info!(%user_id, %test_id, result = ?test.result, "test completed");
    Ok(Json(TestResponse::from_test(test, OffsetDateTime::now_utc())))
}
