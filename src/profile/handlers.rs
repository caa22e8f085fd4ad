use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    dto::{
        PersonalInfoResponse, TrialPeriodRequest, TrialPeriodResponse, UpdatePersonalInfoRequest,
        UpdatePersonalInfoResponse,
    },
    repo,
    services::{profile_completeness, validate_rut},
};
use crate::{
    auth::{dto::PublicUser, AuthUser, User},
    error::ApiError,
    extract::{parse_id, ApiJson},
    state::AppState,
};

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/users/:user_id/personal-info",
            get(get_personal_info).put(update_personal_info),
        )
        .route("/update-trial-period", post(update_trial_period))
}

/// Only the owner may read or write their personal info.
fn ensure_owner(caller: Uuid, raw_target: &str) -> Result<Uuid, ApiError> {
    let target = parse_id(raw_target, "user")?;
    if target != caller {
        warn!(%caller, %target, "personal info access denied");
        return Err(ApiError::forbidden("Not authorized to access this user's data"));
    }
    Ok(target)
}

#[instrument(skip(state))]
pub async fn get_personal_info(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(user_id): Path<String>,
) -> Result<Json<PersonalInfoResponse>, ApiError> {
    let user_id = ensure_owner(caller, &user_id)?;
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(Json(PersonalInfoResponse {
        personal_info: user.personal_info.map(|j| j.0).unwrap_or_default(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_personal_info(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(user_id): Path<String>,
    ApiJson(payload): ApiJson<UpdatePersonalInfoRequest>,
) -> Result<Json<UpdatePersonalInfoResponse>, ApiError> {
    let user_id = ensure_owner(caller, &user_id)?;
    let info = payload.personal_info;

    if let Some(rut) = info.rut.as_deref().filter(|r| !r.trim().is_empty()) {
        if !validate_rut(rut) {
            return Err(ApiError::bad_request("Invalid RUT"));
        }
    }

    let completeness = profile_completeness(Some(&info));
    let user = repo::update_personal_info(&state.db, user_id, &info, completeness)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    info!(%user_id, completeness, "personal info updated");
    Ok(Json(UpdatePersonalInfoResponse {
        message: "Personal info updated".into(),
        user: PublicUser::from(user),
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_trial_period(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(payload): ApiJson<TrialPeriodRequest>,
) -> Result<Json<TrialPeriodResponse>, ApiError> {
    let days = i32::try_from(payload.trial_days)
        .ok()
        .filter(|d| *d >= 0)
        .ok_or_else(|| ApiError::bad_request("Invalid trial days value"))?;

    let user = User::update_trial_period(&state.db, user_id, days)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    info!(%user_id, days, "trial period updated");
    Ok(Json(TrialPeriodResponse {
        message: "Trial period updated successfully".into(),
        trial_period_days: user.trial_period_days,
    }))
}
