use serde::Serialize;
use sqlx::{types::Json, FromRow};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::profile::PersonalInfo;

/// Columns selected for every `User` query.
pub(crate) const USER_COLUMNS: &str = "id, name, email, password_hash, language, trial_period_days, \
     personal_info, profile_completeness, last_updated, created_at";

/// User record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, not exposed in JSON
    pub language: String,
    pub trial_period_days: i32,
    pub personal_info: Option<Json<PersonalInfo>>,
    pub profile_completeness: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub last_updated: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
