use anyhow::Context;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use super::dto::PersonalInfo;
use crate::auth::repo_types::{User, USER_COLUMNS};

/// Stores personal info together with its completeness in one statement.
/// `None` when the user does not exist.
pub async fn update_personal_info(
    db: &PgPool,
    user_id: Uuid,
    info: &PersonalInfo,
    completeness: i32,
) -> anyhow::Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
           SET personal_info = $2,
               profile_completeness = $3,
               last_updated = now()
         WHERE id = $1
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(Json(info))
    .bind(completeness)
    .fetch_optional(db)
    .await
    .context("update personal info")?;
    Ok(user)
}
