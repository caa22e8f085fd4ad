use anyhow::Context;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

const NOTE_COLUMNS: &str = "id, user_id, product_id, note, rating, created_at, updated_at";

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProductNote {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: String,
    pub note: String,
    pub rating: Option<i16>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<ProductNote>> {
    sqlx::query_as::<_, ProductNote>(&format!(
        "SELECT {NOTE_COLUMNS} FROM product_notes WHERE user_id = $1 ORDER BY updated_at DESC"
    ))
    .bind(user_id)
    .fetch_all(db)
    .await
    .context("list product notes")
}

pub async fn insert(
    db: &PgPool,
    user_id: Uuid,
    product_id: &str,
    note: &str,
    rating: Option<i16>,
) -> anyhow::Result<ProductNote> {
    sqlx::query_as::<_, ProductNote>(&format!(
        r#"
        INSERT INTO product_notes (user_id, product_id, note, rating)
        VALUES ($1, $2, $3, $4)
        RETURNING {NOTE_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(product_id)
    .bind(note)
    .bind(rating)
    .fetch_one(db)
    .await
    .context("insert product note")
}

/// Rewrites the text of one of the caller's notes; the rating changes only
/// when `rating` is given. `None` when the note does not exist or belongs to
/// another user.
pub async fn update(
    db: &PgPool,
    user_id: Uuid,
    note_id: Uuid,
    note: &str,
    rating: Option<i16>,
) -> anyhow::Result<Option<ProductNote>> {
    sqlx::query_as::<_, ProductNote>(&format!(
        r#"
        UPDATE product_notes
           SET note = $3, rating = COALESCE($4, rating), updated_at = now()
         WHERE id = $1 AND user_id = $2
        RETURNING {NOTE_COLUMNS}
        "#
    ))
    .bind(note_id)
    .bind(user_id)
    .bind(note)
    .bind(rating)
    .fetch_optional(db)
    .await
    .context("update product note")
}
