use anyhow::Context;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct WishlistEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub added_at: OffsetDateTime,
}

pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<WishlistEntry>> {
    sqlx::query_as::<_, WishlistEntry>(
        "SELECT id, user_id, product_id, added_at FROM wishlist WHERE user_id = $1 ORDER BY added_at DESC",
    )
    .bind(user_id)
    .fetch_all(db)
    .await
    .context("list wishlist")
}

pub async fn insert(db: &PgPool, user_id: Uuid, product_id: &str) -> anyhow::Result<WishlistEntry> {
    sqlx::query_as::<_, WishlistEntry>(
        r#"
        INSERT INTO wishlist (user_id, product_id)
        VALUES ($1, $2)
        RETURNING id, user_id, product_id, added_at
        "#,
    )
    .bind(user_id)
    .bind(product_id)
    .fetch_one(db)
    .await
    .context("insert wishlist entry")
}

/// Whether a row owned by `user_id` was removed.
pub async fn delete(db: &PgPool, user_id: Uuid, entry_id: Uuid) -> anyhow::Result<bool> {
    let res = sqlx::query("DELETE FROM wishlist WHERE id = $1 AND user_id = $2")
        .bind(entry_id)
        .bind(user_id)
        .execute(db)
        .await
        .context("delete wishlist entry")?;
    Ok(res.rows_affected() > 0)
}
