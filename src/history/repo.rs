use anyhow::Context;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub item_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub viewed_at: OffsetDateTime,
}

pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<HistoryEntry>> {
    sqlx::query_as::<_, HistoryEntry>(
        "SELECT id, user_id, item_id, viewed_at FROM history WHERE user_id = $1 ORDER BY viewed_at DESC",
    )
    .bind(user_id)
    .fetch_all(db)
    .await
    .context("list history")
}

pub async fn record(db: &PgPool, user_id: Uuid, item_id: &str) -> anyhow::Result<HistoryEntry> {
    sqlx::query_as::<_, HistoryEntry>(
        r#"
        INSERT INTO history (user_id, item_id)
        VALUES ($1, $2)
        RETURNING id, user_id, item_id, viewed_at
        "#,
    )
    .bind(user_id)
    .bind(item_id)
    .fetch_one(db)
    .await
    .context("insert history entry")
}
