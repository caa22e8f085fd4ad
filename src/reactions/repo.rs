use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Reaction, ReactionRecord, ReactionRow, ReactionTarget};

fn select_list(target: ReactionTarget) -> String {
    format!(
        "id, user_id, {} AS target, reaction, created_at, updated_at",
        target.column()
    )
}

pub async fn list_by_user(
    db: &PgPool,
    target: ReactionTarget,
    user_id: Uuid,
) -> anyhow::Result<Vec<ReactionRecord>> {
    let rows = sqlx::query_as::<_, ReactionRow>(&format!(
        "SELECT {} FROM {} WHERE user_id = $1 ORDER BY updated_at DESC",
        select_list(target),
        target.table()
    ))
    .bind(user_id)
    .fetch_all(db)
    .await
    .with_context(|| format!("list {}", target.table()))?;

    rows.into_iter().map(ReactionRecord::try_from).collect()
}

/// Inserts or overwrites the reaction for (user, target). Returns the stored
/// record and whether it was newly created.
pub async fn upsert(
    db: &PgPool,
    target: ReactionTarget,
    user_id: Uuid,
    key: &str,
    reaction: Reaction,
) -> anyhow::Result<(ReactionRecord, bool)> {
    let row = sqlx::query_as::<_, ReactionRow>(&format!(
        r#"
        INSERT INTO {table} (user_id, {col}, reaction)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, {col})
        DO UPDATE SET reaction = EXCLUDED.reaction, updated_at = now()
        RETURNING {select}, (xmax = 0) AS inserted
        "#,
        table = target.table(),
        col = target.column(),
        select = select_list(target),
    ))
    .bind(user_id)
    .bind(key)
    .bind(reaction.as_str())
    .fetch_one(db)
    .await
    .with_context(|| format!("upsert {}", target.table()))?;

    let inserted = row.inserted;
    Ok((ReactionRecord::try_from(row)?, inserted))
}

/// Returns the number of removed rows (0 or 1).
pub async fn delete(
    db: &PgPool,
    target: ReactionTarget,
    user_id: Uuid,
    key: &str,
) -> anyhow::Result<u64> {
    let res = sqlx::query(&format!(
        "DELETE FROM {} WHERE user_id = $1 AND {} = $2",
        target.table(),
        target.column()
    ))
    .bind(user_id)
    .bind(key)
    .execute(db)
    .await
    .with_context(|| format!("delete from {}", target.table()))?;
    Ok(res.rows_affected())
}
