use anyhow::Context;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::{Test, TestRow, TEST_COLUMNS};
use crate::reactions::Reaction;

pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Test>> {
    let rows = sqlx::query_as::<_, TestRow>(&format!(
        "SELECT {TEST_COLUMNS} FROM tests WHERE user_id = $1 ORDER BY start_date DESC"
    ))
    .bind(user_id)
    .fetch_all(db)
    .await
    .context("list tests")?;
    rows.into_iter().map(Test::try_from).collect()
}

/// The running test for (user, item), if any.
pub async fn find_active(db: &PgPool, user_id: Uuid, item_id: &str) -> anyhow::Result<Option<Test>> {
    let row = sqlx::query_as::<_, TestRow>(&format!(
        "SELECT {TEST_COLUMNS} FROM tests WHERE user_id = $1 AND item_id = $2 AND NOT completed"
    ))
    .bind(user_id)
    .bind(item_id)
    .fetch_optional(db)
    .await
    .context("find active test")?;
    row.map(Test::try_from).transpose()
}

pub async fn insert(
    db: &PgPool,
    user_id: Uuid,
    item_id: &str,
    start: OffsetDateTime,
    finish: OffsetDateTime,
) -> anyhow::Result<Test> {
    let row = sqlx::query_as::<_, TestRow>(&format!(
        r#"
        INSERT INTO tests (user_id, item_id, start_date, finish_date)
        VALUES ($1, $2, $3, $4)
        RETURNING {TEST_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(item_id)
    .bind(start)
    .bind(finish)
    .fetch_one(db)
    .await
    .context("insert test")?;
    Test::try_from(row)
}

/// Marks the caller's test completed, recording `result` when given.
/// `None` when no such test belongs to the user.
pub async fn complete(
    db: &PgPool,
    user_id: Uuid,
    test_id: Uuid,
    result: Option<Reaction>,
) -> anyhow::Result<Option<Test>> {
    let row = sqlx::query_as::<_, TestRow>(&format!(
        r#"
        UPDATE tests
           SET completed = true,
               result = COALESCE($3, result),
               updated_at = now()
         WHERE id = $1 AND user_id = $2
        RETURNING {TEST_COLUMNS}
        "#
    ))
    .bind(test_id)
    .bind(user_id)
    .bind(result.map(Reaction::as_str))
    .fetch_optional(db)
    .await
    .context("complete test")?;
    row.map(Test::try_from).transpose()
}
