use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::reactions::Reaction;

pub(crate) const TEST_COLUMNS: &str =
    "id, user_id, item_id, start_date, finish_date, completed, result, created_at, updated_at";

#[derive(Debug, Clone, FromRow)]
pub struct TestRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub item_id: String,
    pub start_date: OffsetDateTime,
    pub finish_date: OffsetDateTime,
    pub completed: bool,
    pub result: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// A sensitivity test. Active while `completed` is false.
#[derive(Debug, Clone, PartialEq)]
pub struct Test {
    pub id: Uuid,
    pub user_id: Uuid,
    pub item_id: String,
    pub start_date: OffsetDateTime,
    pub finish_date: OffsetDateTime,
    pub completed: bool,
    pub result: Option<Reaction>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl TryFrom<TestRow> for Test {
    type Error = anyhow::Error;

    fn try_from(r: TestRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            user_id: r.user_id,
            item_id: r.item_id,
            start_date: r.start_date,
            finish_date: r.finish_date,
            completed: r.completed,
            result: r.result.as_deref().map(str::parse::<Reaction>).transpose()?,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}
