use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::{repo_types::Test, services::is_expired};
use crate::reactions::Reaction;

#[derive(Debug, Deserialize)]
pub struct StartTestRequest {
    pub item_id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CompleteTestRequest {
    #[serde(default)]
    pub result: Option<Reaction>,
}

#[derive(Debug, Serialize)]
pub struct TestResponse {
    pub id: Uuid,
    pub item_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub start_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub finish_date: OffsetDateTime,
    pub completed: bool,
    pub result: Option<Reaction>,
    /// The fixed test window has elapsed.
    pub expired: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl TestResponse {
    pub fn from_test(t: Test, now: OffsetDateTime) -> Self {
        let expired = is_expired(&t, now);
        Self {
            id: t.id,
            item_id: t.item_id,
            start_date: t.start_date,
            finish_date: t.finish_date,
            completed: t.completed,
            result: t.result,
            expired,
            updated_at: t.updated_at,
        }
    }
}
