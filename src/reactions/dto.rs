use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::{Reaction, ReactionRecord};

#[derive(Debug, Deserialize)]
pub struct ProductReactionRequest {
    pub product_id: String,
    pub reaction: Reaction,
}

#[derive(Debug, Deserialize)]
pub struct IngredientReactionRequest {
    pub ingredient_name: String,
    pub reaction: Reaction,
}

#[derive(Debug, Serialize)]
pub struct ProductReaction {
    pub id: Uuid,
    pub product_id: String,
    pub reaction: Reaction,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct IngredientReaction {
    pub id: Uuid,
    pub ingredient_name: String,
    pub reaction: Reaction,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<ReactionRecord> for ProductReaction {
    fn from(r: ReactionRecord) -> Self {
        Self {
            id: r.id,
            product_id: r.target,
            reaction: r.reaction,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

impl From<ReactionRecord> for IngredientReaction {
    fn from(r: ReactionRecord) -> Self {
        Self {
            id: r.id,
            ingredient_name: r.target,
            reaction: r.reaction,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub message: String,
    pub deleted: u64,
}
