use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Sensitivity label a user attaches to a product, an ingredient or a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reaction {
    Critic,
    Sensitive,
    Safe,
}

impl Reaction {
    pub fn as_str(self) -> &'static str {
        match self {
            Reaction::Critic => "Critic",
            Reaction::Sensitive => "Sensitive",
            Reaction::Safe => "Safe",
        }
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Reaction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Critic" => Ok(Reaction::Critic),
            "Sensitive" => Ok(Reaction::Sensitive),
            "Safe" => Ok(Reaction::Safe),
            other => anyhow::bail!("unknown reaction label: {other}"),
        }
    }
}

/// What a reaction is attached to. Each target lives in its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionTarget {
    Product,
    Ingredient,
}

impl ReactionTarget {
    pub(crate) fn table(self) -> &'static str {
        match self {
            ReactionTarget::Product => "product_reactions",
            ReactionTarget::Ingredient => "ingredient_reactions",
        }
    }

    pub(crate) fn column(self) -> &'static str {
        match self {
            ReactionTarget::Product => "product_id",
            ReactionTarget::Ingredient => "ingredient_name",
        }
    }
}

/// Raw row from either reaction table; `target` is aliased from the
/// product or ingredient column.
#[derive(Debug, Clone, FromRow)]
pub struct ReactionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub target: String,
    pub reaction: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    /// Set by upserts: true when the row was inserted rather than updated.
    #[sqlx(default)]
    pub inserted: bool,
}

#[derive(Debug, Clone)]
pub struct ReactionRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub target: String,
    pub reaction: Reaction,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl TryFrom<ReactionRow> for ReactionRecord {
    type Error = anyhow::Error;

    fn try_from(r: ReactionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            user_id: r.user_id,
            target: r.target,
            reaction: r.reaction.parse()?,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}
