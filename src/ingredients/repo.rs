use anyhow::Context;
use serde::Serialize;
use serde_json::Value;
use sqlx::{types::Json, FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

const INGREDIENT_COLUMNS: &str =
    "id, name, description, category, properties, safety_level, created_at";

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub properties: Option<Json<Value>>,
    pub safety_level: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

pub struct NewIngredient<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub category: Option<&'a str>,
    pub properties: Option<Value>,
    pub safety_level: Option<&'a str>,
}

pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<Ingredient>> {
    sqlx::query_as::<_, Ingredient>(&format!(
        "SELECT {INGREDIENT_COLUMNS} FROM product_ingredients ORDER BY name"
    ))
    .fetch_all(db)
    .await
    .context("list ingredients")
}

pub async fn insert(db: &PgPool, new: NewIngredient<'_>) -> anyhow::Result<Ingredient> {
    sqlx::query_as::<_, Ingredient>(&format!(
        r#"
        INSERT INTO product_ingredients (name, description, category, properties, safety_level)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {INGREDIENT_COLUMNS}
        "#
    ))
    .bind(new.name)
    .bind(new.description)
    .bind(new.category)
    .bind(new.properties.map(Json))
    .bind(new.safety_level)
    .fetch_one(db)
    .await
    .context("insert ingredient")
}
