//! End-to-end flows against a real Postgres. Ignored by default so a plain
//! `cargo test` works without a database. CI starts a Postgres service and
//! runs `DATABASE_URL=postgres://... cargo test -- --include-ignored`; each
//! test gets a fresh database with `./migrations` applied by `sqlx::test`.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use sensitivv::{
    app::build_app,
    catalog::{CatalogSource, Catalogs, LocalCatalog, ProductCatalog},
    state::AppState,
};

fn app_with(pool: PgPool) -> Router {
    let local = Arc::new(LocalCatalog::sample()) as Arc<dyn ProductCatalog>;
    let catalogs = Catalogs {
        local: local.clone(),
        remote: local,
        default_source: CatalogSource::Local,
    };
    build_app(AppState::from_parts(pool, Arc::new(AppState::fake_config()), catalogs))
}

async fn call(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let req = match body {
        Some(b) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

/// Registers a fresh user and returns (user id, access token).
async fn register(app: &Router, email: &str) -> (String, String) {
    let (status, body) = call(
        app,
        Method::POST,
        "/users",
        None,
        Some(json!({ "email": email, "password": "password1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    (
        body["user"]["id"].as_str().unwrap().to_string(),
        body["access_token"].as_str().unwrap().to_string(),
    )
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn register_then_duplicate(pool: PgPool) {
    let app = app_with(pool);
    let (status, body) = call(
        &app,
        Method::POST,
        "/users",
        None,
        Some(json!({ "email": "a@b.com", "password": "password1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["email"], "a@b.com");
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("password_hash").is_none());

    let (status, body) = call(
        &app,
        Method::POST,
        "/users",
        None,
        Some(json!({ "email": "A@B.com", "password": "password1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already registered"));

    let (status, _) = call(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({ "email": "a@b.com", "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn one_active_test_per_product(pool: PgPool) {
    let app = app_with(pool);
    let (_, token) = register(&app, "tester@example.com").await;
    let start = json!({ "item_id": "3017620425035" });

    let (status, first) = call(&app, Method::POST, "/tests", Some(&token), Some(start.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["completed"], false);
    assert_eq!(first["expired"], false);

    let (status, _) = call(&app, Method::POST, "/tests", Some(&token), Some(start.clone())).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let uri = format!("/tests/{}", first["id"].as_str().unwrap());
    let (status, done) = call(&app, Method::PUT, &uri, Some(&token), Some(json!({ "result": "Sensitive" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(done["completed"], true);
    assert_eq!(done["result"], "Sensitive");

    // a completed test frees the slot
    let (status, _) = call(&app, Method::POST, "/tests", Some(&token), Some(start)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, list) = call(&app, Method::GET, "/tests", Some(&token), None).await;
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn reaction_upsert_keeps_latest(pool: PgPool) {
    let app = app_with(pool);
    let (_, token) = register(&app, "react@example.com").await;

    let (status, _) = call(
        &app,
        Method::POST,
        "/product-reactions",
        Some(&token),
        Some(json!({ "product_id": "5449000000996", "reaction": "Safe" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call(
        &app,
        Method::POST,
        "/product-reactions",
        Some(&token),
        Some(json!({ "product_id": "5449000000996", "reaction": "Critic" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reaction"], "Critic");

    let (_, list) = call(&app, Method::GET, "/product-reactions", Some(&token), None).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["reaction"], "Critic");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn wishlist_and_notes_are_scoped(pool: PgPool) {
    let app = app_with(pool);
    let (_, alice) = register(&app, "alice@example.com").await;
    let (_, bob) = register(&app, "bob@example.com").await;

    let (status, entry) = call(
        &app,
        Method::POST,
        "/wishlist",
        Some(&alice),
        Some(json!({ "product_id": "3017620425035" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/wishlist/{}", entry["id"].as_str().unwrap());

    let (status, _) = call(&app, Method::DELETE, &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, body) = call(&app, Method::DELETE, &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], entry["id"]);
    let (status, _) = call(&app, Method::DELETE, &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, note) = call(
        &app,
        Method::POST,
        "/productnotes",
        Some(&alice),
        Some(json!({ "product_id": "3017620425035", "note": "headache", "rating": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/productnotes/{}", note["id"].as_str().unwrap());
    let (status, _) = call(&app, Method::PUT, &uri, Some(&bob), Some(json!({ "note": "mine now" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, updated) = call(&app, Method::PUT, &uri, Some(&alice), Some(json!({ "note": "fine", "rating": 4 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["rating"], 4);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn completeness_recomputed_on_save(pool: PgPool) {
    let app = app_with(pool);
    let (id, token) = register(&app, "profile@example.com").await;
    let uri = format!("/api/users/{id}/personal-info");

    let (status, body) = call(
        &app,
        Method::PUT,
        &uri,
        Some(&token),
        Some(json!({ "personal_info": { "rut": "12.345.678-5", "allergies": ["peanuts"] } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["profile_completeness"], 33);

    let (_, body) = call(
        &app,
        Method::PUT,
        &uri,
        Some(&token),
        Some(json!({ "personal_info": {} })),
    )
    .await;
    assert_eq!(body["user"]["profile_completeness"], 0);

    let (status, body) = call(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["personal_info"]["allergies"], json!([]));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn history_newest_first(pool: PgPool) {
    let app = app_with(pool);
    let (_, token) = register(&app, "viewer@example.com").await;
    for item in ["first", "second"] {
        let (status, _) = call(&app, Method::POST, "/history", Some(&token), Some(json!({ "item_id": item }))).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let (_, list) = call(&app, Method::GET, "/history", Some(&token), None).await;
    assert_eq!(list[0]["item_id"], "second");
    assert_eq!(list[1]["item_id"], "first");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn complete_test_without_body(pool: PgPool) {
    let app = app_with(pool);
    let (_, token) = register(&app, "nobody@example.com").await;
    let (status, started) = call(
        &app,
        Method::POST,
        "/tests",
        Some(&token),
        Some(json!({ "item_id": "3017620425035" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/tests/{}", started["id"].as_str().unwrap());
    let (status, done) = call(&app, Method::PUT, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK, "{done}");
    assert_eq!(done["completed"], true);
    assert_eq!(done["result"], Value::Null);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn note_edit_keeps_rating_when_omitted(pool: PgPool) {
    let app = app_with(pool);
    let (_, token) = register(&app, "rater@example.com").await;
    let (status, note) = call(
        &app,
        Method::POST,
        "/productnotes",
        Some(&token),
        Some(json!({ "product_id": "3017620425035", "note": "ok", "rating": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/productnotes/{}", note["id"].as_str().unwrap());
    let (status, edited) = call(&app, Method::PUT, &uri, Some(&token), Some(json!({ "note": "edited" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(edited["note"], "edited");
    assert_eq!(edited["rating"], 4);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn reaction_delete_trims_key(pool: PgPool) {
    let app = app_with(pool);
    let (_, token) = register(&app, "milk@example.com").await;
    let (status, saved) = call(
        &app,
        Method::POST,
        "/ingredient-reactions",
        Some(&token),
        Some(json!({ "ingredient_name": " milk ", "reaction": "Safe" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(saved["ingredient_name"], "milk");

    let (status, body) = call(&app, Method::DELETE, "/ingredient-reactions/%20milk%20", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], 1);

    let (_, list) = call(&app, Method::GET, "/ingredient-reactions", Some(&token), None).await;
    assert_eq!(list, json!([]));
}
