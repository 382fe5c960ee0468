//! HTTP-level tests for register, login, and the auth extractor.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_returns_token_and_normalized_user(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({"email": "  Ada@Example.COM ", "password": "secret123", "name": "Ada"});

    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["data"]["token"].is_string());
    assert_eq!(json["data"]["user"]["email"], "ada@example.com");
    assert_eq!(json["data"]["user"]["name"], "Ada");
    assert!(json["data"]["user"].get("passwordHash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_registration_is_conflict(pool: PgPool) {
    let app = common::build_test_app(pool);
    common::register(app.clone(), "dup@example.com").await;

    let body = json!({"email": "DUP@example.com", "password": "secret123", "name": "Again"});
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_short_password_and_bad_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    let short = json!({"email": "a@example.com", "password": "12345", "name": "Ann"});
    let response = post_json(app.clone(), "/api/auth/register", short).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("at least 6"));

    let bad_email = json!({"email": "nope", "password": "123456", "name": "Ann"});
    let response = post_json(app, "/api/auth/register", bad_email).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_succeeds_with_correct_credentials(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (user_id, _) = common::register(app.clone(), "login@example.com").await;

    let body = json!({"email": "LOGIN@example.com", "password": "secret123"});
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["user"]["id"], user_id);
    assert!(json["data"]["expiresIn"].is_number());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_failures_share_one_message(pool: PgPool) {
    let app = common::build_test_app(pool);
    common::register(app.clone(), "who@example.com").await;

    let wrong_pw = json!({"email": "who@example.com", "password": "incorrect"});
    let response = post_json(app.clone(), "/api/auth/login", wrong_pw).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let first = body_json(response).await;

    let unknown = json!({"email": "nobody@example.com", "password": "secret123"});
    let response = post_json(app, "/api/auth/login", unknown).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let second = body_json(response).await;

    assert_eq!(first["error"], second["error"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_returns_current_user(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (user_id, token) = common::register(app.clone(), "me@example.com").await;

    let response = get_auth(app, "/api/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], user_id);
    assert_eq!(json["data"]["email"], "me@example.com");
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let app = common::build_test_app(common::lazy_pool());
    let response = get(app, "/api/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    let app = common::build_test_app(common::lazy_pool());
    let response = get_auth(app.clone(), "/api/forms", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid token");
}
