//! Signup, login, refresh, logout and session extraction.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, post_json_auth, signup, UNREACHABLE_GATEWAY};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn signup_returns_tokens_and_normalized_email(pool: PgPool) {
    let app = common::build_test_app(pool, UNREACHABLE_GATEWAY);

    let response = post_json(
        app,
        "/api/v1/auth/signup",
        json!({ "email": "  Ada@Example.com ", "password": "password123" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["expires_in"], 3600);
    assert_eq!(json["user"]["email"], "ada@example.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn new_user_starts_with_default_credits(pool: PgPool) {
    let app = common::build_test_app(pool, UNREACHABLE_GATEWAY);
    let (_, token) = signup(app.clone(), "fresh@example.com").await;

    let response = get_auth(app, "/api/v1/credits", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["free_credits"], 50);
    assert_eq!(json["data"]["paid_credits"], 0);
    assert_eq!(json["data"]["total_credits"], 50);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_signup_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool, UNREACHABLE_GATEWAY);
    signup(app.clone(), "twice@example.com").await;

    let response = post_json(
        app,
        "/api/v1/auth/signup",
        json!({ "email": "TWICE@example.com", "password": "password123" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn short_password_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool, UNREACHABLE_GATEWAY);

    let response = post_json(
        app,
        "/api/v1/auth/signup",
        json!({ "email": "short@example.com", "password": "1234567" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_with_correct_and_wrong_password(pool: PgPool) {
    let app = common::build_test_app(pool, UNREACHABLE_GATEWAY);
    let (user_id, _) = signup(app.clone(), "login@example.com").await;

    let ok = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "email": "Login@Example.com", "password": "password123" }),
    )
    .await;
    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(body_json(ok).await["user"]["id"], user_id);

    let wrong = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "email": "login@example.com", "password": "not-the-password" }),
    )
    .await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let unknown = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "ghost@example.com", "password": "password123" }),
    )
    .await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_rotates_the_token(pool: PgPool) {
    let app = common::build_test_app(pool, UNREACHABLE_GATEWAY);

    let response = post_json(
        app.clone(),
        "/api/v1/auth/signup",
        json!({ "email": "rotate@example.com", "password": "password123" }),
    )
    .await;
    let refresh_token = body_json(response).await["refresh_token"]
        .as_str()
        .unwrap()
        .to_string();

    let first = post_json(
        app.clone(),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);
    let new_token = body_json(first).await["refresh_token"]
        .as_str()
        .unwrap()
        .to_string();
    assert_ne!(new_token, refresh_token);

    // The old token was revoked by the rotation.
    let replay = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_revokes_refresh_tokens(pool: PgPool) {
    let app = common::build_test_app(pool, UNREACHABLE_GATEWAY);

    let response = post_json(
        app.clone(),
        "/api/v1/auth/signup",
        json!({ "email": "bye@example.com", "password": "password123" }),
    )
    .await;
    let json = body_json(response).await;
    let access = json["access_token"].as_str().unwrap().to_string();
    let refresh = json["refresh_token"].as_str().unwrap().to_string();

    let logout = post_json_auth(app.clone(), "/api/v1/auth/logout", json!({}), &access).await;
    assert_eq!(logout.status(), StatusCode::NO_CONTENT);

    let after = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh }),
    )
    .await;
    assert_eq!(after.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_requires_a_valid_token(pool: PgPool) {
    let app = common::build_test_app(pool, UNREACHABLE_GATEWAY);
    let (user_id, token) = signup(app.clone(), "me@example.com").await;

    let response = get_auth(app.clone(), "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], user_id);
    assert_eq!(json["data"]["email"], "me@example.com");
    assert!(json["data"].get("password_hash").is_none());

    let missing = get(app.clone(), "/api/v1/auth/me").await;
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let forged = get_auth(app, "/api/v1/auth/me", "not-a-token").await;
    assert_eq!(forged.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(forged).await["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn token_for_deleted_user_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone(), UNREACHABLE_GATEWAY);
    let (user_id, token) = signup(app.clone(), "gone@example.com").await;

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&pool)
        .await
        .unwrap();

    let response = get_auth(app, "/api/v1/credits", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn token_for_deactivated_user_is_forbidden(pool: PgPool) {
    let app = common::build_test_app(pool.clone(), UNREACHABLE_GATEWAY);
    let (user_id, token) = signup(app.clone(), "paused@example.com").await;

    sqlx::query("UPDATE users SET is_active = false WHERE id = $1")
        .bind(user_id)
        .execute(&pool)
        .await
        .unwrap();

    let response = get_auth(app, "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
