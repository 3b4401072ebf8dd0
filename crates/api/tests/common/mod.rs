//! Shared helpers for API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use lumen_api::auth::jwt::JwtConfig;
use lumen_api::config::ServerConfig;
use lumen_api::router::build_app_router;
use lumen_api::state::AppState;
use lumen_core::credits::DEFAULT_FREE_CREDITS;
use lumen_gateway::{GatewayClient, GatewayConfig};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

/// Gateway URL nothing listens on. Tests that must not reach the gateway use
/// this so an accidental call fails loudly.
pub const UNREACHABLE_GATEWAY: &str = "http://127.0.0.1:1/v1";

/// Build a test `ServerConfig` pointing at the given gateway.
pub fn test_config(gateway_url: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        default_free_credits: DEFAULT_FREE_CREDITS,
        jwt: JwtConfig::with_secret("integration-test-secret"),
        gateway: GatewayConfig::new(gateway_url, "test-gateway-key"),
    }
}

/// Build the full application router, identical to production.
pub fn build_test_app(pool: PgPool, gateway_url: &str) -> Router {
    let config = test_config(gateway_url);
    let gateway = GatewayClient::new(config.gateway.clone()).expect("gateway client");

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        gateway,
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("router should respond")
}

fn json_request(method: Method, uri: &str, body: &Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, json_request(Method::POST, uri, &body, None)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, json_request(Method::POST, uri, &body, Some(token))).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Sign up a user through the API. Returns `(user_id, access_token)`.
pub async fn signup(app: Router, email: &str) -> (i64, String) {
    let response = post_json(
        app,
        "/api/v1/auth/signup",
        serde_json::json!({ "email": email, "password": "password123" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let user_id = json["user"]["id"].as_i64().expect("user id");
    let token = json["access_token"].as_str().expect("access token").to_string();
    (user_id, token)
}
