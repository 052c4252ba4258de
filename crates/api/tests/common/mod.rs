//! Shared helpers for API integration tests: an in-process router
//! wired to a per-test database, plus request/response utilities.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::util::ServiceExt;

use watchpost_api::auth::jwt::{generate_access_token, JwtConfig};
use watchpost_api::auth::password::hash_password;
use watchpost_api::config::ServerConfig;
use watchpost_api::routes;
use watchpost_api::state::AppState;
use watchpost_db::models::user::{CreateUser, User};
use watchpost_db::repositories::{RoleRepo, UserRepo};

/// Fixed JWT configuration so tokens minted by one helper validate in
/// another without touching the environment.
pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-0123456789".to_string(),
        access_token_expiry_mins: 60,
    }
}

fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![],
        request_timeout_secs: 30,
        jwt: test_jwt_config(),
    }
}

/// Build the application router backed by the given test pool.
///
/// Mirrors the route tree the binary serves; the outer middleware
/// layers (CORS, tracing, timeouts) are not under test here.
pub fn build_test_app(pool: PgPool) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(test_config()),
    };

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .with_state(state)
}

/// Mint an access token for an arbitrary user id and role.
pub fn token_for(user_id: i64, role: &str) -> String {
    generate_access_token(user_id, role, &test_jwt_config())
        .expect("token generation should succeed")
}

/// Mint an admin access token.
pub fn admin_token() -> String {
    token_for(1, "admin")
}

/// Insert a user with the admin role and a hashed password.
pub async fn seed_user(pool: &PgPool, username: &str, password: &str) -> User {
    let role = RoleRepo::find_by_name(pool, "admin")
        .await
        .expect("role lookup should succeed")
        .expect("admin role should be seeded");

    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: None,
            password_hash: hash_password(password).expect("hashing should succeed"),
            role_id: role.id,
        },
    )
    .await
    .expect("user creation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    app.clone()
        .oneshot(request)
        .await
        .expect("request should complete")
}

pub async fn get(app: &Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: &Router, uri: &str, token: &str, body: Value) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn patch_json(app: &Router, uri: &str, body: Value) -> Response {
    send(app, Method::PATCH, uri, None, Some(body)).await
}

pub async fn patch_json_auth(app: &Router, uri: &str, token: &str, body: Value) -> Response {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Assert an error response: expected status plus the `ERR` envelope.
pub async fn assert_error(response: Response, expected: StatusCode) -> Value {
    assert_eq!(response.status(), expected);
    let json = body_json(response).await;
    assert_eq!(json["_status"], "ERR");
    assert!(json["_issues"].as_array().is_some_and(|v| !v.is_empty()));
    json
}
