#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use lms_api::auth::jwt::{generate_access_token, JwtConfig};
use lms_api::auth::password::hash_password;
use lms_api::config::ServerConfig;
use lms_api::router::build_app_router;
use lms_api::state::AppState;
use lms_core::roles::Role;
use lms_db::models::user::{CreateUser, User};
use lms_db::repositories::UserRepo;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// A `ServerConfig` with a fixed JWT secret and Zoom disabled.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hs256".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        cookie_secure: false,
        zoom: None,
    }
}

/// The production router, middleware included, over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        zoom: None,
    };
    build_app_router(state, &config)
}

/// Insert a user with [`TEST_PASSWORD`] and return the row plus a bearer token.
pub async fn create_user(pool: &PgPool, name: &str, role: Role) -> (User, String) {
    let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
    let user = UserRepo::create(
        pool,
        &CreateUser {
            full_name: name.to_string(),
            email,
            password_hash: Some(hash_password(TEST_PASSWORD).unwrap()),
            role: role.as_str().to_string(),
            level: None,
            status: None,
            phone: None,
            avatar_url: None,
            bio: None,
        },
    )
    .await
    .unwrap();
    let token = generate_access_token(user.id, role, &test_config().jwt).unwrap();
    (user, token)
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// POST a raw, possibly malformed, JSON body.
pub async fn post_raw_auth(app: Router, uri: &str, body: &'static str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}
