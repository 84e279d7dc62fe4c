//! Shared helpers for HTTP-level integration tests.
//!
//! `build_test_app` goes through the same [`build_app_router`] as the
//! production binary, so every test exercises the full middleware stack
//! (CORS, request ID, timeout, tracing, panic recovery).

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use onboard_api::auth::jwt::JwtConfig;
use onboard_api::auth::password::hash_password;
use onboard_api::config::{ServerConfig, ServiceKey};
use onboard_api::router::build_app_router;
use onboard_api::state::AppState;
use onboard_db::models::employee::{CreateEmployee, Employee};
use onboard_db::repositories::{EmployeeRepo, RoleRepo};

/// Password used for every employee seeded by [`create_test_employee`].
pub const TEST_PASSWORD: &str = "test_password_123";

/// API key configured for the `analytics-service` integration in tests.
pub const TEST_SERVICE_KEY: &str = "test-service-key-abc123";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout, and one configured service integration.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 30,
        },
        service_keys: vec![ServiceKey {
            name: "analytics-service".to_string(),
            key: TEST_SERVICE_KEY.to_string(),
        }],
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Create an employee directly in the database with [`TEST_PASSWORD`].
///
/// The first name is the username and the last name is `"Tester"`, so name
/// searches can match on the username.
pub async fn create_test_employee(pool: &PgPool, username: &str, role_name: &str) -> Employee {
    let role = RoleRepo::find_by_name(pool, role_name)
        .await
        .expect("role lookup should succeed")
        .unwrap_or_else(|| panic!("role '{role_name}' should be seeded"));

    let hashed = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    let input = CreateEmployee {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: hashed,
        first_name: username.to_string(),
        last_name: "Tester".to_string(),
        phone: None,
        job_title: "Engineer".to_string(),
        department: "Engineering".to_string(),
        role_id: role.id,
    };
    EmployeeRepo::create(pool, &input)
        .await
        .expect("employee creation should succeed")
}

/// Log in via the API and return the bearer token.
pub async fn login(app: Router, username: &str, password: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK, "login should succeed");
    let json = body_json(response).await;
    json["access_token"]
        .as_str()
        .expect("login response should carry access_token")
        .to_string()
}
