//! HTTP-level integration tests for login and service-to-service
//! authentication.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_test_employee, get_auth, post_json, TEST_PASSWORD, TEST_SERVICE_KEY,
};
use sqlx::PgPool;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Successful login returns 200 with a token and the employee's identity.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_success(pool: PgPool) {
    let employee = create_test_employee(&pool, "loginuser", "hr").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "loginuser", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert_eq!(json["token_type"], "bearer");
    assert_eq!(json["expires_in"], 1800);
    assert_eq!(json["employee"]["id"], employee.id.to_string());
    assert_eq!(json["employee"]["username"], "loginuser");
    assert_eq!(json["employee"]["role"], "hr");
}

/// Wrong password and unknown username both yield the same 401 message, so
/// login attempts cannot probe for valid usernames.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_failures_are_indistinguishable(pool: PgPool) {
    create_test_employee(&pool, "wrongpw", "employee").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "wrongpw", "password": "incorrect" });
    let wrong_password = post_json(app.clone(), "/api/v1/auth/login", body).await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        wrong_password.headers().get("www-authenticate").unwrap(),
        "Bearer"
    );
    let wrong_password_json = body_json(wrong_password).await;

    let body = serde_json::json!({ "username": "ghost", "password": "whatever" });
    let unknown_user = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    let unknown_user_json = body_json(unknown_user).await;

    assert_eq!(wrong_password_json["error"], unknown_user_json["error"]);
    assert_eq!(
        wrong_password_json["error"],
        "Unauthorized: Incorrect username or password"
    );
}

/// A fresh token is accepted by a protected route.
#[sqlx::test(migrations = "../db/migrations")]
async fn token_grants_access_to_protected_route(pool: PgPool) {
    create_test_employee(&pool, "tokenuser", "employee").await;
    let app = common::build_test_app(pool);

    let token = common::login(app.clone(), "tokenuser", TEST_PASSWORD).await;
    let response = get_auth(app, "/api/v1/employees/me", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["username"], "tokenuser");
}

/// Protected routes reject missing and malformed credentials with 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn protected_route_requires_bearer_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let no_token = common::get(app.clone(), "/api/v1/employees/me").await;
    assert_eq!(no_token.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        no_token.headers().get("www-authenticate").unwrap(),
        "Bearer"
    );

    let bad_token = get_auth(app.clone(), "/api/v1/employees/me", "not-a-jwt").await;
    assert_eq!(bad_token.status(), StatusCode::UNAUTHORIZED);

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/v1/employees/me")
        .header("Authorization", "Basic abc123")
        .body(axum::body::Body::empty())
        .unwrap();
    let wrong_scheme = app.oneshot(request).await.unwrap();
    assert_eq!(wrong_scheme.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Service tokens
// ---------------------------------------------------------------------------

async fn request_service_token(app: axum::Router, key: &str) -> axum::http::Response<axum::body::Body> {
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/v1/services/token")
        .header("X-Service-API-Key", key)
        .body(axum::body::Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// A configured API key yields a one-hour token that can read the
/// directory but not a personal profile.
#[sqlx::test(migrations = "../db/migrations")]
async fn service_key_exchanges_for_directory_token(pool: PgPool) {
    create_test_employee(&pool, "somebody", "employee").await;
    let app = common::build_test_app(pool);

    let response = request_service_token(app.clone(), TEST_SERVICE_KEY).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["service"], "analytics-service");
    assert_eq!(json["expires_in"], 3600);
    let token = json["access_token"].as_str().unwrap().to_string();

    // Directory read works with the manager-role service token.
    let list = get_auth(app.clone(), "/api/v1/employees", &token).await;
    assert_eq!(list.status(), StatusCode::OK);

    // Services have no employee record of their own.
    let me = get_auth(app, "/api/v1/employees/me", &token).await;
    assert_eq!(me.status(), StatusCode::FORBIDDEN);
}

/// An unknown key is refused; a missing header is an authentication error.
#[sqlx::test(migrations = "../db/migrations")]
async fn service_token_rejects_bad_or_missing_key(pool: PgPool) {
    let app = common::build_test_app(pool);

    let bad_key = request_service_token(app.clone(), "not-the-key").await;
    assert_eq!(bad_key.status(), StatusCode::FORBIDDEN);

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/v1/services/token")
        .body(axum::body::Body::empty())
        .unwrap();
    let missing = app.oneshot(request).await.unwrap();
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
}
