pub mod auth;
pub mod employees;
pub mod health;
pub mod mcp;
pub mod services;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                        login (public)
///
/// /employees                         register (optional auth), list/search
/// /employees/me                      own profile (get, update)
/// /employees/{id}                    per-record profile (get, update)
/// /employees/{id}/salary             confidential salary (get, update)
/// /employees/{id}/role               role change (hr/admin)
/// /employees/{id}/reset-password     password reset (admin)
///
/// /services/token                    API-key -> service token
///
/// /mcp                               action dispatch envelope
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/employees", employees::router())
        .nest("/services", services::router())
        .merge(mcp::router())
}
