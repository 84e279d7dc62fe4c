//! Route definitions for service-to-service authentication.
//!
//! Mounted at `/services` in the API route tree.

use axum::routing::post;
use axum::Router;

use crate::handlers::service_auth;
use crate::state::AppState;

/// Service routes mounted at `/services`.
///
/// ```text
/// POST /token    -> issue_service_token
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/token", post(service_auth::issue_service_token))
}
