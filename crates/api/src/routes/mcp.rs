//! Route definition for the action-dispatch endpoint.

use axum::routing::post;
use axum::Router;

use crate::handlers::mcp;
use crate::state::AppState;

/// Dispatch route mounted at `/mcp`.
///
/// ```text
/// POST /mcp    -> dispatch
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/mcp", post(mcp::dispatch))
}
