//! Service-to-service authentication.
//!
//! Named integrations (analytics, HR sync, chatbot) present an API key and
//! receive a short-lived JWT. The minted token carries the `manager` role,
//! so the normal access rules grant directory-wide reads and nothing else;
//! there is no parallel trust path for services.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use onboard_core::error::CoreError;
use onboard_core::roles::Role;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::auth::jwt::{self, SERVICE_TOKEN_EXPIRY_SECS};
use crate::error::AppResult;
use crate::state::AppState;

const API_KEY_HEADER: &str = "x-service-api-key";

#[derive(Debug, Serialize)]
pub struct ServiceTokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub service: String,
}

/// POST /api/v1/services/token
///
/// Exchanges a configured API key for a service token. Key comparison goes
/// through SHA-256 digests so the match does not short-circuit on the first
/// differing byte of the secret itself.
pub async fn issue_service_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<ServiceTokenResponse>> {
    let presented = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| CoreError::Unauthorized("Missing X-Service-API-Key header".to_string()))?;

    let presented_digest = Sha256::digest(presented.as_bytes());

    let service = state
        .config
        .service_keys
        .iter()
        .find(|k| Sha256::digest(k.key.as_bytes()) == presented_digest)
        .ok_or_else(|| CoreError::Forbidden("Invalid service API key".to_string()))?;

    let access_token =
        jwt::generate_service_token(&service.name, Role::Manager.as_str(), &state.config.jwt)?;

    tracing::info!(service = %service.name, "service token issued");

    Ok(Json(ServiceTokenResponse {
        access_token,
        token_type: "bearer",
        expires_in: SERVICE_TOKEN_EXPIRY_SECS,
        service: service.name.clone(),
    }))
}
