use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::{request::Parts, HeaderMap},
};
use onboard_core::{
    access::{Caller, Subject},
    error::CoreError,
    roles::Role,
};
use uuid::Uuid;

use crate::{auth::jwt, auth::jwt::JwtConfig, error::AppError, state::AppState};

/// Extractor that authenticates the request via its bearer token.
///
/// Rejects with 401 when the token is missing, malformed, or expired.
/// Use `Option<AuthCaller>` on routes where authentication is optional.
pub struct AuthCaller(pub Caller);

impl FromRequestParts<AppState> for AuthCaller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let caller = authenticate_headers(&parts.headers, &state.config.jwt)?;
        Ok(AuthCaller(caller))
    }
}

impl OptionalFromRequestParts<AppState> for AuthCaller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        if !parts.headers.contains_key("authorization") {
            return Ok(None);
        }
        // A header that is present but invalid is an error, not anonymity.
        let caller = authenticate_headers(&parts.headers, &state.config.jwt)?;
        Ok(Some(AuthCaller(caller)))
    }
}

/// Resolve the caller from request headers.
///
/// Shared by the REST extractor above and the action dispatch endpoint,
/// which reports authentication failures inside its response envelope
/// instead of as an HTTP status.
pub fn authenticate_headers(headers: &HeaderMap, config: &JwtConfig) -> Result<Caller, CoreError> {
    let header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| CoreError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = header.strip_prefix("Bearer ").ok_or_else(|| {
        CoreError::Unauthorized("Invalid Authorization format. Expected: Bearer <token>".to_string())
    })?;

    let claims = jwt::validate_token(token, config)
        .map_err(|_| CoreError::Unauthorized("Invalid or expired token".to_string()))?;

    claims_to_caller(&claims.sub, &claims.role, claims.service)
}

fn claims_to_caller(sub: &str, role: &str, service: bool) -> Result<Caller, CoreError> {
    let role: Role = role
        .parse()
        .map_err(|_| CoreError::Unauthorized("Invalid or expired token".to_string()))?;

    let subject = if service {
        Subject::Service(sub.to_string())
    } else {
        let id = Uuid::parse_str(sub)
            .map_err(|_| CoreError::Unauthorized("Invalid or expired token".to_string()))?;
        Subject::Employee(id)
    };

    Ok(Caller { subject, role })
}
