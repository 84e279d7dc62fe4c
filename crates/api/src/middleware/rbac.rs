use axum::{extract::FromRequestParts, http::request::Parts};
use onboard_core::{
    access::{self, Caller},
    error::CoreError,
    roles::Role,
};

use crate::{error::AppError, middleware::auth::AuthCaller, state::AppState};

/// Extractor that requires a caller allowed to manage roles (hr or admin).
///
/// Used by the dedicated role-change route, which has no per-field decision
/// left to make once the caller class is established.
pub struct RequireHr(pub Caller);

impl FromRequestParts<AppState> for RequireHr {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthCaller(caller) = AuthCaller::from_request_parts(parts, state).await?;
        if !access::can_assign_role(&caller) {
            return Err(CoreError::Forbidden("HR or admin role required".to_string()).into());
        }
        Ok(RequireHr(caller))
    }
}

/// Extractor that requires an authenticated caller with the admin role.
///
/// Field-level decisions go through the access evaluator instead; this is
/// only for routes that are admin-by-definition, like password resets.
pub struct RequireAdmin(pub Caller);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthCaller(caller) = AuthCaller::from_request_parts(parts, state).await?;
        if caller.role != Role::Admin {
            return Err(CoreError::Forbidden("Admin role required".to_string()).into());
        }
        Ok(RequireAdmin(caller))
    }
}
