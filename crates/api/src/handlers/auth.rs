use axum::{extract::State, Json};
use onboard_core::{error::CoreError, types::EmployeeId};
use onboard_db::repositories::{EmployeeRepo, RoleRepo};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{jwt, password},
    error::{AppError, AppResult},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub employee: EmployeeInfo,
}

#[derive(Debug, Serialize)]
pub struct EmployeeInfo {
    pub id: EmployeeId,
    pub username: String,
    pub email: String,
    pub role: String,
}

/// POST /api/v1/auth/login
///
/// Exchanges username/password for a bearer token. The response never
/// distinguishes an unknown username from a wrong password.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let employee = EmployeeRepo::find_by_username(&state.pool, &payload.username)
        .await?
        .ok_or_else(|| invalid_credentials())?;

    let verified = password::verify_password(&payload.password, &employee.password_hash)
        .map_err(|e| AppError::InternalError(format!("password verification failed: {e}")))?;
    if !verified {
        return Err(invalid_credentials());
    }

    let role = RoleRepo::resolve_name(&state.pool, employee.role_id).await?;
    let access_token = jwt::generate_access_token(employee.id, &role, &state.config.jwt)?;

    tracing::info!(employee_id = %employee.id, "employee logged in");

    Ok(Json(AuthResponse {
        access_token,
        token_type: "bearer",
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        employee: EmployeeInfo {
            id: employee.id,
            username: employee.username,
            email: employee.email,
            role,
        },
    }))
}

fn invalid_credentials() -> AppError {
    CoreError::Unauthorized("Incorrect username or password".to_string()).into()
}
