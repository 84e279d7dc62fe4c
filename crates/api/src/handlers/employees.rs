//! Handlers for the `/employees` resource.
//!
//! Every read or write of a specific record passes through
//! [`onboard_core::access::authorize`] before the database is touched, so
//! the REST surface and the action dispatcher enforce identical rules.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use onboard_core::access::{self, AccessKind, Caller, Denied, EmployeeField, Subject};
use onboard_core::error::CoreError;
use onboard_core::limits::{clamp_limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use onboard_core::roles::{Role, DEFAULT_ROLE};
use onboard_core::types::EmployeeId;
use onboard_db::models::employee::{
    CreateEmployee, Employee, EmployeeConfidential, EmployeeResponse, UpdateEmployeeProfile,
};
use onboard_db::repositories::{EmployeeRepo, RoleRepo};
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthCaller;
use crate::middleware::rbac::{RequireAdmin, RequireHr};
use crate::query::EmployeeListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Minimum password length enforced on registration and password reset.
const MIN_PASSWORD_LENGTH: usize = 8;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /employees`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    pub username: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub password: String,
    #[validate(length(min = 1, message = "First name must not be empty"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name must not be empty"))]
    pub last_name: String,
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "Job title must not be empty"))]
    pub job_title: String,
    #[validate(length(min = 1, message = "Department must not be empty"))]
    pub department: String,
    /// Role name from the closed set. Anonymous and non-privileged callers
    /// must omit this or send `"employee"`.
    pub role: Option<String>,
}

/// Request body for `PUT /employees/me` and `PUT /employees/{id}`.
///
/// Unknown fields are rejected outright, so a payload smuggling `salary`,
/// `role`, `username` or `password` fails for every caller instead of being
/// silently dropped.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, message = "First name must not be empty"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "Last name must not be empty"))]
    pub last_name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "Job title must not be empty"))]
    pub job_title: Option<String>,
    #[validate(length(min = 1, message = "Department must not be empty"))]
    pub department: Option<String>,
}

impl UpdateProfileRequest {
    fn into_dto(self) -> UpdateEmployeeProfile {
        UpdateEmployeeProfile {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            job_title: self.job_title,
            department: self.department,
        }
    }
}

/// Request body for `PUT /employees/{id}/salary`.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateSalaryRequest {
    #[validate(range(min = 0.0, message = "Salary must not be negative"))]
    pub salary: f64,
}

/// Request body for `PUT /employees/{id}/role`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateRoleRequest {
    pub role: String,
}

/// Request body for `POST /employees/{id}/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/employees
///
/// Self-registration (anonymous) or HR-initiated creation. A non-default
/// role may only be assigned by a caller the access rules allow to assign
/// roles; anyone else must omit `role` or send `"employee"`.
pub async fn register(
    State(state): State<AppState>,
    caller: Option<AuthCaller>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<EmployeeResponse>)> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(CoreError::Validation)?;

    let role = match input.role.as_deref() {
        None => DEFAULT_ROLE,
        Some(name) => name
            .parse::<Role>()
            .map_err(|e| CoreError::Validation(e.to_string()))?,
    };
    if role != DEFAULT_ROLE {
        let may_assign = caller
            .as_ref()
            .is_some_and(|AuthCaller(c)| access::can_assign_role(c));
        if !may_assign {
            return Err(
                CoreError::Forbidden("Only HR or admin may assign a role".to_string()).into(),
            );
        }
    }

    // Pre-check duplicates for a friendly message; the unique constraints
    // remain the real guard and are classified in `error.rs` if racing.
    if EmployeeRepo::find_by_username(&state.pool, &input.username)
        .await?
        .is_some()
    {
        return Err(CoreError::Validation("Username already exists".to_string()).into());
    }
    if EmployeeRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(CoreError::Validation("Email already exists".to_string()).into());
    }

    let role_row = RoleRepo::find_by_name(&state.pool, role.as_str())
        .await?
        .ok_or_else(|| AppError::InternalError(format!("role '{role}' is not seeded")))?;

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("password hashing failed: {e}")))?;

    let employee = EmployeeRepo::create(
        &state.pool,
        &CreateEmployee {
            username: input.username,
            email: input.email,
            password_hash: hashed,
            first_name: input.first_name,
            last_name: input.last_name,
            phone: input.phone,
            job_title: input.job_title,
            department: input.department,
            role_id: role_row.id,
        },
    )
    .await?;

    tracing::info!(employee_id = %employee.id, role = %role, "employee registered");

    Ok((
        StatusCode::CREATED,
        Json(EmployeeResponse::from_employee(&employee, role_row.name)),
    ))
}

/// GET /api/v1/employees
///
/// Directory list/search: `?name=` filters by case-insensitive substring of
/// the full name, `?limit=` is clamped into `[1, MAX_LIST_LIMIT]`.
pub async fn list_employees(
    State(state): State<AppState>,
    AuthCaller(caller): AuthCaller,
    Query(params): Query<EmployeeListParams>,
) -> AppResult<Json<DataResponse<Vec<EmployeeResponse>>>> {
    if !access::can_list_employees(&caller) {
        return Err(
            CoreError::Forbidden("Directory access requires an elevated role".to_string()).into(),
        );
    }

    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let rows = match params.name.as_deref() {
        Some(name) => EmployeeRepo::search_by_name(&state.pool, name, limit).await?,
        None => EmployeeRepo::list(&state.pool, limit).await?,
    };

    let data = to_responses(&state, &rows).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/employees/me
pub async fn get_me(
    State(state): State<AppState>,
    AuthCaller(caller): AuthCaller,
) -> AppResult<Json<EmployeeResponse>> {
    let id = own_employee_id(&caller)?;
    let employee = fetch_employee(&state, id).await?;
    let role = RoleRepo::resolve_name(&state.pool, employee.role_id).await?;
    Ok(Json(EmployeeResponse::from_employee(&employee, role)))
}

/// PUT /api/v1/employees/me
///
/// Self-service update of the six non-confidential profile fields.
pub async fn update_me(
    State(state): State<AppState>,
    AuthCaller(caller): AuthCaller,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<EmployeeResponse>> {
    let id = own_employee_id(&caller)?;
    apply_profile_update(&state, &caller, id, input).await
}

/// GET /api/v1/employees/{id}
pub async fn get_employee(
    State(state): State<AppState>,
    AuthCaller(caller): AuthCaller,
    Path(id): Path<EmployeeId>,
) -> AppResult<Json<EmployeeResponse>> {
    check(&caller, id, EmployeeField::Profile, AccessKind::Read)?;
    let employee = fetch_employee(&state, id).await?;
    let role = RoleRepo::resolve_name(&state.pool, employee.role_id).await?;
    Ok(Json(EmployeeResponse::from_employee(&employee, role)))
}

/// PUT /api/v1/employees/{id}
pub async fn update_employee(
    State(state): State<AppState>,
    AuthCaller(caller): AuthCaller,
    Path(id): Path<EmployeeId>,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<EmployeeResponse>> {
    apply_profile_update(&state, &caller, id, input).await
}

/// GET /api/v1/employees/{id}/salary
///
/// Confidential read. The only path that ever serializes a salary.
pub async fn get_salary(
    State(state): State<AppState>,
    AuthCaller(caller): AuthCaller,
    Path(id): Path<EmployeeId>,
) -> AppResult<Json<EmployeeConfidential>> {
    check(&caller, id, EmployeeField::Salary, AccessKind::Read)?;
    let employee = fetch_employee(&state, id).await?;
    let role = RoleRepo::resolve_name(&state.pool, employee.role_id).await?;
    Ok(Json(EmployeeConfidential::from_employee(&employee, role)))
}

/// PUT /api/v1/employees/{id}/salary
pub async fn update_salary(
    State(state): State<AppState>,
    AuthCaller(caller): AuthCaller,
    Path(id): Path<EmployeeId>,
    Json(input): Json<UpdateSalaryRequest>,
) -> AppResult<Json<EmployeeConfidential>> {
    check(&caller, id, EmployeeField::Salary, AccessKind::Write)?;
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    let employee = EmployeeRepo::update_salary(&state.pool, id, input.salary)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Employee",
        })?;

    tracing::info!(
        employee_id = %id,
        caller = %caller_label(&caller),
        "salary updated"
    );

    let role = RoleRepo::resolve_name(&state.pool, employee.role_id).await?;
    Ok(Json(EmployeeConfidential::from_employee(&employee, role)))
}

/// PUT /api/v1/employees/{id}/role
///
/// Dedicated role-change operation; the general profile update never
/// touches the role.
pub async fn update_role(
    State(state): State<AppState>,
    RequireHr(caller): RequireHr,
    Path(id): Path<EmployeeId>,
    Json(input): Json<UpdateRoleRequest>,
) -> AppResult<Json<EmployeeResponse>> {
    let role = input
        .role
        .parse::<Role>()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    let role_row = RoleRepo::find_by_name(&state.pool, role.as_str())
        .await?
        .ok_or_else(|| AppError::InternalError(format!("role '{role}' is not seeded")))?;

    let employee = EmployeeRepo::update_role(&state.pool, id, role_row.id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Employee",
        })?;

    tracing::info!(
        employee_id = %id,
        role = %role,
        caller = %caller_label(&caller),
        "role changed"
    );

    Ok(Json(EmployeeResponse::from_employee(&employee, role_row.name)))
}

/// POST /api/v1/employees/{id}/reset-password
///
/// Admin-only: onboarding accounts are provisioned by HR and occasionally
/// need their credentials reissued.
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAdmin(caller): RequireAdmin,
    Path(id): Path<EmployeeId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password, MIN_PASSWORD_LENGTH)
        .map_err(CoreError::Validation)?;

    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("password hashing failed: {e}")))?;

    let updated = EmployeeRepo::update_password(&state.pool, id, &hashed).await?;
    if !updated {
        return Err(CoreError::NotFound {
            entity: "Employee",
        }
        .into());
    }

    tracing::info!(employee_id = %id, caller = %caller_label(&caller), "password reset");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Run the access rules for one field access, translating denials: hidden
/// targets surface as NotFound, visible-but-denied ones as Forbidden.
fn check(
    caller: &Caller,
    target: EmployeeId,
    field: EmployeeField,
    kind: AccessKind,
) -> Result<(), AppError> {
    access::authorize(caller, target, field, kind).map_err(|denied| match denied {
        Denied::Hidden => CoreError::NotFound {
            entity: "Employee",
        }
        .into(),
        Denied::Forbidden => {
            CoreError::Forbidden("Not permitted for this record".to_string()).into()
        }
    })
}

/// The caller's own employee id. Service credentials have no record.
fn own_employee_id(caller: &Caller) -> Result<EmployeeId, AppError> {
    match caller.subject {
        Subject::Employee(id) => Ok(id),
        Subject::Service(_) => Err(CoreError::Forbidden(
            "Service credentials have no employee profile".to_string(),
        )
        .into()),
    }
}

fn caller_label(caller: &Caller) -> String {
    match &caller.subject {
        Subject::Employee(id) => id.to_string(),
        Subject::Service(name) => name.clone(),
    }
}

async fn fetch_employee(state: &AppState, id: EmployeeId) -> Result<Employee, AppError> {
    EmployeeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            CoreError::NotFound {
                entity: "Employee",
            }
            .into()
        })
}

/// Shared by `update_me` and `update_employee`: authorize, validate, check
/// the email for conflicts, then apply the partial update.
async fn apply_profile_update(
    state: &AppState,
    caller: &Caller,
    target: EmployeeId,
    input: UpdateProfileRequest,
) -> AppResult<Json<EmployeeResponse>> {
    check(caller, target, EmployeeField::Profile, AccessKind::Write)?;
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    if let Some(email) = input.email.as_deref() {
        if let Some(existing) = EmployeeRepo::find_by_email(&state.pool, email).await? {
            if existing.id != target {
                return Err(CoreError::Validation("Email already exists".to_string()).into());
            }
        }
    }

    let employee = EmployeeRepo::update_profile(&state.pool, target, &input.into_dto())
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Employee",
        })?;

    let role = RoleRepo::resolve_name(&state.pool, employee.role_id).await?;
    Ok(Json(EmployeeResponse::from_employee(&employee, role)))
}

/// Resolve role names for a batch of rows without an N+1 on `roles`.
async fn to_responses(
    state: &AppState,
    rows: &[Employee],
) -> Result<Vec<EmployeeResponse>, AppError> {
    let roles = RoleRepo::list(&state.pool).await?;
    Ok(rows
        .iter()
        .map(|e| {
            let role = roles
                .iter()
                .find(|r| r.id == e.role_id)
                .map(|r| r.name.clone())
                .unwrap_or_else(|| "unknown".to_string());
            EmployeeResponse::from_employee(e, role)
        })
        .collect())
}
