//! The action-dispatch ("MCP") surface.
//!
//! A single endpoint accepts a `{action, parameters, context}` envelope and
//! routes it to one of a closed set of read-only directory lookups. The
//! outcome always travels in the response envelope: the HTTP status is 200
//! for every dispatched request, including denials and unknown actions.
//!
//! Authorization is the same [`onboard_core::access`] evaluator the REST
//! handlers use; the envelope is a routing convention, not a trust boundary.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use onboard_core::access::{self, AccessKind, Caller, Denied, EmployeeField, Subject};
use onboard_core::limits::{clamp_limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use onboard_core::types::{EmployeeId, Timestamp};
use onboard_db::models::employee::EmployeeResponse;
use onboard_db::repositories::{EmployeeRepo, RoleRepo};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::middleware::auth::authenticate_headers;
use crate::state::AppState;

/// Service name stamped into every response context.
const SERVICE_NAME: &str = "employee-service";

// ---------------------------------------------------------------------------
// Envelope types
// ---------------------------------------------------------------------------

/// Incoming request envelope.
#[derive(Debug, Deserialize)]
pub struct McpRequest {
    pub action: String,
    /// Raw parameters; deserialized into the per-action struct after the
    /// action name is resolved. An absent key means "no parameters", so
    /// actions whose parameters all have defaults still dispatch.
    #[serde(default = "empty_parameters")]
    pub parameters: serde_json::Value,
    #[serde(default)]
    pub context: Option<RequestContext>,
}

fn empty_parameters() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// Caller-supplied context. Traceability only, never authorization; only
/// the request id is echoed back, other keys are accepted and ignored.
#[derive(Debug, Default, Deserialize)]
pub struct RequestContext {
    pub request_id: Option<String>,
}

/// Context attached to every response: the caller's request id (minted here
/// when absent), this service's name, the current time, and the
/// authenticated subject if there was one.
#[derive(Debug, Serialize)]
pub struct ResponseContext {
    pub service: &'static str,
    pub timestamp: Timestamp,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caller: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct McpError {
    pub code: McpErrorCode,
    pub message: String,
}

/// Error codes carried by the envelope. PascalCase on this surface; the
/// REST surface keeps its own code style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum McpErrorCode {
    AuthenticationRequired,
    Forbidden,
    NotFound,
    ValidationFailed,
    UnsupportedAction,
    InternalError,
}

/// Outgoing response envelope, discriminated by `status`.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum McpResponse {
    Success {
        data: serde_json::Value,
        context: ResponseContext,
    },
    Error {
        error: McpError,
        context: ResponseContext,
    },
}

// ---------------------------------------------------------------------------
// Per-action parameter types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GetEmployeeParams {
    employee_id: EmployeeId,
}

#[derive(Debug, Deserialize)]
struct SearchEmployeesParams {
    name: String,
    limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct ListEmployeesParams {
    limit: Option<i64>,
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// POST /api/v1/mcp
pub async fn dispatch(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<McpRequest>,
) -> Json<McpResponse> {
    let context = response_context(&request, None);

    let caller = match authenticate_headers(&headers, &state.config.jwt) {
        Ok(caller) => caller,
        Err(err) => {
            return Json(McpResponse::Error {
                error: McpError {
                    code: McpErrorCode::AuthenticationRequired,
                    message: err.to_string(),
                },
                context,
            });
        }
    };
    let context = response_context(&request, Some(&caller));

    let outcome = match request.action.as_str() {
        "get_employee" => run_get_employee(&state, &caller, &request.parameters).await,
        "search_employees" => run_search_employees(&state, &caller, &request.parameters).await,
        "list_employees" => run_list_employees(&state, &caller, &request.parameters).await,
        other => Err(McpError {
            code: McpErrorCode::UnsupportedAction,
            message: format!("Unsupported action: {other}"),
        }),
    };

    Json(match outcome {
        Ok(data) => McpResponse::Success { data, context },
        Err(error) => McpResponse::Error { error, context },
    })
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

async fn run_get_employee(
    state: &AppState,
    caller: &Caller,
    parameters: &serde_json::Value,
) -> Result<serde_json::Value, McpError> {
    let params: GetEmployeeParams = parse_params(parameters)?;

    access::authorize(
        caller,
        params.employee_id,
        EmployeeField::Profile,
        AccessKind::Read,
    )
    .map_err(denied_to_mcp)?;

    let employee = EmployeeRepo::find_by_id(&state.pool, params.employee_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| McpError {
            code: McpErrorCode::NotFound,
            message: "Employee not found".to_string(),
        })?;

    let role = RoleRepo::resolve_name(&state.pool, employee.role_id)
        .await
        .map_err(internal)?;

    to_json(&EmployeeResponse::from_employee(&employee, role))
}

async fn run_search_employees(
    state: &AppState,
    caller: &Caller,
    parameters: &serde_json::Value,
) -> Result<serde_json::Value, McpError> {
    let params: SearchEmployeesParams = parse_params(parameters)?;
    require_directory_access(caller)?;

    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let rows = EmployeeRepo::search_by_name(&state.pool, &params.name, limit)
        .await
        .map_err(internal)?;

    rows_to_json(state, &rows).await
}

async fn run_list_employees(
    state: &AppState,
    caller: &Caller,
    parameters: &serde_json::Value,
) -> Result<serde_json::Value, McpError> {
    let params: ListEmployeesParams = parse_params(parameters)?;
    require_directory_access(caller)?;

    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let rows = EmployeeRepo::list(&state.pool, limit)
        .await
        .map_err(internal)?;

    rows_to_json(state, &rows).await
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn response_context(request: &McpRequest, caller: Option<&Caller>) -> ResponseContext {
    let request_id = request
        .context
        .as_ref()
        .and_then(|c| c.request_id.clone())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    ResponseContext {
        service: SERVICE_NAME,
        timestamp: Utc::now(),
        request_id,
        caller: caller.map(|c| match &c.subject {
            Subject::Employee(id) => id.to_string(),
            Subject::Service(name) => name.clone(),
        }),
    }
}

/// Validate the open parameter map into a typed per-action struct.
fn parse_params<T: serde::de::DeserializeOwned>(
    parameters: &serde_json::Value,
) -> Result<T, McpError> {
    serde_json::from_value(parameters.clone()).map_err(|e| McpError {
        code: McpErrorCode::ValidationFailed,
        message: format!("Invalid parameters: {e}"),
    })
}

fn require_directory_access(caller: &Caller) -> Result<(), McpError> {
    if access::can_list_employees(caller) {
        Ok(())
    } else {
        Err(McpError {
            code: McpErrorCode::Forbidden,
            message: "Directory access requires an elevated role".to_string(),
        })
    }
}

fn denied_to_mcp(denied: Denied) -> McpError {
    match denied {
        Denied::Hidden => McpError {
            code: McpErrorCode::NotFound,
            message: "Employee not found".to_string(),
        },
        Denied::Forbidden => McpError {
            code: McpErrorCode::Forbidden,
            message: "Not permitted for this record".to_string(),
        },
    }
}

fn internal(err: sqlx::Error) -> McpError {
    tracing::error!(error = %err, "database error in action dispatch");
    McpError {
        code: McpErrorCode::InternalError,
        message: "An internal error occurred".to_string(),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, McpError> {
    serde_json::to_value(value).map_err(|e| {
        tracing::error!(error = %e, "serialization failure in action dispatch");
        McpError {
            code: McpErrorCode::InternalError,
            message: "An internal error occurred".to_string(),
        }
    })
}

async fn rows_to_json(
    state: &AppState,
    rows: &[onboard_db::models::employee::Employee],
) -> Result<serde_json::Value, McpError> {
    let roles = RoleRepo::list(&state.pool).await.map_err(internal)?;
    let responses: Vec<EmployeeResponse> = rows
        .iter()
        .map(|e| {
            let role = roles
                .iter()
                .find(|r| r.id == e.role_id)
                .map(|r| r.name.clone())
                .unwrap_or_else(|| "unknown".to_string());
            EmployeeResponse::from_employee(e, role)
        })
        .collect();
    to_json(&responses)
}
