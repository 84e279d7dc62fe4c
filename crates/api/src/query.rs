//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for the directory list (`?name=&limit=`).
///
/// `name`, when present, filters by case-insensitive substring of the full
/// name. `limit` is clamped by `onboard_core::limits::clamp_limit`.
#[derive(Debug, Deserialize)]
pub struct EmployeeListParams {
    pub name: Option<String>,
    pub limit: Option<i64>,
}
