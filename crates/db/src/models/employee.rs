//! Employee entity model and DTOs.

use onboard_core::types::{DbId, EmployeeId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full employee row from the `employees` table.
///
/// Contains the password hash and the salary -- NEVER serialize this to API
/// responses directly. Use [`EmployeeResponse`] for the profile surface and
/// [`EmployeeConfidential`] for the salary path.
#[derive(Debug, Clone, FromRow)]
pub struct Employee {
    pub id: EmployeeId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub job_title: String,
    pub department: String,
    pub role_id: DbId,
    pub salary: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Non-confidential employee representation for API responses.
///
/// Deliberately has no salary field: confidential data is a separate
/// response type, not a nullable field that might slip through.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeResponse {
    pub id: EmployeeId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub job_title: String,
    pub department: String,
    /// Resolved role name (e.g. `"employee"`, `"hr"`).
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl EmployeeResponse {
    pub fn from_employee(employee: &Employee, role: String) -> Self {
        Self {
            id: employee.id,
            username: employee.username.clone(),
            email: employee.email.clone(),
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            phone: employee.phone.clone(),
            job_title: employee.job_title.clone(),
            department: employee.department.clone(),
            role,
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        }
    }
}

/// Employee representation including compensation. Returned only by the
/// salary endpoints, after the access rules have granted a salary read.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeConfidential {
    pub id: EmployeeId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub job_title: String,
    pub department: String,
    pub role: String,
    pub salary: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl EmployeeConfidential {
    pub fn from_employee(employee: &Employee, role: String) -> Self {
        Self {
            id: employee.id,
            username: employee.username.clone(),
            email: employee.email.clone(),
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            phone: employee.phone.clone(),
            job_title: employee.job_title.clone(),
            department: employee.department.clone(),
            role,
            salary: employee.salary,
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        }
    }
}

/// DTO for inserting a new employee.
#[derive(Debug, Deserialize)]
pub struct CreateEmployee {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub job_title: String,
    pub department: String,
    pub role_id: DbId,
}

/// DTO for the non-confidential profile update. All fields are optional;
/// `None` keeps the stored value. Username, role, salary and password have
/// dedicated operations and are absent here on purpose.
#[derive(Debug, Deserialize)]
pub struct UpdateEmployeeProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub job_title: Option<String>,
    pub department: Option<String>,
}
