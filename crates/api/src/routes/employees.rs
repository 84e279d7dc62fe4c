//! Route definitions for the employee directory.
//!
//! Mounted at `/employees` in the API route tree.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::employees;
use crate::state::AppState;

/// Employee routes mounted at `/employees`.
///
/// ```text
/// POST /                        -> register
/// GET  /                        -> list_employees
/// GET  /me                      -> get_me
/// PUT  /me                      -> update_me
/// GET  /{id}                    -> get_employee
/// PUT  /{id}                    -> update_employee
/// GET  /{id}/salary             -> get_salary
/// PUT  /{id}/salary             -> update_salary
/// PUT  /{id}/role               -> update_role
/// POST /{id}/reset-password     -> reset_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(employees::register).get(employees::list_employees),
        )
        .route("/me", get(employees::get_me).put(employees::update_me))
        .route(
            "/{id}",
            get(employees::get_employee).put(employees::update_employee),
        )
        .route(
            "/{id}/salary",
            get(employees::get_salary).put(employees::update_salary),
        )
        .route("/{id}/role", put(employees::update_role))
        .route("/{id}/reset-password", post(employees::reset_password))
}
