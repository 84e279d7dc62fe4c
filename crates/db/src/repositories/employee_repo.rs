//! Repository for the `employees` table.

use onboard_core::types::{DbId, EmployeeId};
use sqlx::PgPool;

use crate::models::employee::{CreateEmployee, Employee, UpdateEmployeeProfile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, first_name, last_name, \
                        phone, job_title, department, role_id, salary, created_at, updated_at";

/// Provides CRUD operations for employees. There is no delete: records are
/// permanent once onboarded.
pub struct EmployeeRepo;

impl EmployeeRepo {
    /// Insert a new employee, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateEmployee) -> Result<Employee, sqlx::Error> {
        let query = format!(
            "INSERT INTO employees
                (username, email, password_hash, first_name, last_name,
                 phone, job_title, department, role_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.phone)
            .bind(&input.job_title)
            .bind(&input.department)
            .bind(input.role_id)
            .fetch_one(pool)
            .await
    }

    /// Find an employee by id.
    pub async fn find_by_id(pool: &PgPool, id: EmployeeId) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE id = $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an employee by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE username = $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Find an employee by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE email = $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List employees, newest first, with an id tiebreak so equal
    /// timestamps still order deterministically.
    pub async fn list(pool: &PgPool, limit: i64) -> Result<Vec<Employee>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM employees ORDER BY created_at DESC, id LIMIT $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive substring search over the full name.
    ///
    /// The term is wrapped in `%` but otherwise not escaped, so LIKE
    /// metacharacters in the term act as wildcards (`"%"` matches every
    /// employee). Same ordering as [`Self::list`].
    pub async fn search_by_name(
        pool: &PgPool,
        name: &str,
        limit: i64,
    ) -> Result<Vec<Employee>, sqlx::Error> {
        let pattern = format!("%{name}%");
        let query = format!(
            "SELECT {COLUMNS} FROM employees
             WHERE (first_name || ' ' || last_name) ILIKE $1
             ORDER BY created_at DESC, id
             LIMIT $2"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(&pattern)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial profile update. Only non-`None` fields in `input`
    /// are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: EmployeeId,
        input: &UpdateEmployeeProfile,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!(
            "UPDATE employees SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                job_title = COALESCE($6, job_title),
                department = COALESCE($7, department)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.job_title)
            .bind(&input.department)
            .fetch_optional(pool)
            .await
    }

    /// Set an employee's salary. Returns `None` if the row does not exist.
    pub async fn update_salary(
        pool: &PgPool,
        id: EmployeeId,
        salary: f64,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!(
            "UPDATE employees SET salary = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .bind(salary)
            .fetch_optional(pool)
            .await
    }

    /// Reassign an employee's role. Returns `None` if the row does not exist.
    pub async fn update_role(
        pool: &PgPool,
        id: EmployeeId,
        role_id: DbId,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!(
            "UPDATE employees SET role_id = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .bind(role_id)
            .fetch_optional(pool)
            .await
    }

    /// Replace an employee's password hash. Returns `true` if a row was
    /// updated.
    pub async fn update_password(
        pool: &PgPool,
        id: EmployeeId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE employees SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
