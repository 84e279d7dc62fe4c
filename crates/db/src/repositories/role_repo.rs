//! Repository for the `roles` lookup table.

use onboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::role::Role;

/// Read-only access to the seeded roles. Rows are created by migration,
/// never at runtime.
pub struct RoleRepo;

impl RoleRepo {
    /// Find a role by name (case-sensitive, matches the seeded names).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Role>, sqlx::Error> {
        sqlx::query_as::<_, Role>(
            "SELECT id, name, description, created_at, updated_at FROM roles WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(pool)
        .await
    }

    /// List all roles in seed order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Role>, sqlx::Error> {
        sqlx::query_as::<_, Role>(
            "SELECT id, name, description, created_at, updated_at FROM roles ORDER BY id ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Resolve a role id to its name, returning `"unknown"` for an id that
    /// is not seeded (possible only if the FK was bypassed).
    pub async fn resolve_name(pool: &PgPool, role_id: DbId) -> Result<String, sqlx::Error> {
        let name: Option<String> = sqlx::query_scalar("SELECT name FROM roles WHERE id = $1")
            .bind(role_id)
            .fetch_optional(pool)
            .await?;
        Ok(name.unwrap_or_else(|| "unknown".to_string()))
    }
}
