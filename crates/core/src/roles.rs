//! The closed set of portal roles.
//!
//! These must match the seed data in `20260815000002_create_roles_table.sql`.

use std::fmt;
use std::str::FromStr;

pub const ROLE_EMPLOYEE: &str = "employee";
pub const ROLE_HR: &str = "hr";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_ADMIN: &str = "admin";

/// Role assigned when a request does not (or may not) choose one.
pub const DEFAULT_ROLE: Role = Role::Employee;

/// A portal role. Every employee holds exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Employee,
    Hr,
    Manager,
    Admin,
}

impl Role {
    /// All roles, in seed order.
    pub const ALL: [Role; 4] = [Role::Employee, Role::Hr, Role::Manager, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => ROLE_EMPLOYEE,
            Role::Hr => ROLE_HR,
            Role::Manager => ROLE_MANAGER,
            Role::Admin => ROLE_ADMIN,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_EMPLOYEE => Ok(Role::Employee),
            ROLE_HR => Ok(Role::Hr),
            ROLE_MANAGER => Ok(Role::Manager),
            ROLE_ADMIN => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
