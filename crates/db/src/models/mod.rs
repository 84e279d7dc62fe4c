//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - `Serialize` response shapes safe for external output
//! - DTOs for inserts and partial updates

pub mod employee;
pub mod role;
