//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod employee_repo;
pub mod role_repo;

pub use employee_repo::EmployeeRepo;
pub use role_repo::RoleRepo;
