//! Pure domain logic for the onboarding portal: role definitions, the
//! employee access rules, and shared constants. Zero internal deps so the
//! API and repository layers (and any future tooling) can all use it.

pub mod access;
pub mod error;
pub mod limits;
pub mod roles;
pub mod types;
