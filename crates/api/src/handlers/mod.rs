//! Request handlers, grouped by surface.

pub mod auth;
pub mod employees;
pub mod mcp;
pub mod service_auth;
