#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The message deliberately carries no id: hidden records and missing
    /// records must be indistinguishable to the caller.
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
