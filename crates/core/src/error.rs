//! Domain error taxonomy.
//!
//! The `&'static str` payloads are wire error codes (e.g. `"login_taken"`),
//! serialized verbatim into the `error` field of JSON error bodies. Only
//! [`CoreError::Internal`] carries free-form detail, and that detail is
//! logged rather than sent to the client.

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("validation failed: {0}")]
    Validation(&'static str),

    #[error("conflict: {0}")]
    Conflict(&'static str),

    #[error("unauthorized: {0}")]
    Unauthorized(&'static str),

    #[error("forbidden")]
    Forbidden,

    #[error("internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The machine-readable code sent to clients.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::NotFound { .. } => "not_found",
            CoreError::Validation(code) => code,
            CoreError::Conflict(code) => code,
            CoreError::Unauthorized(code) => code,
            CoreError::Forbidden => "forbidden",
            CoreError::Internal(_) => "server_error",
        }
    }
}
