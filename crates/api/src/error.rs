use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use classbum_core::error::CoreError;
use classbum_tutor::TutorError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds transport-specific
/// variants. Implements [`IntoResponse`] to produce the service's uniform
/// `{"ok": false, "error": "<code>"}` JSON error bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `classbum-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A tutor-backend error from `classbum-tutor`.
    #[error(transparent)]
    Tutor(#[from] TutorError),

    /// An internal error with a human-readable message (logged, not leaked).
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // `raw` rides along only for tutor format failures, where the
        // unparseable model reply is diagnostic value for the caller.
        let (status, code, raw) = match &self {
            AppError::Core(core) => (core_status(core), core.code(), None),

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::Tutor(err) => match err {
                TutorError::Format { raw } => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "upstream_format_error",
                    Some(raw.clone()),
                ),
                TutorError::Request(_) | TutorError::Api { .. } => {
                    tracing::error!(error = %err, "Tutor backend failure");
                    (StatusCode::INTERNAL_SERVER_ERROR, "upstream_error", None)
                }
            },

            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "server_error", None)
            }
        };

        let mut body = json!({
            "ok": false,
            "error": code,
        });
        if let Some(raw) = raw {
            body["raw"] = json!(raw);
        }

        (status, axum::Json(body)).into_response()
    }
}

/// HTTP status for a [`CoreError`].
///
/// Conflicts are 409 except `email_in_use`, which the parent registration
/// family has always reported as 400.
fn core_status(core: &CoreError) -> StatusCode {
    match core {
        CoreError::NotFound { .. } => StatusCode::NOT_FOUND,
        CoreError::Validation(_) => StatusCode::BAD_REQUEST,
        CoreError::Conflict("email_in_use") => StatusCode::BAD_REQUEST,
        CoreError::Conflict(_) => StatusCode::CONFLICT,
        CoreError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        CoreError::Forbidden => StatusCode::FORBIDDEN,
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Classify a sqlx error into a status and wire code.
///
/// Unique-constraint violations (PostgreSQL 23505) on the `uq_`-prefixed
/// constraints are the losing side of a registration race and map back to
/// the same domain conflict codes the pre-checks produce. Everything else
/// is logged and answered as a generic server error.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, Option<String>) {
    match err {
        sqlx::Error::RowNotFound => (StatusCode::NOT_FOUND, "not_found", None),
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            match db_err.constraint() {
                Some("uq_children_login") => (StatusCode::CONFLICT, "login_taken", None),
                Some("uq_parents_email") => (StatusCode::BAD_REQUEST, "email_in_use", None),
                other => {
                    tracing::error!(constraint = ?other, "Unexpected unique violation");
                    (StatusCode::INTERNAL_SERVER_ERROR, "server_error", None)
                }
            }
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (StatusCode::INTERNAL_SERVER_ERROR, "server_error", None)
        }
    }
}
