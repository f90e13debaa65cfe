//! JWT-based auth extractors for the child and parent principals.
//!
//! Both extractors are pure gatekeepers: they resolve a principal from the
//! `Authorization: Bearer <token>` header and perform no business mutation.
//! A rejection short-circuits the handler entirely.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use classbum_core::error::CoreError;
use classbum_core::roles::{ROLE_CHILD, ROLE_PARENT};
use classbum_core::types::DbId;
use classbum_db::models::parent::Parent;
use classbum_db::repositories::ParentRepo;

use crate::auth::jwt::{validate_token, Claims};
use crate::error::AppError;
use crate::state::AppState;

/// Pull the bearer token out of the `Authorization` header.
///
/// Absence of the header or a non-Bearer scheme is `no_token`; everything
/// downstream of this point is `invalid_token` territory.
fn bearer_token<'a>(parts: &'a Parts) -> Result<&'a str, AppError> {
    parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(AppError::Core(CoreError::Unauthorized("no_token")))
}

/// Validate the token, collapsing all failure kinds to `invalid_token`.
fn verified_claims(parts: &Parts, state: &AppState) -> Result<Claims, AppError> {
    let token = bearer_token(parts)?;
    validate_token(token, &state.config.jwt).map_err(|e| {
        tracing::debug!(error = %e, "Token validation failed");
        AppError::Core(CoreError::Unauthorized("invalid_token"))
    })
}

/// Authenticated child extracted from a bearer token.
///
/// Use as an extractor parameter in any handler that requires a child
/// principal:
///
/// ```ignore
/// async fn my_handler(child: AuthChild) -> AppResult<Json<()>> {
///     tracing::info!(child_id = child.child_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthChild {
    /// The child's internal database id (from `claims.sub`).
    pub child_id: DbId,
}

impl FromRequestParts<AppState> for AuthChild {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = verified_claims(parts, state)?;

        if claims.role != ROLE_CHILD {
            return Err(AppError::Core(CoreError::Unauthorized("invalid_token")));
        }

        Ok(AuthChild {
            child_id: claims.sub,
        })
    }
}

/// Authenticated parent extracted from a bearer token.
///
/// Unlike [`AuthChild`], the parent row is re-loaded on every request so a
/// token cannot outlive its account. A well-formed token with the wrong role
/// claim is rejected 403, distinct from a missing or invalid token.
#[derive(Debug, Clone)]
pub struct AuthParent {
    /// The freshly loaded parent row.
    pub parent: Parent,
}

impl FromRequestParts<AppState> for AuthParent {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = verified_claims(parts, state)?;

        if claims.role != ROLE_PARENT {
            return Err(AppError::Core(CoreError::Forbidden));
        }

        let parent = ParentRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or(AppError::Core(CoreError::Unauthorized("invalid_token")))?;

        Ok(AuthParent { parent })
    }
}
