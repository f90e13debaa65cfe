//! Handlers for the parent account family: registration, login, and the
//! combined profile + children listing.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use classbum_core::error::CoreError;
use classbum_core::roles::ROLE_PARENT;
use classbum_db::models::child::ChildSummary;
use classbum_db::models::parent::{CreateParent, Parent, ParentResponse};
use classbum_db::repositories::{ChildRepo, ParentRepo};

use crate::auth::jwt::issue_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::AuthParent;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register-parent`.
#[derive(Debug, Deserialize)]
pub struct RegisterParentRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Request body for `POST /auth/login-parent`.
#[derive(Debug, Deserialize)]
pub struct LoginParentRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Successful authentication response for register and login.
#[derive(Debug, Serialize)]
pub struct ParentAuthResponse {
    pub parent: ParentResponse,
    pub token: String,
}

/// Response for `GET /auth/me`.
#[derive(Debug, Serialize)]
pub struct ParentMeResponse {
    pub parent: ParentResponse,
    pub children: Vec<ChildSummary>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn auth_response(state: &AppState, parent: &Parent) -> AppResult<ParentAuthResponse> {
    let token = issue_token(parent.id, ROLE_PARENT, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token issuance error: {e}")))?;

    Ok(ParentAuthResponse {
        parent: parent.into(),
        token,
    })
}

/// POST /auth/register-parent
pub async fn register_parent(
    State(state): State<AppState>,
    Json(input): Json<RegisterParentRequest>,
) -> AppResult<Json<ParentAuthResponse>> {
    if input.email.is_empty() || input.password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "missing_email_or_password",
        )));
    }

    // Optimization only; uq_parents_email closes the race.
    if ParentRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict("email_in_use")));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateParent {
        email: input.email,
        password_hash,
        name: input.name,
        phone: input.phone,
    };
    let parent = ParentRepo::create(&state.pool, &create).await?;

    tracing::info!(parent_id = parent.id, "Parent registered");

    Ok(Json(auth_response(&state, &parent)?))
}

/// POST /auth/login-parent
///
/// Unknown email and wrong password produce byte-identical responses --
/// this endpoint must not leak which of the two failed.
pub async fn login_parent(
    State(state): State<AppState>,
    Json(input): Json<LoginParentRequest>,
) -> AppResult<Json<ParentAuthResponse>> {
    if input.email.is_empty() || input.password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "missing_email_or_password",
        )));
    }

    let parent = ParentRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or(AppError::Core(CoreError::Unauthorized(
            "invalid_credentials",
        )))?;

    let password_valid = verify_password(&input.password, &parent.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "invalid_credentials",
        )));
    }

    Ok(Json(auth_response(&state, &parent)?))
}

/// GET /auth/me
///
/// The authenticated parent's profile plus their children, newest first.
pub async fn me(State(state): State<AppState>, auth: AuthParent) -> AppResult<Json<ParentMeResponse>> {
    let children = ChildRepo::list_for_parent(&state.pool, auth.parent.id).await?;

    Ok(Json(ParentMeResponse {
        parent: (&auth.parent).into(),
        children,
    }))
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Routes mounted at `/auth`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register-parent", post(register_parent))
        .route("/login-parent", post(login_parent))
        .route("/me", get(me))
}
