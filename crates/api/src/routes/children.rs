//! Handlers for the child account family: registration, login, own profile,
//! session recording/listing, and the public shareable profile.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use classbum_core::error::CoreError;
use classbum_core::public_id::derive_public_id;
use classbum_core::roles::ROLE_CHILD;
use classbum_core::types::{DbId, Timestamp};
use classbum_db::models::child::{ChildResponse, CreateChild};
use classbum_db::models::session_stats::{CreateSessionStats, SessionStats};
use classbum_db::repositories::{ChildRepo, SessionStatsRepo};

use crate::auth::jwt::issue_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::AuthChild;
use crate::state::AppState;

/// Mode stored when an authenticated session write omits one.
const DEFAULT_MODE: &str = "multiplication";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/children/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterChildRequest {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(rename = "class")]
    pub school_class: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
}

/// Request body for `POST /api/children/login`.
#[derive(Debug, Deserialize)]
pub struct LoginChildRequest {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub password: String,
}

/// Successful authentication response for register and login.
#[derive(Debug, Serialize)]
pub struct ChildAuthResponse {
    pub ok: bool,
    pub token: String,
    pub child: ChildResponse,
}

/// Response for `GET /api/children/me`.
#[derive(Debug, Serialize)]
pub struct ChildMeResponse {
    pub ok: bool,
    pub child: ChildResponse,
}

/// Request body for `POST /api/children/save-session`.
#[derive(Debug, Deserialize)]
pub struct SaveSessionRequest {
    pub mode: Option<String>,
    #[serde(default)]
    pub total_wrong: i32,
    #[serde(default)]
    pub total_hints: i32,
    #[serde(default)]
    pub total_time_ms: i64,
    /// Kept as a raw value so a missing or non-array payload can be
    /// rejected with the domain code instead of a deserialization error.
    pub tasks: Option<serde_json::Value>,
}

/// Response for a successful session write.
#[derive(Debug, Serialize)]
pub struct SavedSessionResponse {
    pub ok: bool,
    pub session_id: DbId,
    pub created_at: Timestamp,
}

/// Response for `GET /api/children/my-sessions`.
#[derive(Debug, Serialize)]
pub struct MySessionsResponse {
    pub ok: bool,
    pub sessions: Vec<SessionStats>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/children/register
///
/// Create a child account. The row is inserted with a public-id placeholder
/// and patched with the derived value before this handler returns, so
/// callers only ever observe the final identifier.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterChildRequest>,
) -> AppResult<Json<ChildAuthResponse>> {
    if input.login.is_empty()
        || input.password.is_empty()
        || input.first_name.is_empty()
        || input.last_name.is_empty()
    {
        return Err(AppError::Core(CoreError::Validation(
            "fill_required_fields",
        )));
    }

    // Fast path for the common case; the uq_children_login constraint is
    // what actually closes the race (mapped back to the same code).
    if ChildRepo::find_by_login(&state.pool, &input.login)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict("login_taken")));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateChild {
        login: input.login,
        password_hash,
        first_name: input.first_name,
        last_name: input.last_name,
        school_class: input.school_class,
        age: input.age,
        gender: input.gender,
    };
    let mut child = ChildRepo::create(&state.pool, &create).await?;

    // The id exists only now, so the public id is a second step.
    let public_id = derive_public_id(child.id);
    ChildRepo::set_public_id(&state.pool, child.id, &public_id).await?;
    child.public_id = public_id;

    let token = issue_token(child.id, ROLE_CHILD, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token issuance error: {e}")))?;

    tracing::info!(child_id = child.id, "Child registered");

    Ok(Json(ChildAuthResponse {
        ok: true,
        token,
        child: child.into(),
    }))
}

/// POST /api/children/login
///
/// Authenticate with login + password. Unknown login and wrong password are
/// reported with distinct codes for this family (unlike the parent family).
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginChildRequest>,
) -> AppResult<Json<ChildAuthResponse>> {
    if input.login.is_empty() || input.password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "empty_login_or_password",
        )));
    }

    let child = ChildRepo::find_by_login(&state.pool, &input.login)
        .await?
        .ok_or(AppError::Core(CoreError::Unauthorized("user_not_found")))?;

    let password_valid = verify_password(&input.password, &child.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized("wrong_password")));
    }

    let token = issue_token(child.id, ROLE_CHILD, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token issuance error: {e}")))?;

    Ok(Json(ChildAuthResponse {
        ok: true,
        token,
        child: child.into(),
    }))
}

/// GET /api/children/me
pub async fn me(
    State(state): State<AppState>,
    child: AuthChild,
) -> AppResult<Json<ChildMeResponse>> {
    let child = ChildRepo::find_by_id(&state.pool, child.child_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "child" }))?;

    Ok(Json(ChildMeResponse {
        ok: true,
        child: child.into(),
    }))
}

/// POST /api/children/save-session
///
/// Append a practice session linked to the authenticated child. The child's
/// current name is captured once as a display snapshot; if that lookup
/// misses, the snapshot is null but the record is still written.
pub async fn save_session(
    State(state): State<AppState>,
    auth: AuthChild,
    Json(input): Json<SaveSessionRequest>,
) -> AppResult<Json<SavedSessionResponse>> {
    let tasks = match input.tasks {
        Some(value) if value.is_array() => value,
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                "tasks_must_be_array",
            )))
        }
    };

    let child_name = ChildRepo::find_by_id(&state.pool, auth.child_id)
        .await?
        .map(|c| c.display_name());

    let create = CreateSessionStats {
        child_id: Some(auth.child_id),
        child_name,
        mode: input.mode.unwrap_or_else(|| DEFAULT_MODE.to_string()),
        total_wrong: input.total_wrong,
        total_hints: input.total_hints,
        total_time_ms: input.total_time_ms,
        tasks,
    };
    let inserted = SessionStatsRepo::create(&state.pool, &create).await?;

    Ok(Json(SavedSessionResponse {
        ok: true,
        session_id: inserted.id,
        created_at: inserted.created_at,
    }))
}

/// GET /api/children/my-sessions
///
/// The authenticated child's 20 most recent sessions, newest first.
pub async fn my_sessions(
    State(state): State<AppState>,
    auth: AuthChild,
) -> AppResult<Json<MySessionsResponse>> {
    let sessions = SessionStatsRepo::list_for_child(&state.pool, auth.child_id).await?;

    Ok(Json(MySessionsResponse { ok: true, sessions }))
}

/// GET /api/child/{public_id}
///
/// Public shareable profile. Never exposes credentials.
pub async fn profile_by_public_id(
    State(state): State<AppState>,
    Path(public_id): Path<String>,
) -> AppResult<Json<ChildResponse>> {
    let child = ChildRepo::find_by_public_id(&state.pool, &public_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "child" }))?;

    Ok(Json(child.into()))
}

// ---------------------------------------------------------------------------
// Routers
// ---------------------------------------------------------------------------

/// Routes mounted at `/api/children`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
        .route("/save-session", post(save_session))
        .route("/my-sessions", get(my_sessions))
}

/// Public profile route mounted at `/api`.
pub fn public_router() -> Router<AppState> {
    Router::new().route("/child/{public_id}", get(profile_by_public_id))
}
