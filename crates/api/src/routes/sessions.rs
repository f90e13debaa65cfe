//! Legacy name-keyed session endpoints.
//!
//! These predate child accounts: the writer supplies a free-text name and
//! no authentication is required. They share the `session_stats` table with
//! the authenticated child endpoints but remain an independent write/read
//! path -- the two are deliberately not reconciled.

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use classbum_core::error::CoreError;
use classbum_db::models::session_stats::{CreateSessionStats, SessionStats};
use classbum_db::repositories::SessionStatsRepo;

use crate::error::{AppError, AppResult};
use crate::routes::children::SavedSessionResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for the legacy `POST /save-session`.
#[derive(Debug, Deserialize)]
pub struct LegacySaveSessionRequest {
    #[serde(default)]
    pub child_name: String,
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub total_wrong: i32,
    #[serde(default)]
    pub total_hints: i32,
    #[serde(default)]
    pub total_time_ms: i64,
    pub tasks: Option<serde_json::Value>,
}

/// Query parameters for `GET /last-session-stats`.
#[derive(Debug, Deserialize)]
pub struct LastSessionQuery {
    pub child_name: Option<String>,
    pub mode: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /save-session
///
/// Anonymous session write keyed by a caller-supplied name. The name is not
/// validated against any account.
pub async fn save_session(
    State(state): State<AppState>,
    Json(input): Json<LegacySaveSessionRequest>,
) -> AppResult<Json<SavedSessionResponse>> {
    let tasks = match input.tasks {
        Some(value) if value.is_array() => value,
        _ => return Err(AppError::Core(CoreError::Validation("missing_fields"))),
    };
    if input.child_name.is_empty() || input.mode.is_empty() {
        return Err(AppError::Core(CoreError::Validation("missing_fields")));
    }

    let create = CreateSessionStats {
        child_id: None,
        child_name: Some(input.child_name),
        mode: input.mode,
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

/// GET /last-session-stats?child_name=&mode=
///
/// The most recent session for a name, optionally filtered by mode.
pub async fn last_session_stats(
    State(state): State<AppState>,
    Query(query): Query<LastSessionQuery>,
) -> AppResult<Json<SessionStats>> {
    let child_name = match query.child_name.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => return Err(AppError::Core(CoreError::Validation("missing_child_name"))),
    };

    // An empty mode parameter means "no filter", same as omitting it.
    let mode = query.mode.as_deref().filter(|m| !m.is_empty());

    let session = SessionStatsRepo::latest_for_name(&state.pool, child_name, mode)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "session" }))?;

    Ok(Json(session))
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Routes mounted at the root level.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/save-session", post(save_session))
        .route("/last-session-stats", get(last_session_stats))
}
