//! Practice-session ledger model and DTOs.

use classbum_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full session row from the `session_stats` table. Immutable once written.
///
/// `tasks` is an opaque ordered payload: it is stored and returned verbatim,
/// never reinterpreted by this layer.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SessionStats {
    pub id: DbId,
    pub child_id: Option<DbId>,
    pub child_name: Option<String>,
    pub mode: String,
    pub total_wrong: i32,
    pub total_hints: i32,
    pub total_time_ms: i64,
    pub tasks: serde_json::Value,
    pub created_at: Timestamp,
}

/// DTO for appending a session record.
#[derive(Debug)]
pub struct CreateSessionStats {
    pub child_id: Option<DbId>,
    pub child_name: Option<String>,
    pub mode: String,
    pub total_wrong: i32,
    pub total_hints: i32,
    pub total_time_ms: i64,
    pub tasks: serde_json::Value,
}

/// The slice of a freshly inserted row callers get back.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InsertedSession {
    pub id: DbId,
    pub created_at: Timestamp,
}
