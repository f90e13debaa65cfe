//! Repository for the `session_stats` table.
//!
//! Append and read only: session records are immutable once written, so no
//! update or delete methods exist.

use sqlx::PgPool;

use classbum_core::types::DbId;

use crate::models::session_stats::{CreateSessionStats, InsertedSession, SessionStats};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, child_id, child_name, mode, total_wrong, total_hints, \
                       total_time_ms, tasks, created_at";

/// Maximum rows returned when listing a child's sessions.
const LIST_LIMIT: i64 = 20;

/// Provides append/read operations for practice-session records.
pub struct SessionStatsRepo;

impl SessionStatsRepo {
    /// Append a session record, returning its id and creation timestamp.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSessionStats,
    ) -> Result<InsertedSession, sqlx::Error> {
        sqlx::query_as::<_, InsertedSession>(
            "INSERT INTO session_stats
                (child_id, child_name, mode, total_wrong, total_hints, total_time_ms, tasks)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id, created_at",
        )
        .bind(input.child_id)
        .bind(&input.child_name)
        .bind(&input.mode)
        .bind(input.total_wrong)
        .bind(input.total_hints)
        .bind(input.total_time_ms)
        .bind(&input.tasks)
        .fetch_one(pool)
        .await
    }

    /// The most recent record for a display name, optionally filtered by mode.
    pub async fn latest_for_name(
        pool: &PgPool,
        child_name: &str,
        mode: Option<&str>,
    ) -> Result<Option<SessionStats>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM session_stats
             WHERE child_name = $1
               AND ($2::text IS NULL OR mode = $2::text)
             ORDER BY created_at DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, SessionStats>(&query)
            .bind(child_name)
            .bind(mode)
            .fetch_optional(pool)
            .await
    }

    /// The 20 most recent records for an authenticated child, newest first.
    pub async fn list_for_child(
        pool: &PgPool,
        child_id: DbId,
    ) -> Result<Vec<SessionStats>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM session_stats
             WHERE child_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, SessionStats>(&query)
            .bind(child_id)
            .bind(LIST_LIMIT)
            .fetch_all(pool)
            .await
    }
}
