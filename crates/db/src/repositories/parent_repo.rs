//! Repository for the `parents` table.

use sqlx::PgPool;

use classbum_core::types::DbId;

use crate::models::parent::{CreateParent, Parent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, name, phone, notify_channel, \
                       telegram_chat_id, created_at, updated_at";

/// Provides operations for parent accounts.
pub struct ParentRepo;

impl ParentRepo {
    /// Insert a new parent, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateParent) -> Result<Parent, sqlx::Error> {
        let query = format!(
            "INSERT INTO parents (email, password_hash, name, phone)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Parent>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.name)
            .bind(&input.phone)
            .fetch_one(pool)
            .await
    }

    /// Find a parent by internal id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Parent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM parents WHERE id = $1");
        sqlx::query_as::<_, Parent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a parent by email (case-sensitive, as stored).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Parent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM parents WHERE email = $1");
        sqlx::query_as::<_, Parent>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}
