//! Repository for the `children` table.

use sqlx::PgPool;

use classbum_core::types::DbId;

use crate::models::child::{Child, ChildSummary, CreateChild};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, public_id, login, password_hash, first_name, last_name, \
                       class, age, gender, parent_id, is_active, created_at";

/// Provides operations for child accounts.
pub struct ChildRepo;

impl ChildRepo {
    /// Insert a new child with the public-id placeholder, returning the row.
    ///
    /// The caller is expected to follow up with [`Self::set_public_id`] once
    /// the derived identifier is known; both steps complete before the
    /// registration request returns.
    pub async fn create(pool: &PgPool, input: &CreateChild) -> Result<Child, sqlx::Error> {
        let query = format!(
            "INSERT INTO children (public_id, login, password_hash, first_name, last_name, class, age, gender)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Child>(&query)
            .bind(classbum_core::public_id::PUBLIC_ID_PLACEHOLDER)
            .bind(&input.login)
            .bind(&input.password_hash)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.school_class)
            .bind(input.age)
            .bind(&input.gender)
            .fetch_one(pool)
            .await
    }

    /// Patch the derived public id onto a freshly inserted row.
    pub async fn set_public_id(
        pool: &PgPool,
        id: DbId,
        public_id: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE children SET public_id = $2 WHERE id = $1")
            .bind(id)
            .bind(public_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Find a child by internal id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Child>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM children WHERE id = $1");
        sqlx::query_as::<_, Child>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a child by login (case-sensitive).
    pub async fn find_by_login(pool: &PgPool, login: &str) -> Result<Option<Child>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM children WHERE login = $1");
        sqlx::query_as::<_, Child>(&query)
            .bind(login)
            .fetch_optional(pool)
            .await
    }

    /// Find a child by its shareable public id.
    pub async fn find_by_public_id(
        pool: &PgPool,
        public_id: &str,
    ) -> Result<Option<Child>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM children WHERE public_id = $1");
        sqlx::query_as::<_, Child>(&query)
            .bind(public_id)
            .fetch_optional(pool)
            .await
    }

    /// List the children linked to a parent, most recently created first.
    pub async fn list_for_parent(
        pool: &PgPool,
        parent_id: DbId,
    ) -> Result<Vec<ChildSummary>, sqlx::Error> {
        sqlx::query_as::<_, ChildSummary>(
            "SELECT id, first_name, last_name, class AS grade, is_active
             FROM children
             WHERE parent_id = $1
             ORDER BY created_at DESC",
        )
        .bind(parent_id)
        .fetch_all(pool)
        .await
    }
}
