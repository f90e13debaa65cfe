//! Parent entity model and DTOs.

use classbum_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full parent row from the `parents` table.
///
/// Contains the password hash -- NEVER serialize this to API responses.
/// Use [`ParentResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Parent {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub notify_channel: String,
    pub telegram_chat_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe parent representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct ParentResponse {
    pub id: DbId,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub notify_channel: String,
}

impl From<&Parent> for ParentResponse {
    fn from(parent: &Parent) -> Self {
        ParentResponse {
            id: parent.id,
            email: parent.email.clone(),
            name: parent.name.clone(),
            phone: parent.phone.clone(),
            notify_channel: parent.notify_channel.clone(),
        }
    }
}

/// DTO for inserting a new parent (password already hashed).
#[derive(Debug)]
pub struct CreateParent {
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub phone: Option<String>,
}
