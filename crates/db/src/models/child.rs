//! Child entity model and DTOs.

use classbum_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full child row from the `children` table.
///
/// Contains the password hash -- NEVER serialize this to API responses.
/// Use [`ChildResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Child {
    pub id: DbId,
    pub public_id: String,
    pub login: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    #[sqlx(rename = "class")]
    pub school_class: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub parent_id: Option<DbId>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl Child {
    /// The write-time name snapshot stored on session records.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Safe child representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct ChildResponse {
    pub id: DbId,
    pub public_id: String,
    pub login: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(rename = "class")]
    pub school_class: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub created_at: Timestamp,
}

impl From<Child> for ChildResponse {
    fn from(child: Child) -> Self {
        ChildResponse {
            id: child.id,
            public_id: child.public_id,
            login: child.login,
            first_name: child.first_name,
            last_name: child.last_name,
            school_class: child.school_class,
            age: child.age,
            gender: child.gender,
            created_at: child.created_at,
        }
    }
}

/// DTO for inserting a new child. The password is already hashed by the
/// caller; this layer never sees plaintext credentials.
#[derive(Debug)]
pub struct CreateChild {
    pub login: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub school_class: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
}

/// Compact child row returned to a parent listing their children.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChildSummary {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub grade: Option<String>,
    pub is_active: bool,
}
