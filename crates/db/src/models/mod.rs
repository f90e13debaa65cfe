//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Serialize` response struct that never carries the password hash
//! - A create DTO for inserts

pub mod child;
pub mod parent;
pub mod session_stats;
