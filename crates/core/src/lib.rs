//! Shared domain types for the Classbum multiplication backend.
//!
//! - [`types`] -- database id and timestamp aliases.
//! - [`roles`] -- well-known principal role names.
//! - [`error`] -- the domain error taxonomy.
//! - [`public_id`] -- derivation of shareable child identifiers.

pub mod error;
pub mod public_id;
pub mod roles;
pub mod types;
