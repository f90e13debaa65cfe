//! Auth gateways: extractor-based principal resolution.

pub mod auth;

pub use auth::{AuthChild, AuthParent};
