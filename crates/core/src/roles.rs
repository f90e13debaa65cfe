//! Well-known role names embedded in token claims.
//!
//! A token is issued for exactly one of these roles; each auth gateway
//! accepts exactly one of them.

pub const ROLE_CHILD: &str = "child";
pub const ROLE_PARENT: &str = "parent";
