//! Shareable public identifiers for children.
//!
//! The public id is a pure function of the database-assigned row id, so it
//! can only be computed after the insert. Registration therefore inserts
//! with a placeholder and patches the derived value before returning; the
//! placeholder is never visible to callers.

use crate::types::DbId;

/// Textual prefix for all child public identifiers.
pub const PUBLIC_ID_PREFIX: &str = "id";

/// Placeholder stored between insert and the public-id patch.
pub const PUBLIC_ID_PLACEHOLDER: &str = "temp";

/// Derive the public identifier for a child row id (e.g. `42` -> `"id42"`).
pub fn derive_public_id(id: DbId) -> String {
    format!("{PUBLIC_ID_PREFIX}{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_prefix_plus_id() {
        assert_eq!(derive_public_id(123), "id123");
        assert_eq!(derive_public_id(1), "id1");
    }

    #[test]
    fn derivation_is_idempotent() {
        // Re-deriving for the same id must always yield the same value.
        let first = derive_public_id(987654);
        let second = derive_public_id(987654);
        assert_eq!(first, second);
    }

    #[test]
    fn distinct_ids_never_collide() {
        assert_ne!(derive_public_id(1), derive_public_id(11));
        assert_ne!(derive_public_id(10), derive_public_id(100));
    }
}
