//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod child_repo;
pub mod parent_repo;
pub mod session_stats_repo;

pub use child_repo::ChildRepo;
pub use parent_repo::ParentRepo;
pub use session_stats_repo::SessionStatsRepo;
