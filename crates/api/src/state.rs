use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: classbum_db::DbPool,
    /// Server configuration (signing secret, expiry window, timeouts).
    pub config: Arc<ServerConfig>,
    /// Client for the generative tutor backend.
    pub tutor: Arc<classbum_tutor::TutorClient>,
}
