use std::sync::Arc;

use roster_export::DocumentRenderer;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: roster_db::DbPool,
    /// Server configuration (session secret, cookie flags, timeouts).
    pub config: Arc<ServerConfig>,
    /// Profile renderer used by the export route.
    pub renderer: DocumentRenderer,
}
