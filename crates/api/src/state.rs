use std::sync::Arc;

use tavolo_providers::ProviderClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: tavolo_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Outbound delivery client shared by all dispatch runs.
    pub providers: Arc<ProviderClient>,
}
