use std::sync::Arc;

use lumen_gateway::GatewayClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool and the gateway client are reference-counted
/// internally and the config sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: lumen_db::DbPool,
    /// Server configuration (JWT settings, credit defaults).
    pub config: Arc<ServerConfig>,
    /// Client for the upstream generation gateway.
    pub gateway: GatewayClient,
}
