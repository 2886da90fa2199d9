use std::sync::Arc;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: skillswap_db::DbPool,
    /// Server configuration (JWT secrets, timeouts, CORS).
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager for the per-user swap feed.
    pub ws_manager: Arc<WsManager>,
    /// Centralized event bus for publishing swap lifecycle events.
    pub event_bus: Arc<skillswap_events::EventBus>,
}
