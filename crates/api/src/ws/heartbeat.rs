//! Keepalive for swap-feed WebSocket connections.

use std::sync::Arc;
use std::time::Duration;

use crate::ws::manager::WsManager;

/// Interval between keepalive pings (in seconds).
const HEARTBEAT_INTERVAL_SECS: u64 = 30;

/// Spawn a background task that pings every swap-feed connection on a
/// fixed interval, so proxies and browsers keep otherwise-idle feeds open
/// between lifecycle events.
///
/// The returned `JoinHandle` is aborted during graceful shutdown.
pub fn start_heartbeat(ws_manager: Arc<WsManager>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(HEARTBEAT_INTERVAL_SECS));

        loop {
            interval.tick().await;
            let pinged = ws_manager.ping_all().await;
            if pinged > 0 {
                tracing::debug!(pinged, "Pinged swap-feed connections");
            }
        }
    })
}
