use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use skillswap_core::types::DbId;

use crate::state::AppState;
use crate::ws::manager::WsManager;

/// Query parameters accepted on the WebSocket upgrade request.
///
/// Browsers cannot set an `Authorization` header on a WebSocket handshake,
/// so the access token is passed as a query parameter instead.
#[derive(Debug, Deserialize)]
pub struct WsQuery {
    pub token: Option<String>,
}

/// HTTP handler that upgrades the connection to WebSocket.
///
/// A valid access token binds the connection to its user so the feed router
/// can address it; an invalid or missing token still upgrades, but the
/// connection receives no feed events.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(query): Query<WsQuery>,
) -> impl IntoResponse {
    let user_id: Option<DbId> = query
        .token
        .as_deref()
        .and_then(|token| state.config.jwt.verify_access_token(token).ok())
        .map(|claims| claims.sub);

    ws.on_upgrade(move |socket| handle_socket(socket, state.ws_manager, user_id))
}

/// Manage a single WebSocket connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the connection with `WsManager`.
///   2. Spawns a sender task that forwards messages from the manager channel.
///   3. Processes inbound messages on the current task.
///   4. Cleans up on disconnect.
async fn handle_socket(socket: WebSocket, ws_manager: Arc<WsManager>, user_id: Option<DbId>) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, user_id = ?user_id, "WebSocket connected");

    // Register and get the receiver for outbound messages.
    let mut rx = ws_manager.add(conn_id.clone(), user_id).await;

    let (mut sink, mut stream) = socket.split();

    // Sender task: forward channel messages to the WebSocket sink.
    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    // Receiver loop: the feed is push-only, so inbound traffic is limited
    // to close frames and pongs.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_msg) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    // Clean up: remove connection and abort sender task.
    ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "WebSocket disconnected");
}
