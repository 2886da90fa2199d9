//! Event-to-WebSocket feed routing.
//!
//! [`FeedRouter`] subscribes to the event bus and pushes every swap
//! lifecycle event to the WebSocket connections of both participants. The
//! acting user receives their own echo; clients treat any feed message as a
//! cue to reload their request list, so redundant refreshes are harmless.
//! Feed delivery carries no ordering guarantee relative to the HTTP
//! response of the mutation that produced the event.

use std::sync::Arc;

use axum::extract::ws::Message;
use skillswap_core::types::DbId;
use skillswap_events::SwapEvent;
use tokio::sync::broadcast;

use crate::ws::WsManager;

/// Routes swap events to their participants' WebSocket connections.
pub struct FeedRouter {
    ws_manager: Arc<WsManager>,
}

impl FeedRouter {
    /// Create a new router over the given connection manager.
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the main routing loop.
    ///
    /// Subscribes to the event bus via `receiver` and processes each event.
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](skillswap_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<SwapEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => self.push(&event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Feed router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, feed router shutting down");
                    break;
                }
            }
        }
    }

    /// Push one event to both participants.
    async fn push(&self, event: &SwapEvent) {
        let msg = serde_json::json!({
            "type": "swap_update",
            "event_type": event.event_type,
            "swap_request_id": event.swap_request_id,
            "payload": event.payload,
            "timestamp": event.timestamp,
        });
        let ws_msg = Message::Text(msg.to_string().into());

        for user_id in targets(event) {
            self.ws_manager.send_to_user(user_id, ws_msg.clone()).await;
        }
    }
}

/// Both participants of the event, deduplicated.
fn targets(event: &SwapEvent) -> Vec<DbId> {
    let mut ids: Vec<DbId> = event
        .actor_user_id
        .into_iter()
        .chain(event.recipient_user_id)
        .collect();
    ids.dedup();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_cover_both_participants() {
        let event = SwapEvent::new("swap.accepted").with_actor(1).with_recipient(2);
        assert_eq!(targets(&event), vec![1, 2]);
    }

    #[test]
    fn targets_deduplicate_same_user() {
        let event = SwapEvent::new("swap.accepted").with_actor(1).with_recipient(1);
        assert_eq!(targets(&event), vec![1]);
    }

    #[test]
    fn event_without_participants_has_no_targets() {
        let event = SwapEvent::new("swap.requested");
        assert!(targets(&event).is_empty());
    }
}
