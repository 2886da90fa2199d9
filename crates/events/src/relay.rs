//! Best-effort notification delivery.
//!
//! [`NotificationRelay`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! broadcast channel and dispatches a notification to the counterpart of
//! each swap lifecycle event. Delivery is at-most-once and fire-and-forget:
//! a push/email provider is not wired up, so dispatch is a structured log
//! line, and a failed or dropped delivery never affects the operation that
//! published the event. Do not upgrade this to at-least-once without adding
//! idempotency keys downstream.

use skillswap_core::swap_events::{
    EVENT_SWAP_ACCEPTED, EVENT_SWAP_CANCELLED, EVENT_SWAP_COMPLETED, EVENT_SWAP_RATED,
    EVENT_SWAP_REJECTED, EVENT_SWAP_REQUESTED,
};
use skillswap_core::types::DbId;
use tokio::sync::broadcast;

use crate::bus::SwapEvent;

/// Background service that notifies counterparts of lifecycle events.
pub struct NotificationRelay;

impl NotificationRelay {
    /// Run the relay loop.
    ///
    /// Subscribes to the event bus via the provided `receiver` and
    /// dispatches a notification for every event that names a recipient.
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](crate::bus::EventBus) is dropped).
    pub async fn run(mut receiver: broadcast::Receiver<SwapEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => Self::dispatch(&event),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification relay lagged, events were dropped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification relay shutting down");
                    break;
                }
            }
        }
    }

    /// Dispatch a single event to its recipient, if it has one.
    fn dispatch(event: &SwapEvent) {
        let Some(recipient) = event.recipient_user_id else {
            return;
        };
        let (title, body) = describe(event);
        notify(recipient, &event.event_type, &title, &body);
    }
}

/// Send a notification to a user.
///
/// At-most-once, best-effort: dispatch is recorded in the log and nothing
/// is retried or acknowledged.
pub fn notify(to_user_id: DbId, event_type: &str, title: &str, body: &str) {
    tracing::info!(to_user_id, event_type, title, body, "Notification dispatched");
}

/// Human-readable title and body for an event.
///
/// Skill names are included when the publisher put them in the payload.
fn describe(event: &SwapEvent) -> (String, String) {
    let offered = payload_str(event, "skill_offered");
    let wanted = payload_str(event, "skill_wanted");
    let exchange = match (offered, wanted) {
        (Some(o), Some(w)) => format!("{o} for {w}"),
        _ => "a skill exchange".to_string(),
    };

    match event.event_type.as_str() {
        EVENT_SWAP_REQUESTED => (
            "New swap request".to_string(),
            format!("You have received a new swap request: {exchange}"),
        ),
        EVENT_SWAP_ACCEPTED => (
            "Swap request accepted".to_string(),
            format!("Your swap request was accepted: {exchange}"),
        ),
        EVENT_SWAP_REJECTED => (
            "Swap request declined".to_string(),
            format!("Your swap request was declined: {exchange}"),
        ),
        EVENT_SWAP_CANCELLED => (
            "Swap request cancelled".to_string(),
            format!("A swap request sent to you was cancelled: {exchange}"),
        ),
        EVENT_SWAP_COMPLETED => (
            "Swap completed".to_string(),
            format!("Your exchange was marked completed: {exchange}"),
        ),
        EVENT_SWAP_RATED => (
            "You received a rating".to_string(),
            "A participant rated your completed exchange".to_string(),
        ),
        other => (other.to_string(), String::new()),
    }
}

fn payload_str<'a>(event: &'a SwapEvent, key: &str) -> Option<&'a str> {
    event.payload.get(key).and_then(|v| v.as_str())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
