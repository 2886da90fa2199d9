//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the central publish/subscribe hub for [`SwapEvent`]s.
//! It is designed to be shared via `Arc<EventBus>` across the application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skillswap_core::types::DbId;
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// SwapEvent
// ---------------------------------------------------------------------------

/// A swap lifecycle event.
///
/// Constructed via [`SwapEvent::new`] and enriched with the builder methods
/// [`with_swap`](SwapEvent::with_swap), [`with_actor`](SwapEvent::with_actor),
/// [`with_recipient`](SwapEvent::with_recipient), and
/// [`with_payload`](SwapEvent::with_payload). The recipient is the
/// counterpart of the participant whose action produced the event; it
/// addresses the notification relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapEvent {
    /// Dot-separated event name, e.g. `"swap.accepted"`.
    pub event_type: String,

    /// The swap request the event concerns, when there is one.
    pub swap_request_id: Option<DbId>,

    /// The user whose action triggered the event.
    pub actor_user_id: Option<DbId>,

    /// The counterpart that should be notified.
    pub recipient_user_id: Option<DbId>,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl SwapEvent {
    /// Create a new event with only the required `event_type`.
    ///
    /// All optional fields default to `None` / empty object.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            swap_request_id: None,
            actor_user_id: None,
            recipient_user_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Attach the swap request the event concerns.
    pub fn with_swap(mut self, swap_request_id: DbId) -> Self {
        self.swap_request_id = Some(swap_request_id);
        self
    }

    /// Attach the acting user.
    pub fn with_actor(mut self, user_id: DbId) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    /// Attach the counterpart to notify.
    pub fn with_recipient(mut self, user_id: DbId) -> Self {
        self.recipient_user_id = Some(user_id);
        self
    }

    /// Set the JSON payload for the event.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`SwapEvent`].
///
/// # Usage
///
/// ```rust
/// use skillswap_events::bus::{EventBus, SwapEvent};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(SwapEvent::new("swap.requested"));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<SwapEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped;
    /// delivery is best-effort by contract and the triggering operation has
    /// already committed.
    pub fn publish(&self, event: SwapEvent) {
        // Ignore the SendError — it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<SwapEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
