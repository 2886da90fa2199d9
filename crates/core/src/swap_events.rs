//! Swap lifecycle event name constants.
//!
//! These are the `event_type` values published on the event bus and pushed
//! to WebSocket clients; the frontend switches on them to decide how to
//! refresh its request list.

/// A new request was sent.
pub const EVENT_SWAP_REQUESTED: &str = "swap.requested";

/// The recipient accepted a pending request.
pub const EVENT_SWAP_ACCEPTED: &str = "swap.accepted";

/// The recipient rejected a pending request.
pub const EVENT_SWAP_REJECTED: &str = "swap.rejected";

/// The requester cancelled a pending request.
pub const EVENT_SWAP_CANCELLED: &str = "swap.cancelled";

/// A participant marked an accepted exchange completed.
pub const EVENT_SWAP_COMPLETED: &str = "swap.completed";

/// A participant rated a completed exchange.
pub const EVENT_SWAP_RATED: &str = "swap.rated";
