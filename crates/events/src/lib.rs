//! Skillswap event bus and notification infrastructure.
//!
//! This crate provides the building blocks for propagating swap lifecycle
//! changes beyond the request that caused them:
//!
//! - [`EventBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`SwapEvent`] — the canonical domain event envelope.
//! - [`NotificationRelay`] — best-effort, at-most-once notification
//!   delivery to the counterpart of each lifecycle change.

pub mod bus;
pub mod relay;

pub use bus::{EventBus, SwapEvent};
pub use relay::NotificationRelay;
