//! Real-time swap feed over WebSocket.

pub mod router;

pub use router::FeedRouter;
