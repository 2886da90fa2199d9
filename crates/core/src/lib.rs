//! Domain logic for the skillswap backend.
//!
//! This crate has zero internal dependencies so it can be used by the
//! repository layer, the API server, and any future worker or CLI tooling.
//! It holds the error taxonomy, the swap-request lifecycle state machine,
//! and the validation rules for skills, messages, and ratings.

pub mod error;
pub mod moderation;
pub mod rating;
pub mod roles;
pub mod skill;
pub mod swap_events;
pub mod swap_lifecycle;
pub mod types;
