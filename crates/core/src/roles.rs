//! Well-known role name constants.
//!
//! These must match the seed data in the `roles` migration. Admin
//! authorization is decided server-side from the role, never from a
//! client-supplied flag.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MEMBER: &str = "member";
