//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod admin;
pub mod rating;
pub mod role;
pub mod session;
pub mod skill;
pub mod status;
pub mod swap_request;
pub mod user;
