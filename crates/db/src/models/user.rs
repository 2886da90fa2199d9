//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use skillswap_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`Profile`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub location: Option<String>,
    pub profile_photo: Option<String>,
    /// JSON array of availability labels, e.g. `["Weekends", "Evenings"]`.
    pub availability: serde_json::Value,
    pub is_public: bool,
    pub is_banned: bool,
    pub role_id: DbId,
    /// Running average of received ratings; 0 until first rated.
    pub rating: f64,
    pub total_swaps: i32,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public marketplace profile (no credentials, no moderation counters).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub name: String,
    pub location: Option<String>,
    pub profile_photo: Option<String>,
    pub availability: serde_json::Value,
    pub is_public: bool,
    pub rating: f64,
    pub total_swaps: i32,
    pub created_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role_id: DbId,
}

/// DTO for updating a profile. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub location: Option<String>,
    pub profile_photo: Option<String>,
    pub availability: Option<serde_json::Value>,
    pub is_public: Option<bool>,
}
