//! Admin audit-log and platform-message models and DTOs.

use serde::{Deserialize, Serialize};
use skillswap_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `admin_actions` audit table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminAction {
    pub id: DbId,
    pub admin_id: DbId,
    pub action: String,
    pub target_user_id: Option<DbId>,
    pub reason: Option<String>,
    pub details: serde_json::Value,
    pub created_at: Timestamp,
}

/// A row from the `admin_messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminMessage {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub message_type: String,
    pub is_active: bool,
    pub created_by: DbId,
    pub created_at: Timestamp,
}

/// DTO for publishing a platform message.
#[derive(Debug, Deserialize)]
pub struct CreateAdminMessage {
    pub title: String,
    pub content: String,
    pub message_type: String,
}
