//! Role entity model.

use serde::Serialize;
use skillswap_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `roles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Role {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
}
