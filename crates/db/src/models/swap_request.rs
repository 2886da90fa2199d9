//! Swap request entity models and DTOs.

use serde::Serialize;
use skillswap_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::status::StatusId;

/// A row from the `swap_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SwapRequest {
    pub id: DbId,
    pub from_user_id: DbId,
    pub to_user_id: DbId,
    pub skill_offered_id: DbId,
    pub skill_wanted_id: DbId,
    pub message: String,
    pub status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A swap request joined with both profiles and both skill names, as
/// returned by the request-list endpoint.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SwapRequestDetails {
    pub id: DbId,
    pub from_user_id: DbId,
    pub to_user_id: DbId,
    pub skill_offered_id: DbId,
    pub skill_wanted_id: DbId,
    pub message: String,
    pub status_id: StatusId,
    /// Status name from the lookup table, e.g. `"pending"`.
    pub status: String,
    pub from_name: String,
    pub from_photo: Option<String>,
    pub from_location: Option<String>,
    pub to_name: String,
    pub to_photo: Option<String>,
    pub to_location: Option<String>,
    pub skill_offered_name: String,
    pub skill_wanted_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new swap request. Skill names have already been
/// resolved to IDs and all preconditions checked by the caller.
#[derive(Debug)]
pub struct CreateSwapRequest {
    pub from_user_id: DbId,
    pub to_user_id: DbId,
    pub skill_offered_id: DbId,
    pub skill_wanted_id: DbId,
    pub message: String,
}
