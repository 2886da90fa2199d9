//! Rating entity models and DTOs.

use serde::Serialize;
use skillswap_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `ratings` table. Immutable once created.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Rating {
    pub id: DbId,
    pub swap_request_id: DbId,
    pub from_user_id: DbId,
    pub to_user_id: DbId,
    pub rating: i16,
    pub feedback: Option<String>,
    pub created_at: Timestamp,
}

/// A rating joined with the rater's display name and photo.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RatingDetails {
    pub id: DbId,
    pub swap_request_id: DbId,
    pub from_user_id: DbId,
    pub to_user_id: DbId,
    pub rating: i16,
    pub feedback: Option<String>,
    pub from_name: String,
    pub from_photo: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for inserting a rating. The recipient has already been inferred as
/// the other participant of the completed swap.
#[derive(Debug)]
pub struct CreateRating {
    pub swap_request_id: DbId,
    pub from_user_id: DbId,
    pub to_user_id: DbId,
    pub rating: i16,
    pub feedback: Option<String>,
}
