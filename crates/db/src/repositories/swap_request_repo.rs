//! Repository for the `swap_requests` table.
//!
//! Uses the `SwapStatus` enum from `models::status` for all status values.
//! Status changes go through [`SwapRequestRepo::update_status`], which is
//! guarded on the expected current status so a concurrently-modified row is
//! never overwritten.

use skillswap_core::types::DbId;
use sqlx::PgPool;

use crate::models::status::{StatusId, SwapStatus};
use crate::models::swap_request::{CreateSwapRequest, SwapRequest, SwapRequestDetails};

/// Column list for `swap_requests` queries.
const COLUMNS: &str = "\
    id, from_user_id, to_user_id, skill_offered_id, skill_wanted_id, \
    message, status_id, created_at, updated_at";

/// Column list for detail queries joining both profiles and both skills.
const DETAIL_COLUMNS: &str = "\
    sr.id, sr.from_user_id, sr.to_user_id, sr.skill_offered_id, sr.skill_wanted_id, \
    sr.message, sr.status_id, st.name AS status, \
    fu.name AS from_name, fu.profile_photo AS from_photo, fu.location AS from_location, \
    tu.name AS to_name, tu.profile_photo AS to_photo, tu.location AS to_location, \
    so.name AS skill_offered_name, sw.name AS skill_wanted_name, \
    sr.created_at, sr.updated_at";

/// Join clause shared by all detail queries.
const DETAIL_JOINS: &str = "\
    JOIN swap_request_statuses st ON st.id = sr.status_id \
    JOIN users fu ON fu.id = sr.from_user_id \
    JOIN users tu ON tu.id = sr.to_user_id \
    JOIN skills so ON so.id = sr.skill_offered_id \
    JOIN skills sw ON sw.id = sr.skill_wanted_id";

/// Provides CRUD operations for swap requests.
pub struct SwapRequestRepo;

impl SwapRequestRepo {
    /// Insert a new pending request, returning the row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSwapRequest,
    ) -> Result<SwapRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO swap_requests \
                 (from_user_id, to_user_id, skill_offered_id, skill_wanted_id, message, status_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SwapRequest>(&query)
            .bind(input.from_user_id)
            .bind(input.to_user_id)
            .bind(input.skill_offered_id)
            .bind(input.skill_wanted_id)
            .bind(&input.message)
            .bind(SwapStatus::Pending.id())
            .fetch_one(pool)
            .await
    }

    /// Fetch a request by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        request_id: DbId,
    ) -> Result<Option<SwapRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM swap_requests WHERE id = $1");
        sqlx::query_as::<_, SwapRequest>(&query)
            .bind(request_id)
            .fetch_optional(pool)
            .await
    }

    /// All requests a user participates in (either side), newest first,
    /// with both profiles' and both skills' display fields joined in.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<SwapRequestDetails>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM swap_requests sr {DETAIL_JOINS} \
             WHERE sr.from_user_id = $1 OR sr.to_user_id = $1 \
             ORDER BY sr.created_at DESC"
        );
        sqlx::query_as::<_, SwapRequestDetails>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Move a request from an expected status to a new one.
    ///
    /// The update is guarded on the current status: if another participant's
    /// write landed first, zero rows match and `false` is returned, leaving
    /// the stored row untouched.
    pub async fn update_status(
        pool: &PgPool,
        request_id: DbId,
        expected: StatusId,
        target: StatusId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE swap_requests SET status_id = $3, updated_at = NOW() \
             WHERE id = $1 AND status_id = $2",
        )
        .bind(request_id)
        .bind(expected)
        .bind(target)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Hard-delete a request. Only the requester may do this, and only
    /// while the request is still pending. Returns `true` when a row was
    /// removed.
    pub async fn delete_pending(
        pool: &PgPool,
        request_id: DbId,
        requester_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM swap_requests \
             WHERE id = $1 AND from_user_id = $2 AND status_id = $3",
        )
        .bind(request_id)
        .bind(requester_id)
        .bind(SwapStatus::Pending.id())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
