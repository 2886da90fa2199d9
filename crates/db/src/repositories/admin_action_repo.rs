//! Repository for the `admin_actions` audit table.

use skillswap_core::types::DbId;
use sqlx::PgPool;

/// Append-only audit log of administrator operations.
pub struct AdminActionRepo;

impl AdminActionRepo {
    /// Record an admin action, returning the generated ID.
    pub async fn log(
        pool: &PgPool,
        admin_id: DbId,
        action: &str,
        target_user_id: Option<DbId>,
        reason: Option<&str>,
        details: &serde_json::Value,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO admin_actions (admin_id, action, target_user_id, reason, details) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(admin_id)
        .bind(action)
        .bind(target_user_id)
        .bind(reason)
        .bind(details)
        .fetch_one(pool)
        .await
    }
}
