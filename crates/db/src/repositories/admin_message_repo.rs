//! Repository for the `admin_messages` table.

use skillswap_core::types::DbId;
use sqlx::PgPool;

use crate::models::admin::{AdminMessage, CreateAdminMessage};

/// Column list for `admin_messages` queries.
const COLUMNS: &str = "id, title, content, message_type, is_active, created_by, created_at";

/// Provides CRUD operations for platform-wide messages.
pub struct AdminMessageRepo;

impl AdminMessageRepo {
    /// Publish a new active platform message.
    pub async fn create(
        pool: &PgPool,
        created_by: DbId,
        input: &CreateAdminMessage,
    ) -> Result<AdminMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO admin_messages (title, content, message_type, created_by) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminMessage>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.message_type)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// All messages, newest first (admin view).
    pub async fn list(pool: &PgPool) -> Result<Vec<AdminMessage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admin_messages ORDER BY created_at DESC");
        sqlx::query_as::<_, AdminMessage>(&query).fetch_all(pool).await
    }

    /// Active messages only, newest first (shown to all users).
    pub async fn list_active(pool: &PgPool) -> Result<Vec<AdminMessage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM admin_messages WHERE is_active = true ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, AdminMessage>(&query).fetch_all(pool).await
    }

    /// Deactivate a message. Returns `false` when it does not exist.
    pub async fn deactivate(pool: &PgPool, message_id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE admin_messages SET is_active = false WHERE id = $1")
                .bind(message_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
