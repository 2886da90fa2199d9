//! Repository for the `roles` table.

use skillswap_core::types::DbId;
use sqlx::PgPool;

use crate::models::role::Role;

/// Column list for `roles` queries.
const COLUMNS: &str = "id, name, description, created_at";

/// Provides lookups against the seeded role catalogue.
pub struct RoleRepo;

impl RoleRepo {
    /// Resolve a role ID to its name (for JWT claims).
    pub async fn resolve_name(pool: &PgPool, role_id: DbId) -> Result<String, sqlx::Error> {
        sqlx::query_scalar("SELECT name FROM roles WHERE id = $1")
            .bind(role_id)
            .fetch_one(pool)
            .await
    }

    /// Look up a role by its unique name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE name = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }
}
