//! Repository for the `user_skills` table.

use skillswap_core::skill::Direction;
use skillswap_core::types::DbId;
use sqlx::PgPool;

use crate::models::skill::{SkillSet, UserSkillNamed};

/// Provides CRUD operations for per-user skill listings.
pub struct UserSkillRepo;

impl UserSkillRepo {
    /// Add a (skill, direction) entry for a user.
    ///
    /// Idempotent: adding an entry that already exists is a no-op.
    /// Returns `true` when a new row was inserted.
    pub async fn add(
        pool: &PgPool,
        user_id: DbId,
        skill_id: DbId,
        direction: Direction,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO user_skills (user_id, skill_id, direction) \
             VALUES ($1, $2, $3) \
             ON CONFLICT ON CONSTRAINT uq_user_skills_entry DO NOTHING",
        )
        .bind(user_id)
        .bind(skill_id)
        .bind(direction.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a (skill, direction) entry for a user.
    ///
    /// A missing entry is a no-op, not an error. Returns `true` when a row
    /// was deleted.
    pub async fn remove(
        pool: &PgPool,
        user_id: DbId,
        skill_id: DbId,
        direction: Direction,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM user_skills WHERE user_id = $1 AND skill_id = $2 AND direction = $3",
        )
        .bind(user_id)
        .bind(skill_id)
        .bind(direction.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// A user's offered and wanted skill names.
    pub async fn list_for(pool: &PgPool, user_id: DbId) -> Result<SkillSet, sqlx::Error> {
        let rows: Vec<(String, String)> = sqlx::query_as(
            "SELECT s.name, us.direction FROM user_skills us \
             JOIN skills s ON s.id = us.skill_id \
             WHERE us.user_id = $1 \
             ORDER BY s.name",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        let mut set = SkillSet::default();
        for (name, direction) in rows {
            if direction == Direction::Offered.as_str() {
                set.offered.push(name);
            } else {
                set.wanted.push(name);
            }
        }
        Ok(set)
    }

    /// Named entries for a set of users, for assembling browse views.
    pub async fn list_named_for_users(
        pool: &PgPool,
        user_ids: &[DbId],
    ) -> Result<Vec<UserSkillNamed>, sqlx::Error> {
        sqlx::query_as::<_, UserSkillNamed>(
            "SELECT us.user_id, s.name AS skill_name, us.direction \
             FROM user_skills us \
             JOIN skills s ON s.id = us.skill_id \
             WHERE us.user_id = ANY($1) \
             ORDER BY s.name",
        )
        .bind(user_ids)
        .fetch_all(pool)
        .await
    }

    /// Whether the user currently lists the skill in the given direction.
    pub async fn has_entry(
        pool: &PgPool,
        user_id: DbId,
        skill_id: DbId,
        direction: Direction,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS( \
                 SELECT 1 FROM user_skills \
                 WHERE user_id = $1 AND skill_id = $2 AND direction = $3)",
        )
        .bind(user_id)
        .bind(skill_id)
        .bind(direction.as_str())
        .fetch_one(pool)
        .await
    }
}
