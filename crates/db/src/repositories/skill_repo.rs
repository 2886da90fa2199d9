//! Repository for the `skills` directory table.

use skillswap_core::skill::DEFAULT_CATEGORY;
use skillswap_core::types::DbId;
use sqlx::PgPool;

use crate::models::skill::Skill;

/// Column list for `skills` queries.
const COLUMNS: &str = "id, name, category, created_at";

/// Maps skill names to stable identifiers.
pub struct SkillRepo;

impl SkillRepo {
    /// Case-sensitive lookup that creates the skill with the default
    /// category on first reference.
    ///
    /// Written as an upsert against `uq_skills_name` so two callers racing
    /// on the same new name converge on a single row; the no-op `DO UPDATE`
    /// makes `RETURNING id` yield the existing row on conflict.
    pub async fn resolve_or_create(pool: &PgPool, name: &str) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO skills (name, category) VALUES ($1, $2) \
             ON CONFLICT ON CONSTRAINT uq_skills_name \
             DO UPDATE SET name = skills.name \
             RETURNING id",
        )
        .bind(name)
        .bind(DEFAULT_CATEGORY)
        .fetch_one(pool)
        .await
    }

    /// Pure lookup of a skill ID by exact name.
    pub async fn id_for(pool: &PgPool, name: &str) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM skills WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Fetch a skill row by ID.
    pub async fn find_by_id(pool: &PgPool, skill_id: DbId) -> Result<Option<Skill>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM skills WHERE id = $1");
        sqlx::query_as::<_, Skill>(&query)
            .bind(skill_id)
            .fetch_optional(pool)
            .await
    }
}
