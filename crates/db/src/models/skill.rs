//! Skill directory and per-user listing models.

use serde::Serialize;
use skillswap_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `skills` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Skill {
    pub id: DbId,
    pub name: String,
    pub category: String,
    pub created_at: Timestamp,
}

/// A row from the `user_skills` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSkill {
    pub id: DbId,
    pub user_id: DbId,
    pub skill_id: DbId,
    /// `"offered"` or `"wanted"`.
    pub direction: String,
    pub created_at: Timestamp,
}

/// A user-skill entry joined with its skill name, used for browse views.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSkillNamed {
    pub user_id: DbId,
    pub skill_name: String,
    pub direction: String,
}

/// A user's skill names grouped by direction.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SkillSet {
    pub offered: Vec<String>,
    pub wanted: Vec<String>,
}
