//! Handlers for the authenticated user's skill listings.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use skillswap_core::skill::{validate_skill_name, Direction};
use skillswap_db::models::skill::SkillSet;
use skillswap_db::repositories::{SkillRepo, UserSkillRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for adding or removing a skill entry.
#[derive(Debug, Deserialize)]
pub struct SkillEntryBody {
    pub name: String,
    pub direction: Direction,
}

/// GET /api/v1/users/me/skills
///
/// The authenticated user's offered and wanted skill names.
pub async fn list_skills(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<DataResponse<SkillSet>> {
    let skills = UserSkillRepo::list_for(&state.pool, auth.user_id).await?;
    Ok(DataResponse::new(skills))
}

/// POST /api/v1/users/me/skills
///
/// Add a (skill, direction) entry. The skill is created in the directory on
/// first reference; re-adding an existing entry is a no-op. Returns the
/// updated skill set.
pub async fn add_skill(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SkillEntryBody>,
) -> AppResult<(StatusCode, DataResponse<SkillSet>)> {
    validate_skill_name(&input.name)?;

    let skill_id = SkillRepo::resolve_or_create(&state.pool, &input.name).await?;
    let inserted = UserSkillRepo::add(&state.pool, auth.user_id, skill_id, input.direction).await?;

    let skills = UserSkillRepo::list_for(&state.pool, auth.user_id).await?;
    let status = if inserted {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, DataResponse::new(skills)))
}

/// DELETE /api/v1/users/me/skills
///
/// Remove a (skill, direction) entry. Removing an entry that does not exist
/// (or naming an unknown skill) is a no-op, not an error. Returns the
/// updated skill set.
pub async fn remove_skill(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SkillEntryBody>,
) -> AppResult<DataResponse<SkillSet>> {
    if let Some(skill_id) = SkillRepo::id_for(&state.pool, &input.name).await? {
        UserSkillRepo::remove(&state.pool, auth.user_id, skill_id, input.direction).await?;
    }

    let skills = UserSkillRepo::list_for(&state.pool, auth.user_id).await?;
    Ok(DataResponse::new(skills))
}
