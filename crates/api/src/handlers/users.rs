//! Handlers for the `/users` resource: browse, own profile, public profiles.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use skillswap_core::error::CoreError;
use skillswap_core::skill::Direction;
use skillswap_core::types::DbId;
use skillswap_db::models::skill::SkillSet;
use skillswap_db::models::user::{Profile, UpdateProfile};
use skillswap_db::repositories::{UserRepo, UserSkillRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// A profile combined with the user's offered and wanted skill names.
#[derive(Debug, Serialize)]
pub struct ProfileWithSkills {
    #[serde(flatten)]
    pub profile: Profile,
    pub skills: SkillSet,
}

// ---------------------------------------------------------------------------
// Browse
// ---------------------------------------------------------------------------

/// GET /api/v1/users
///
/// List all public, non-banned users with their skills, newest first.
pub async fn browse(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<DataResponse<Vec<ProfileWithSkills>>> {
    let profiles = UserRepo::list_public(&state.pool).await?;

    let ids: Vec<DbId> = profiles.iter().map(|p| p.id).collect();
    let entries = UserSkillRepo::list_named_for_users(&state.pool, &ids).await?;

    // Group skill entries by user, preserving profile order.
    let mut by_user: HashMap<DbId, SkillSet> = HashMap::new();
    for entry in entries {
        let set = by_user.entry(entry.user_id).or_default();
        if entry.direction == Direction::Offered.as_str() {
            set.offered.push(entry.skill_name);
        } else {
            set.wanted.push(entry.skill_name);
        }
    }

    let users = profiles
        .into_iter()
        .map(|profile| {
            let skills = by_user.remove(&profile.id).unwrap_or_default();
            ProfileWithSkills { profile, skills }
        })
        .collect();

    Ok(DataResponse::new(users))
}

// ---------------------------------------------------------------------------
// Own profile
// ---------------------------------------------------------------------------

/// GET /api/v1/users/me
///
/// The authenticated user's own profile with skills.
pub async fn get_me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<DataResponse<ProfileWithSkills>> {
    let profile = UserRepo::find_profile(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    let skills = UserSkillRepo::list_for(&state.pool, auth.user_id).await?;

    Ok(DataResponse::new(ProfileWithSkills { profile, skills }))
}

/// PUT /api/v1/users/me
///
/// Patch the authenticated user's profile. Absent fields stay unchanged.
pub async fn update_me(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<DataResponse<Profile>> {
    if let Some(name) = &input.name {
        if name.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Name must not be empty".to_string(),
            )));
        }
    }
    if let Some(availability) = &input.availability {
        if !availability.is_array() {
            return Err(AppError::Core(CoreError::Validation(
                "Availability must be an array of labels".to_string(),
            )));
        }
    }

    let profile = UserRepo::update_profile(&state.pool, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    Ok(DataResponse::new(profile))
}

// ---------------------------------------------------------------------------
// Public profiles
// ---------------------------------------------------------------------------

/// GET /api/v1/users/{id}
///
/// A single user's profile with skills. Private and banned profiles are
/// visible only to their owner.
pub async fn get_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<DataResponse<ProfileWithSkills>> {
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: user_id,
        })?;

    // A hidden profile looks identical to a missing one from the outside.
    if (user.is_banned || !user.is_public) && auth.user_id != user_id {
        return Err(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }
        .into());
    }

    let profile = UserRepo::find_profile(&state.pool, user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: user_id,
        })?;
    let skills = UserSkillRepo::list_for(&state.pool, user_id).await?;

    Ok(DataResponse::new(ProfileWithSkills { profile, skills }))
}
