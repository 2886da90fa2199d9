//! Handlers for the `/admin` surface: user moderation and platform messages.
//!
//! All endpoints except the active-message listing require the admin role.
//! Every moderation operation is recorded in the `admin_actions` audit
//! table; a failed audit write is logged but never fails the operation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use skillswap_core::error::CoreError;
use skillswap_core::moderation::{
    validate_message_type, ACTION_BAN_USER, ACTION_SEND_MESSAGE, ACTION_UNBAN_USER,
};
use skillswap_core::types::DbId;
use skillswap_db::models::admin::{AdminMessage, CreateAdminMessage};
use skillswap_db::repositories::{AdminActionRepo, AdminMessageRepo, UserRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /admin/users/{id}/ban`.
#[derive(Debug, Deserialize)]
pub struct BanRequest {
    pub reason: String,
}

// ---------------------------------------------------------------------------
// User moderation
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/users/{id}/ban
///
/// Ban a user. Banned users are hidden from browse and cannot send swap
/// requests. Returns 204 No Content.
pub async fn ban_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Json(input): Json<BanRequest>,
) -> AppResult<StatusCode> {
    if input.reason.trim().is_empty() {
        return Err(CoreError::Validation("A ban reason is required".to_string()).into());
    }

    let found = UserRepo::set_banned(&state.pool, user_id, true).await?;
    if !found {
        return Err(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }
        .into());
    }

    log_action(
        &state,
        admin.user_id,
        ACTION_BAN_USER,
        Some(user_id),
        Some(&input.reason),
        serde_json::json!({}),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/users/{id}/unban
///
/// Lift a ban. Returns 204 No Content.
pub async fn unban_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let found = UserRepo::set_banned(&state.pool, user_id, false).await?;
    if !found {
        return Err(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }
        .into());
    }

    log_action(
        &state,
        admin.user_id,
        ACTION_UNBAN_USER,
        Some(user_id),
        None,
        serde_json::json!({}),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Platform messages
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/messages
///
/// Publish a platform-wide message banner.
pub async fn create_message(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateAdminMessage>,
) -> AppResult<(StatusCode, DataResponse<AdminMessage>)> {
    validate_message_type(&input.message_type).map_err(CoreError::Validation)?;
    if input.title.trim().is_empty() || input.content.trim().is_empty() {
        return Err(
            CoreError::Validation("Title and content are required".to_string()).into(),
        );
    }

    let message = AdminMessageRepo::create(&state.pool, admin.user_id, &input).await?;

    log_action(
        &state,
        admin.user_id,
        ACTION_SEND_MESSAGE,
        None,
        None,
        serde_json::json!({
            "title": message.title,
            "message_type": message.message_type,
        }),
    )
    .await;

    Ok((StatusCode::CREATED, DataResponse::new(message)))
}

/// GET /api/v1/admin/messages
///
/// All platform messages, active or not, newest first.
pub async fn list_messages(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<DataResponse<Vec<AdminMessage>>> {
    let messages = AdminMessageRepo::list(&state.pool).await?;
    Ok(DataResponse::new(messages))
}

/// POST /api/v1/admin/messages/{id}/deactivate
///
/// Take a platform message down. Returns 204 No Content.
pub async fn deactivate_message(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(message_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let found = AdminMessageRepo::deactivate(&state.pool, message_id).await?;
    if !found {
        return Err(CoreError::NotFound {
            entity: "AdminMessage",
            id: message_id,
        }
        .into());
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/platform-messages
///
/// Active platform messages, visible to any authenticated user.
pub async fn list_active_messages(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<DataResponse<Vec<AdminMessage>>> {
    let messages = AdminMessageRepo::list_active(&state.pool).await?;
    Ok(DataResponse::new(messages))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Record an admin action, logging (not propagating) any failure.
async fn log_action(
    state: &AppState,
    admin_id: DbId,
    action: &str,
    target_user_id: Option<DbId>,
    reason: Option<&str>,
    details: serde_json::Value,
) {
    if let Err(e) =
        AdminActionRepo::log(&state.pool, admin_id, action, target_user_id, reason, &details).await
    {
        tracing::error!(error = %e, action, "Failed to record admin action");
    }
}
