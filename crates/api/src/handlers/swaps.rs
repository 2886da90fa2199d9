//! Handlers for the `/swaps` resource: the swap request lifecycle.
//!
//! Each mutating endpoint validates actor identity and state through
//! [`skillswap_core::swap_lifecycle`], persists the change through a
//! status-guarded update, and publishes a [`SwapEvent`] that feeds both the
//! WebSocket change feed and the notification relay.

use std::collections::HashSet;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use skillswap_core::error::CoreError;
use skillswap_core::skill::Direction;
use skillswap_core::swap_events::{
    EVENT_SWAP_ACCEPTED, EVENT_SWAP_CANCELLED, EVENT_SWAP_COMPLETED, EVENT_SWAP_REJECTED,
    EVENT_SWAP_REQUESTED,
};
use skillswap_core::swap_lifecycle::{self, SwapAction};
use skillswap_core::types::DbId;
use skillswap_db::models::status::StatusId;
use skillswap_db::models::swap_request::{CreateSwapRequest, SwapRequest, SwapRequestDetails};
use skillswap_db::models::user::User;
use skillswap_db::repositories::{SkillRepo, SwapRequestRepo, UserRepo, UserSkillRepo};
use skillswap_events::SwapEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /swaps`. Skills are referenced by name.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSwapBody {
    pub to_user_id: DbId,
    pub skill_offered: String,
    pub skill_wanted: String,
    pub message: String,
}

/// One offered/wanted pair in a batch submission.
#[derive(Debug, Deserialize)]
pub struct ExchangePair {
    pub skill_offered: String,
    pub skill_wanted: String,
}

/// Request body for `POST /swaps/batch`: several skill pairs proposed to
/// the same counterpart with a shared message.
#[derive(Debug, Deserialize)]
pub struct BatchSwapBody {
    pub to_user_id: DbId,
    pub exchanges: Vec<ExchangePair>,
    pub message: String,
}

/// Outcome of a batch submission.
///
/// The pairs are inserted one at a time with no surrounding transaction;
/// when one fails, the loop stops and `created` still lists the requests
/// that were already committed.
#[derive(Debug, Serialize)]
pub struct BatchOutcome {
    pub created: Vec<SwapRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// Listing and creation
// ---------------------------------------------------------------------------

/// GET /api/v1/swaps
///
/// All requests the authenticated user participates in (either side),
/// newest first, with profile and skill names joined in.
pub async fn list_swaps(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<DataResponse<Vec<SwapRequestDetails>>> {
    let requests = SwapRequestRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(DataResponse::new(requests))
}

/// POST /api/v1/swaps
///
/// Send a swap request. All preconditions are validated before any row is
/// written: distinct participants, message length, both skills known, the
/// offered skill in the sender's offered set, and the wanted skill in the
/// recipient's offered set.
pub async fn create_swap(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateSwapBody>,
) -> AppResult<(StatusCode, DataResponse<SwapRequest>)> {
    let sender = load_sender(&state, &auth).await?;
    let request = create_one(&state, &sender, &input).await?;
    Ok((StatusCode::CREATED, DataResponse::new(request)))
}

/// POST /api/v1/swaps/batch
///
/// Propose several skill pairs to the same counterpart in one submission.
/// Duplicate skills across the batch are rejected up front; after that the
/// pairs are created sequentially and independently. A mid-batch failure
/// stops the loop without rolling back earlier requests -- the response
/// reports both the committed requests and the error.
pub async fn create_swap_batch(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<BatchSwapBody>,
) -> AppResult<(StatusCode, DataResponse<BatchOutcome>)> {
    if input.exchanges.is_empty() {
        return Err(CoreError::Validation(
            "At least one skill exchange is required".to_string(),
        )
        .into());
    }

    let mut offered_seen = HashSet::new();
    let mut wanted_seen = HashSet::new();
    for pair in &input.exchanges {
        if !offered_seen.insert(pair.skill_offered.as_str()) {
            return Err(CoreError::Validation(
                "Each offered skill can be used in only one exchange".to_string(),
            )
            .into());
        }
        if !wanted_seen.insert(pair.skill_wanted.as_str()) {
            return Err(CoreError::Validation(
                "Each requested skill can be used in only one exchange".to_string(),
            )
            .into());
        }
    }

    let sender = load_sender(&state, &auth).await?;

    let mut created = Vec::new();
    let mut error = None;
    for pair in &input.exchanges {
        let body = CreateSwapBody {
            to_user_id: input.to_user_id,
            skill_offered: pair.skill_offered.clone(),
            skill_wanted: pair.skill_wanted.clone(),
            message: input.message.clone(),
        };
        match create_one(&state, &sender, &body).await {
            Ok(request) => created.push(request),
            Err(err) => {
                // Earlier requests stay committed; there is no rollback.
                tracing::warn!(
                    committed = created.len(),
                    error = %err,
                    "Batch swap creation stopped early"
                );
                error = Some(err.to_string());
                break;
            }
        }
    }

    let status = if error.is_none() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, DataResponse::new(BatchOutcome { created, error })))
}

// ---------------------------------------------------------------------------
// Lifecycle transitions
// ---------------------------------------------------------------------------

/// POST /api/v1/swaps/{id}/accept -- recipient accepts a pending request.
pub async fn accept_swap(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
) -> AppResult<DataResponse<SwapRequest>> {
    let request = transition(&state, &auth, request_id, SwapAction::Accept).await?;
    Ok(DataResponse::new(request))
}

/// POST /api/v1/swaps/{id}/reject -- recipient rejects a pending request.
pub async fn reject_swap(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
) -> AppResult<DataResponse<SwapRequest>> {
    let request = transition(&state, &auth, request_id, SwapAction::Reject).await?;
    Ok(DataResponse::new(request))
}

/// POST /api/v1/swaps/{id}/cancel -- requester cancels a pending request.
pub async fn cancel_swap(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
) -> AppResult<DataResponse<SwapRequest>> {
    let request = transition(&state, &auth, request_id, SwapAction::Cancel).await?;
    Ok(DataResponse::new(request))
}

/// POST /api/v1/swaps/{id}/complete -- either participant marks an accepted
/// exchange completed.
pub async fn complete_swap(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
) -> AppResult<DataResponse<SwapRequest>> {
    let request = transition(&state, &auth, request_id, SwapAction::Complete).await?;
    Ok(DataResponse::new(request))
}

/// DELETE /api/v1/swaps/{id}
///
/// Hard-delete a request. Only the requester may do this, and only while
/// the request is still pending.
pub async fn delete_swap(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let request = SwapRequestRepo::find_by_id(&state.pool, request_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "SwapRequest",
            id: request_id,
        })?;

    if swap_lifecycle::party_of(auth.user_id, request.from_user_id, request.to_user_id).is_none() {
        return Err(CoreError::NotParticipant(format!(
            "user {} is not part of this swap request",
            auth.user_id
        ))
        .into());
    }
    if auth.user_id != request.from_user_id {
        return Err(CoreError::NotParticipant(
            "only the requester may delete a swap request".to_string(),
        )
        .into());
    }
    if request.status_id != swap_lifecycle::STATUS_PENDING {
        return Err(CoreError::InvalidTransition {
            from: swap_lifecycle::status_name(request.status_id),
            action: "delete",
        }
        .into());
    }

    let deleted = SwapRequestRepo::delete_pending(&state.pool, request_id, auth.user_id).await?;
    if !deleted {
        // The row changed (or vanished) between read and write.
        return Err(CoreError::Conflict(
            "Swap request was modified concurrently".to_string(),
        )
        .into());
    }

    let event = SwapEvent::new(EVENT_SWAP_CANCELLED)
        .with_swap(request.id)
        .with_actor(auth.user_id)
        .with_recipient(request.to_user_id)
        .with_payload(serde_json::json!({
            "from_user_id": request.from_user_id,
            "to_user_id": request.to_user_id,
            "deleted": true,
        }));
    state.event_bus.publish(event);

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load the acting user and reject banned accounts.
async fn load_sender(state: &AppState, auth: &AuthUser) -> Result<User, AppError> {
    let sender = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| CoreError::Unauthorized("User no longer exists".to_string()))?;
    if sender.is_banned {
        return Err(CoreError::Forbidden(
            "Banned accounts cannot send swap requests".to_string(),
        )
        .into());
    }
    Ok(sender)
}

/// Validate and insert a single swap request, then publish its event.
async fn create_one(
    state: &AppState,
    sender: &User,
    input: &CreateSwapBody,
) -> Result<SwapRequest, AppError> {
    swap_lifecycle::validate_participants(sender.id, input.to_user_id)?;
    swap_lifecycle::validate_message(&input.message)?;

    let recipient = UserRepo::find_by_id(&state.pool, input.to_user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: input.to_user_id,
        })?;

    let offered_id = SkillRepo::id_for(&state.pool, &input.skill_offered)
        .await?
        .ok_or_else(|| {
            CoreError::Validation(format!("Unknown skill '{}'", input.skill_offered))
        })?;
    let wanted_id = SkillRepo::id_for(&state.pool, &input.skill_wanted)
        .await?
        .ok_or_else(|| CoreError::Validation(format!("Unknown skill '{}'", input.skill_wanted)))?;

    if !UserSkillRepo::has_entry(&state.pool, sender.id, offered_id, Direction::Offered).await? {
        return Err(CoreError::Validation(format!(
            "'{}' is not one of your offered skills",
            input.skill_offered
        ))
        .into());
    }
    if !UserSkillRepo::has_entry(&state.pool, recipient.id, wanted_id, Direction::Offered).await? {
        return Err(CoreError::Validation(format!(
            "{} does not offer '{}'",
            recipient.name, input.skill_wanted
        ))
        .into());
    }

    let request = SwapRequestRepo::create(
        &state.pool,
        &CreateSwapRequest {
            from_user_id: sender.id,
            to_user_id: recipient.id,
            skill_offered_id: offered_id,
            skill_wanted_id: wanted_id,
            message: input.message.trim().to_string(),
        },
    )
    .await?;

    let event = SwapEvent::new(EVENT_SWAP_REQUESTED)
        .with_swap(request.id)
        .with_actor(sender.id)
        .with_recipient(recipient.id)
        .with_payload(serde_json::json!({
            "from_user_id": request.from_user_id,
            "to_user_id": request.to_user_id,
            "status": swap_lifecycle::status_name(request.status_id),
            "skill_offered": input.skill_offered,
            "skill_wanted": input.skill_wanted,
        }));
    state.event_bus.publish(event);

    Ok(request)
}

/// Shared driver for accept/reject/cancel/complete.
///
/// Reads the request, validates actor and state through the core state
/// machine, then applies a status-guarded update. A guard miss means a
/// concurrent write landed in between; the stored row is left as that write
/// put it and the caller gets an invalid-transition error computed from the
/// fresh status.
async fn transition(
    state: &AppState,
    auth: &AuthUser,
    request_id: DbId,
    action: SwapAction,
) -> Result<SwapRequest, AppError> {
    let request = SwapRequestRepo::find_by_id(&state.pool, request_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "SwapRequest",
            id: request_id,
        })?;

    let target = swap_lifecycle::apply(
        request.status_id,
        action,
        auth.user_id,
        request.from_user_id,
        request.to_user_id,
    )?;

    let updated =
        SwapRequestRepo::update_status(&state.pool, request_id, request.status_id, target).await?;
    if !updated {
        let fresh = SwapRequestRepo::find_by_id(&state.pool, request_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "SwapRequest",
                id: request_id,
            })?;
        return Err(CoreError::InvalidTransition {
            from: swap_lifecycle::status_name(fresh.status_id),
            action: action.as_str(),
        }
        .into());
    }

    if action == SwapAction::Complete {
        UserRepo::increment_total_swaps(&state.pool, request.from_user_id, request.to_user_id)
            .await?;
    }

    publish_transition_event(state, &request, auth.user_id, action, target).await;

    let fresh = SwapRequestRepo::find_by_id(&state.pool, request_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "SwapRequest",
            id: request_id,
        })?;
    Ok(fresh)
}

/// Publish the lifecycle event for a successful transition.
async fn publish_transition_event(
    state: &AppState,
    request: &SwapRequest,
    actor: DbId,
    action: SwapAction,
    target: StatusId,
) {
    let recipient = if actor == request.from_user_id {
        request.to_user_id
    } else {
        request.from_user_id
    };

    // Skill names decorate notifications; a lookup failure degrades the
    // payload, never the operation.
    let offered = SkillRepo::find_by_id(&state.pool, request.skill_offered_id)
        .await
        .ok()
        .flatten()
        .map(|s| s.name);
    let wanted = SkillRepo::find_by_id(&state.pool, request.skill_wanted_id)
        .await
        .ok()
        .flatten()
        .map(|s| s.name);

    let event = SwapEvent::new(event_type_for(action))
        .with_swap(request.id)
        .with_actor(actor)
        .with_recipient(recipient)
        .with_payload(serde_json::json!({
            "from_user_id": request.from_user_id,
            "to_user_id": request.to_user_id,
            "status": swap_lifecycle::status_name(target),
            "skill_offered": offered,
            "skill_wanted": wanted,
        }));
    state.event_bus.publish(event);
}

/// The published event type for each lifecycle action.
fn event_type_for(action: SwapAction) -> &'static str {
    match action {
        SwapAction::Accept => EVENT_SWAP_ACCEPTED,
        SwapAction::Reject => EVENT_SWAP_REJECTED,
        SwapAction::Cancel => EVENT_SWAP_CANCELLED,
        SwapAction::Complete => EVENT_SWAP_COMPLETED,
    }
}
