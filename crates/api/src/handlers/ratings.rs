//! Handlers for the ratings ledger.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use skillswap_core::error::CoreError;
use skillswap_core::rating::{ensure_rateable, validate_feedback, validate_rating};
use skillswap_core::swap_events::EVENT_SWAP_RATED;
use skillswap_core::swap_lifecycle;
use skillswap_core::types::DbId;
use skillswap_db::models::rating::{CreateRating, Rating, RatingDetails};
use skillswap_db::repositories::{RatingRepo, SwapRequestRepo, UserRepo};
use skillswap_events::SwapEvent;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /swaps/{id}/ratings`.
#[derive(Debug, Deserialize)]
pub struct SubmitRatingBody {
    pub rating: i16,
    pub feedback: Option<String>,
}

/// POST /api/v1/swaps/{id}/ratings
///
/// Rate a completed exchange. The recipient is inferred as the other
/// participant; each participant may rate an exchange exactly once, and the
/// recipient's average rating is recomputed on success.
pub async fn submit_rating(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
    Json(input): Json<SubmitRatingBody>,
) -> AppResult<(StatusCode, DataResponse<Rating>)> {
    validate_rating(input.rating)?;
    validate_feedback(input.feedback.as_deref())?;

    let request = SwapRequestRepo::find_by_id(&state.pool, request_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "SwapRequest",
            id: request_id,
        })?;

    swap_lifecycle::party_of(auth.user_id, request.from_user_id, request.to_user_id).ok_or_else(
        || {
            CoreError::NotParticipant(format!(
                "user {} is not part of this swap request",
                auth.user_id
            ))
        },
    )?;

    ensure_rateable(request.status_id)?;

    if RatingRepo::exists_for(&state.pool, request.id, auth.user_id).await? {
        return Err(CoreError::AlreadyRated {
            swap_request_id: request.id,
        }
        .into());
    }

    let to_user_id = if auth.user_id == request.from_user_id {
        request.to_user_id
    } else {
        request.from_user_id
    };

    // The uq_ratings_swap_rater constraint backstops a concurrent duplicate.
    let rating = RatingRepo::create(
        &state.pool,
        &CreateRating {
            swap_request_id: request.id,
            from_user_id: auth.user_id,
            to_user_id,
            rating: input.rating,
            feedback: input.feedback,
        },
    )
    .await?;

    UserRepo::recompute_rating(&state.pool, to_user_id).await?;

    let event = SwapEvent::new(EVENT_SWAP_RATED)
        .with_swap(request.id)
        .with_actor(auth.user_id)
        .with_recipient(to_user_id)
        .with_payload(serde_json::json!({
            "from_user_id": request.from_user_id,
            "to_user_id": request.to_user_id,
            "rating": rating.rating,
        }));
    state.event_bus.publish(event);

    Ok((StatusCode::CREATED, DataResponse::new(rating)))
}

/// GET /api/v1/users/{id}/ratings
///
/// Ratings a user has received, newest first, with rater display fields.
pub async fn list_ratings(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<DataResponse<Vec<RatingDetails>>> {
    let ratings = RatingRepo::list_for_user(&state.pool, user_id).await?;
    Ok(DataResponse::new(ratings))
}
