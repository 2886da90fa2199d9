//! Route definitions for the `/swaps` resource.
//!
//! All endpoints require authentication; per-request authorization (which
//! side of the swap may act) happens in the handlers via the lifecycle
//! state machine.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{ratings, swaps};
use crate::state::AppState;

/// Routes mounted at `/swaps`.
///
/// ```text
/// GET    /                 -> list_swaps
/// POST   /                 -> create_swap
/// POST   /batch            -> create_swap_batch
/// DELETE /{id}             -> delete_swap
/// POST   /{id}/accept      -> accept_swap
/// POST   /{id}/reject      -> reject_swap
/// POST   /{id}/cancel      -> cancel_swap
/// POST   /{id}/complete    -> complete_swap
/// POST   /{id}/ratings     -> submit_rating
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(swaps::list_swaps).post(swaps::create_swap))
        .route("/batch", post(swaps::create_swap_batch))
        .route("/{id}", delete(swaps::delete_swap))
        .route("/{id}/accept", post(swaps::accept_swap))
        .route("/{id}/reject", post(swaps::reject_swap))
        .route("/{id}/cancel", post(swaps::cancel_swap))
        .route("/{id}/complete", post(swaps::complete_swap))
        .route("/{id}/ratings", post(ratings::submit_rating))
}
