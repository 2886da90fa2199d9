//! Route definitions for the `/admin` surface.
//!
//! Every handler behind this router enforces the admin role via the
//! `RequireAdmin` extractor.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST   /users/{id}/ban             -> ban_user
/// POST   /users/{id}/unban           -> unban_user
/// GET    /messages                   -> list_messages
/// POST   /messages                   -> create_message
/// POST   /messages/{id}/deactivate   -> deactivate_message
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/{id}/ban", post(admin::ban_user))
        .route("/users/{id}/unban", post(admin::unban_user))
        .route(
            "/messages",
            get(admin::list_messages).post(admin::create_message),
        )
        .route("/messages/{id}/deactivate", post(admin::deactivate_message))
}
