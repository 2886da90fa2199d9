//! Route definitions for the `/users` resource.
//!
//! All endpoints require authentication.

use axum::routing::get;
use axum::Router;

use crate::handlers::{ratings, skills, users};
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /                -> browse
/// GET    /me              -> get_me
/// PUT    /me              -> update_me
/// GET    /me/skills       -> list_skills
/// POST   /me/skills       -> add_skill
/// DELETE /me/skills       -> remove_skill
/// GET    /{id}            -> get_user
/// GET    /{id}/ratings    -> list_ratings
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::browse))
        .route("/me", get(users::get_me).put(users::update_me))
        .route(
            "/me/skills",
            get(skills::list_skills)
                .post(skills::add_skill)
                .delete(skills::remove_skill),
        )
        .route("/{id}", get(users::get_user))
        .route("/{id}/ratings", get(ratings::list_ratings))
}
