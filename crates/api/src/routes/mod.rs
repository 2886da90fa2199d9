pub mod admin;
pub mod auth;
pub mod health;
pub mod swaps;
pub mod users;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                WebSocket swap feed (token query param)
///
/// /auth/register                     register (public)
/// /auth/login                        login (public)
/// /auth/refresh                      refresh (public)
/// /auth/logout                       logout (requires auth)
///
/// /users                             browse public users with skills
/// /users/me                          get, update own profile
/// /users/me/skills                   list, add, remove own skill entries
/// /users/{id}                        public profile with skills
/// /users/{id}/ratings                ratings received
///
/// /swaps                             list own requests, send request
/// /swaps/batch                       send several pairs to one counterpart
/// /swaps/{id}                        delete pending request (requester only)
/// /swaps/{id}/accept                 recipient accepts (POST)
/// /swaps/{id}/reject                 recipient rejects (POST)
/// /swaps/{id}/cancel                 requester cancels (POST)
/// /swaps/{id}/complete               either participant completes (POST)
/// /swaps/{id}/ratings                rate a completed exchange (POST)
///
/// /platform-messages                 active platform messages (any user)
///
/// /admin/users/{id}/ban              ban user (admin only)
/// /admin/users/{id}/unban            unban user (admin only)
/// /admin/messages                    list, publish platform messages
/// /admin/messages/{id}/deactivate    take a message down
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // WebSocket swap feed.
        .route("/ws", get(ws::ws_handler))
        // Authentication routes (register, login, refresh, logout).
        .nest("/auth", auth::router())
        // Browse, profiles, and skill listings.
        .nest("/users", users::router())
        // Swap request lifecycle and ratings.
        .nest("/swaps", swaps::router())
        // Active platform messages for all authenticated users.
        .route(
            "/platform-messages",
            get(handlers::admin::list_active_messages),
        )
        // Admin moderation and platform messages.
        .nest("/admin", admin::router())
}
