//! Authentication extractor: resolves the acting marketplace principal.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use skillswap_core::error::CoreError;
use skillswap_core::roles::ROLE_ADMIN;
use skillswap_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// The acting principal for a request, taken from the Bearer access token.
///
/// Every authorization decision in the marketplace -- which side of a swap
/// may act, who may moderate -- starts from this identity; handlers never
/// trust a caller-supplied user id.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<DataResponse<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(DataResponse::new(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The user's role name (e.g. `"admin"`, `"member"`).
    pub role: String,
}

impl AuthUser {
    /// Whether this principal holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
fn bearer_token(header: &str) -> Option<&str> {
    header.strip_prefix("Bearer ")
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| CoreError::Unauthorized("Missing Authorization header".into()))?;

        let token = bearer_token(header).ok_or_else(|| {
            CoreError::Unauthorized("Invalid Authorization format. Expected: Bearer <token>".into())
        })?;

        let claims = state.config.jwt.verify_access_token(token)?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillswap_core::roles::ROLE_MEMBER;

    #[test]
    fn bearer_token_strips_the_scheme() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(bearer_token("abc.def.ghi"), None);
    }

    #[test]
    fn admin_check_follows_the_role_claim() {
        let admin = AuthUser {
            user_id: 1,
            role: ROLE_ADMIN.to_string(),
        };
        let member = AuthUser {
            user_id: 2,
            role: ROLE_MEMBER.to_string(),
        };
        assert!(admin.is_admin());
        assert!(!member.is_admin());
    }
}
