//! Access and refresh tokens for marketplace sessions.
//!
//! Access tokens are short-lived HS256 JWTs issued and verified through
//! [`JwtConfig`]; a failed verification surfaces as
//! [`CoreError::Unauthorized`] so extractors and the WebSocket upgrade can
//! treat it like any other domain error. Refresh tokens are opaque random
//! strings modelled by [`RefreshToken`]; sessions persist only their
//! SHA-256 digest, so a leaked sessions table cannot be replayed.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use skillswap_core::error::CoreError;
use skillswap_core::types::{DbId, Timestamp};
use uuid::Uuid;

/// Claims carried by every marketplace access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the internal id of the user acting under this token.
    pub sub: DbId,
    /// Role name driving server-side authorization (`"admin"`, `"member"`).
    pub role: String,
    /// Expiry as a UTC Unix timestamp.
    pub exp: i64,
    /// Issue time as a UTC Unix timestamp.
    pub iat: i64,
    /// Unique token id (UUID v4), available for revocation and audit.
    pub jti: String,
}

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;
/// Default refresh token expiry in days.
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 7;

/// Signing secret and token lifetimes for issuance and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 signing secret.
    pub secret: String,
    /// Access token lifetime in minutes.
    pub access_token_expiry_mins: i64,
    /// Refresh token lifetime in days.
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// Load token configuration from the environment. `JWT_SECRET` is
    /// required; `JWT_ACCESS_EXPIRY_MINS` and `JWT_REFRESH_EXPIRY_DAYS`
    /// override the 15-minute / 7-day defaults.
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is unset or empty, or an expiry override is
    /// not a valid integer.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        Self {
            secret,
            access_token_expiry_mins: env_i64("JWT_ACCESS_EXPIRY_MINS", DEFAULT_ACCESS_EXPIRY_MINS),
            refresh_token_expiry_days: env_i64(
                "JWT_REFRESH_EXPIRY_DAYS",
                DEFAULT_REFRESH_EXPIRY_DAYS,
            ),
        }
    }

    /// Issue a signed access token for the given user and role.
    pub fn issue_access_token(&self, user_id: DbId, role: &str) -> Result<String, CoreError> {
        let issued_at = chrono::Utc::now();
        let expires_at = issued_at + chrono::Duration::minutes(self.access_token_expiry_mins);

        let claims = Claims {
            sub: user_id,
            role: role.to_string(),
            exp: expires_at.timestamp(),
            iat: issued_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(), // HS256
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| CoreError::Internal(format!("Failed to sign access token: {e}")))
    }

    /// Verify an access token and return the embedded [`Claims`].
    ///
    /// Signature and expiry are both checked; any failure collapses to a
    /// single `Unauthorized` error.
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, CoreError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(), // HS256, validates exp
        )
        .map(|data| data.claims)
        .map_err(|_| CoreError::Unauthorized("Invalid or expired token".to_string()))
    }

    /// Lifetime of a freshly issued access token, in seconds (for the
    /// `expires_in` field of auth responses).
    pub fn access_token_ttl_secs(&self) -> i64 {
        self.access_token_expiry_mins * 60
    }

    /// Expiry instant for a refresh token issued now.
    pub fn refresh_expires_at(&self) -> Timestamp {
        chrono::Utc::now() + chrono::Duration::days(self.refresh_token_expiry_days)
    }
}

/// Read an i64 environment variable with a default.
fn env_i64(name: &str, default: i64) -> i64 {
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .unwrap_or_else(|_| panic!("{name} must be a valid i64")),
        Err(_) => default,
    }
}

/// A freshly minted refresh token.
///
/// The `plaintext` goes to the client once and is never stored; sessions
/// persist only the `hash`.
#[derive(Debug)]
pub struct RefreshToken {
    pub plaintext: String,
    pub hash: String,
}

impl RefreshToken {
    /// Mint a new cryptographically random refresh token.
    pub fn mint() -> Self {
        let plaintext = Uuid::new_v4().to_string();
        let hash = Self::hash(&plaintext);
        Self { plaintext, hash }
    }

    /// SHA-256 hex digest of a refresh token.
    ///
    /// Used both when minting and when matching an incoming token against
    /// the stored session hash.
    pub fn hash(plaintext: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(plaintext.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillswap_core::roles::{ROLE_ADMIN, ROLE_MEMBER};

    /// Config with a known secret and short lifetimes for tests.
    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "skillswap-test-signing-secret".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        }
    }

    #[test]
    fn issue_and_verify_round_trip() {
        let config = test_config();
        let token = config
            .issue_access_token(42, ROLE_MEMBER)
            .expect("token issuance should succeed");

        let claims = config
            .verify_access_token(&token)
            .expect("token verification should succeed");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, ROLE_MEMBER);
        assert!(claims.exp > claims.iat);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn admin_role_survives_the_round_trip() {
        let config = test_config();
        let token = config
            .issue_access_token(1, ROLE_ADMIN)
            .expect("token issuance should succeed");
        let claims = config.verify_access_token(&token).expect("should verify");
        assert_eq!(claims.role, ROLE_ADMIN);
    }

    #[test]
    fn expired_token_is_unauthorized() {
        let config = test_config();

        // Manually craft an already-expired token, well past the default
        // 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let stale_claims = Claims {
            sub: 7,
            role: ROLE_MEMBER.to_string(),
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &stale_claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding succeeds");

        let result = config.verify_access_token(&token);
        assert!(matches!(result, Err(CoreError::Unauthorized(_))));
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let config_a = test_config();
        let config_b = JwtConfig {
            secret: "a-completely-different-secret".to_string(),
            ..test_config()
        };

        let token = config_a
            .issue_access_token(1, ROLE_MEMBER)
            .expect("token issuance should succeed");

        let result = config_b.verify_access_token(&token);
        assert!(matches!(result, Err(CoreError::Unauthorized(_))));
    }

    #[test]
    fn refresh_token_hash_is_stable_hex() {
        let token = RefreshToken::mint();

        // Re-hashing the same plaintext must produce the stored digest.
        assert_eq!(RefreshToken::hash(&token.plaintext), token.hash);

        // SHA-256 renders as 64 hex characters.
        assert_eq!(token.hash.len(), 64);
        assert!(token.hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn access_ttl_matches_configured_expiry() {
        let config = test_config();
        assert_eq!(config.access_token_ttl_secs(), 15 * 60);
    }
}
