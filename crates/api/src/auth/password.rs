//! Password handling for marketplace accounts.
//!
//! Hashes use Argon2id with a random salt, stored in PHC string format so
//! the algorithm parameters and salt travel with the hash. The account
//! policy for new passwords lives here too, so registration and any future
//! password-change flow share one rule set. Failures surface as
//! [`CoreError`] like every other domain check.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use skillswap_core::error::CoreError;

/// Minimum password length for new accounts.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Hash a plaintext password for storage.
pub fn hash_password(password: &str) -> Result<String, CoreError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CoreError::Internal(format!("Password hashing failed: {e}")))
}

/// Check a plaintext password against a stored hash.
///
/// A mismatch is `Ok(false)`; `Err` is reserved for malformed stored
/// hashes and other internal failures.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, CoreError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| CoreError::Internal(format!("Stored password hash is malformed: {e}")))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(CoreError::Internal(format!(
            "Password verification failed: {e}"
        ))),
    }
}

/// Account policy for a new password.
///
/// Enforces the minimum length and rejects a password equal to the account
/// email (compared case-insensitively).
pub fn validate_new_password(email: &str, password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }
    if password.eq_ignore_ascii_case(email) {
        return Err(CoreError::Validation(
            "Password must not be the same as your email address".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let password = "guitar-for-spanish";
        let hash = hash_password(password).expect("hashing succeeds");

        // Stored value must be a PHC string carrying the argon2id identifier.
        assert!(hash.starts_with("$argon2id$"));

        let verified = verify_password(password, &hash).expect("verification runs");
        assert!(verified, "the right password must match its own hash");
    }

    #[test]
    fn wrong_password_is_rejected() {
        let hash = hash_password("the-real-password").expect("hashing succeeds");
        let verified = verify_password("a-guess", &hash).expect("verification runs");
        assert!(!verified, "a mismatch is Ok(false), not an error");
    }

    #[test]
    fn malformed_stored_hash_is_an_internal_error() {
        let result = verify_password("anything", "not-a-phc-hash");
        assert!(matches!(result, Err(CoreError::Internal(_))));
    }

    #[test]
    fn short_password_fails_policy() {
        let result = validate_new_password("alice@example.com", "short");
        match result {
            Err(CoreError::Validation(msg)) => {
                assert!(msg.contains("at least 8"), "message should state the minimum");
            }
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn password_matching_email_fails_policy() {
        let result = validate_new_password("alice@example.com", "Alice@Example.COM");
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn acceptable_password_passes_policy() {
        // Exactly at the minimum boundary.
        assert!(validate_new_password("alice@example.com", "eight-ch").is_ok());
        assert!(validate_new_password("alice@example.com", "a-much-longer-password").is_ok());
    }
}
