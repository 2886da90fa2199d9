//! Repository for the `users` table.

use skillswap_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::user::{CreateUser, Profile, UpdateProfile, User};

/// Column list for full `users` queries (includes the password hash).
const COLUMNS: &str = "\
    id, email, password_hash, name, location, profile_photo, availability, \
    is_public, is_banned, role_id, rating, total_swaps, \
    failed_login_count, locked_until, last_login_at, created_at, updated_at";

/// Column list for public profile queries.
const PROFILE_COLUMNS: &str = "\
    id, name, location, profile_photo, availability, is_public, \
    rating, total_swaps, created_at";

/// Provides CRUD operations for user accounts and profiles.
pub struct UserRepo;

impl UserRepo {
    /// Create a new user, returning the full row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash, name, role_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.name)
            .bind(input.role_id)
            .fetch_one(pool)
            .await
    }

    /// Look up a user by email (login).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Look up a user by ID.
    pub async fn find_by_id(pool: &PgPool, user_id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch a user's public profile.
    pub async fn find_profile(pool: &PgPool, user_id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {PROFILE_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List all public, non-banned profiles, newest first.
    pub async fn list_public(pool: &PgPool) -> Result<Vec<Profile>, sqlx::Error> {
        let query = format!(
            "SELECT {PROFILE_COLUMNS} FROM users \
             WHERE is_public = true AND is_banned = false \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Profile>(&query).fetch_all(pool).await
    }

    /// Patch a user's profile fields. Absent fields are left unchanged.
    pub async fn update_profile(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET \
                 name = COALESCE($2, name), \
                 location = COALESCE($3, location), \
                 profile_photo = COALESCE($4, profile_photo), \
                 availability = COALESCE($5, availability), \
                 is_public = COALESCE($6, is_public), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {PROFILE_COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.location)
            .bind(&input.profile_photo)
            .bind(&input.availability)
            .bind(input.is_public)
            .fetch_optional(pool)
            .await
    }

    /// Increment the consecutive failed-login counter.
    pub async fn increment_failed_login(pool: &PgPool, user_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET failed_login_count = failed_login_count + 1 WHERE id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Lock the account until the given time.
    pub async fn lock_account(
        pool: &PgPool,
        user_id: DbId,
        until: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET locked_until = $2 WHERE id = $1")
            .bind(user_id)
            .bind(until)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Reset the failure counter and stamp `last_login_at`.
    pub async fn record_successful_login(pool: &PgPool, user_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET \
                 failed_login_count = 0, locked_until = NULL, last_login_at = NOW() \
             WHERE id = $1",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Set or clear the banned flag. Returns `false` when the user does not exist.
    pub async fn set_banned(
        pool: &PgPool,
        user_id: DbId,
        banned: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET is_banned = $2, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .bind(banned)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Recompute a user's average received rating from the ratings ledger.
    pub async fn recompute_rating(pool: &PgPool, user_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET rating = COALESCE( \
                 (SELECT AVG(rating)::DOUBLE PRECISION FROM ratings WHERE to_user_id = $1), 0) \
             WHERE id = $1",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Increment `total_swaps` for both participants of a completed exchange.
    pub async fn increment_total_swaps(
        pool: &PgPool,
        user_a: DbId,
        user_b: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET total_swaps = total_swaps + 1 WHERE id = ANY($1)")
            .bind(vec![user_a, user_b])
            .execute(pool)
            .await?;
        Ok(())
    }
}
