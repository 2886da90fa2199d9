//! Repository for the `ratings` ledger.

use skillswap_core::types::DbId;
use sqlx::PgPool;

use crate::models::rating::{CreateRating, Rating, RatingDetails};

/// Column list for `ratings` queries.
const COLUMNS: &str =
    "id, swap_request_id, from_user_id, to_user_id, rating, feedback, created_at";

/// Provides operations for the append-only ratings ledger.
pub struct RatingRepo;

impl RatingRepo {
    /// Insert a rating, returning the row. The `uq_ratings_swap_rater`
    /// constraint backstops the one-rating-per-participant rule.
    pub async fn create(pool: &PgPool, input: &CreateRating) -> Result<Rating, sqlx::Error> {
        let query = format!(
            "INSERT INTO ratings (swap_request_id, from_user_id, to_user_id, rating, feedback) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(input.swap_request_id)
            .bind(input.from_user_id)
            .bind(input.to_user_id)
            .bind(input.rating)
            .bind(&input.feedback)
            .fetch_one(pool)
            .await
    }

    /// Whether this participant has already rated the given swap.
    pub async fn exists_for(
        pool: &PgPool,
        swap_request_id: DbId,
        from_user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS( \
                 SELECT 1 FROM ratings WHERE swap_request_id = $1 AND from_user_id = $2)",
        )
        .bind(swap_request_id)
        .bind(from_user_id)
        .fetch_one(pool)
        .await
    }

    /// Ratings received by a user, newest first, with the rater's display
    /// fields joined in.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<RatingDetails>, sqlx::Error> {
        sqlx::query_as::<_, RatingDetails>(
            "SELECT r.id, r.swap_request_id, r.from_user_id, r.to_user_id, \
                    r.rating, r.feedback, \
                    u.name AS from_name, u.profile_photo AS from_photo, \
                    r.created_at \
             FROM ratings r \
             JOIN users u ON u.id = r.from_user_id \
             WHERE r.to_user_id = $1 \
             ORDER BY r.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Average rating received by a user, if any ratings exist.
    pub async fn average_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<f64>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT AVG(rating)::DOUBLE PRECISION FROM ratings WHERE to_user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
