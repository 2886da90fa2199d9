//! Integration tests for the swap request lifecycle and rating ledger.
//!
//! Exercises the repository layer against a real database:
//! - Guarded status transitions (no lost updates, no resurrection)
//! - Requester-only pending deletion
//! - Rating uniqueness and aggregate recomputation

use skillswap_core::roles::ROLE_MEMBER;
use skillswap_core::skill::Direction;
use sqlx::PgPool;

use skillswap_db::models::rating::CreateRating;
use skillswap_db::models::status::SwapStatus;
use skillswap_db::models::swap_request::{CreateSwapRequest, SwapRequest};
use skillswap_db::models::user::{CreateUser, User};
use skillswap_db::repositories::{
    RatingRepo, RoleRepo, SkillRepo, SwapRequestRepo, UserRepo, UserSkillRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_member(pool: &PgPool, email: &str, name: &str) -> User {
    let role = RoleRepo::find_by_name(pool, ROLE_MEMBER)
        .await
        .unwrap()
        .expect("member role is seeded");
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: "$argon2id$v=19$test$hash".to_string(),
            name: name.to_string(),
            role_id: role.id,
        },
    )
    .await
    .unwrap()
}

/// Create two members where Alice offers Guitar and Bob offers Spanish,
/// then send a pending request from Alice to Bob.
async fn request_between(pool: &PgPool) -> (User, User, SwapRequest) {
    let alice = create_member(pool, "alice@example.com", "Alice").await;
    let bob = create_member(pool, "bob@example.com", "Bob").await;

    let guitar = SkillRepo::resolve_or_create(pool, "Guitar").await.unwrap();
    let spanish = SkillRepo::resolve_or_create(pool, "Spanish").await.unwrap();
    UserSkillRepo::add(pool, alice.id, guitar, Direction::Offered)
        .await
        .unwrap();
    UserSkillRepo::add(pool, bob.id, spanish, Direction::Offered)
        .await
        .unwrap();

    let request = SwapRequestRepo::create(
        pool,
        &CreateSwapRequest {
            from_user_id: alice.id,
            to_user_id: bob.id,
            skill_offered_id: guitar,
            skill_wanted_id: spanish,
            message: "I can teach you guitar chords in exchange for Spanish lessons".to_string(),
        },
    )
    .await
    .unwrap();

    (alice, bob, request)
}

// ---------------------------------------------------------------------------
// Lifecycle transitions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn new_request_starts_pending(pool: PgPool) {
    let (alice, bob, request) = request_between(&pool).await;
    assert_eq!(request.status_id, SwapStatus::Pending.id());
    assert_eq!(request.from_user_id, alice.id);
    assert_eq!(request.to_user_id, bob.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn pending_accept_complete_round_trip(pool: PgPool) {
    let (_alice, _bob, request) = request_between(&pool).await;

    let accepted = SwapRequestRepo::update_status(
        &pool,
        request.id,
        SwapStatus::Pending.id(),
        SwapStatus::Accepted.id(),
    )
    .await
    .unwrap();
    assert!(accepted);

    let completed = SwapRequestRepo::update_status(
        &pool,
        request.id,
        SwapStatus::Accepted.id(),
        SwapStatus::Completed.id(),
    )
    .await
    .unwrap();
    assert!(completed);

    let row = SwapRequestRepo::find_by_id(&pool, request.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.status_id, SwapStatus::Completed.id());
    assert!(row.updated_at >= row.created_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn guarded_update_rejects_stale_expectation(pool: PgPool) {
    let (_alice, _bob, request) = request_between(&pool).await;

    assert!(SwapRequestRepo::update_status(
        &pool,
        request.id,
        SwapStatus::Pending.id(),
        SwapStatus::Accepted.id(),
    )
    .await
    .unwrap());

    // A second accept arrives after the first landed: the guard fails and
    // the stored status is untouched.
    let second = SwapRequestRepo::update_status(
        &pool,
        request.id,
        SwapStatus::Pending.id(),
        SwapStatus::Accepted.id(),
    )
    .await
    .unwrap();
    assert!(!second);

    let row = SwapRequestRepo::find_by_id(&pool, request.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.status_id, SwapStatus::Accepted.id());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn terminal_request_is_never_resurrected(pool: PgPool) {
    let (_alice, _bob, request) = request_between(&pool).await;

    assert!(SwapRequestRepo::update_status(
        &pool,
        request.id,
        SwapStatus::Pending.id(),
        SwapStatus::Rejected.id(),
    )
    .await
    .unwrap());

    let reopened = SwapRequestRepo::update_status(
        &pool,
        request.id,
        SwapStatus::Pending.id(),
        SwapStatus::Accepted.id(),
    )
    .await
    .unwrap();
    assert!(!reopened);

    let row = SwapRequestRepo::find_by_id(&pool, request.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.status_id, SwapStatus::Rejected.id());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn self_request_violates_check_constraint(pool: PgPool) {
    let alice = create_member(&pool, "alice@example.com", "Alice").await;
    let guitar = SkillRepo::resolve_or_create(&pool, "Guitar").await.unwrap();

    let result = SwapRequestRepo::create(
        &pool,
        &CreateSwapRequest {
            from_user_id: alice.id,
            to_user_id: alice.id,
            skill_offered_id: guitar,
            skill_wanted_id: guitar,
            message: "this message is long enough to pass validation".to_string(),
        },
    )
    .await;
    assert!(result.is_err(), "from = to must be rejected by the database");
}

// ---------------------------------------------------------------------------
// Pending deletion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn only_requester_deletes_and_only_while_pending(pool: PgPool) {
    let (alice, bob, request) = request_between(&pool).await;

    // The recipient cannot delete.
    assert!(!SwapRequestRepo::delete_pending(&pool, request.id, bob.id)
        .await
        .unwrap());

    // After acceptance the requester cannot delete either.
    SwapRequestRepo::update_status(
        &pool,
        request.id,
        SwapStatus::Pending.id(),
        SwapStatus::Accepted.id(),
    )
    .await
    .unwrap();
    assert!(!SwapRequestRepo::delete_pending(&pool, request.id, alice.id)
        .await
        .unwrap());

    // A fresh pending request is deletable by its requester.
    let carol = create_member(&pool, "carol@example.com", "Carol").await;
    let dave = create_member(&pool, "dave@example.com", "Dave").await;
    let piano = SkillRepo::resolve_or_create(&pool, "Piano").await.unwrap();
    let chess = SkillRepo::resolve_or_create(&pool, "Chess").await.unwrap();
    UserSkillRepo::add(&pool, carol.id, piano, Direction::Offered)
        .await
        .unwrap();
    UserSkillRepo::add(&pool, dave.id, chess, Direction::Offered)
        .await
        .unwrap();
    let pending = SwapRequestRepo::create(
        &pool,
        &CreateSwapRequest {
            from_user_id: carol.id,
            to_user_id: dave.id,
            skill_offered_id: piano,
            skill_wanted_id: chess,
            message: "Piano for chess sounds like a fair exchange to me".to_string(),
        },
    )
    .await
    .unwrap();
    assert!(SwapRequestRepo::delete_pending(&pool, pending.id, carol.id)
        .await
        .unwrap());
    assert!(SwapRequestRepo::find_by_id(&pool, pending.id)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Request listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_for_user_joins_profiles_and_skills(pool: PgPool) {
    let (alice, bob, request) = request_between(&pool).await;

    for user_id in [alice.id, bob.id] {
        let listed = SwapRequestRepo::list_for_user(&pool, user_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        let details = &listed[0];
        assert_eq!(details.id, request.id);
        assert_eq!(details.status, "pending");
        assert_eq!(details.from_name, "Alice");
        assert_eq!(details.to_name, "Bob");
        assert_eq!(details.skill_offered_name, "Guitar");
        assert_eq!(details.skill_wanted_name, "Spanish");
    }

    let outsider = create_member(&pool, "eve@example.com", "Eve").await;
    let listed = SwapRequestRepo::list_for_user(&pool, outsider.id)
        .await
        .unwrap();
    assert!(listed.is_empty());
}

// ---------------------------------------------------------------------------
// Ratings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn rating_is_unique_per_participant(pool: PgPool) {
    let (alice, bob, request) = request_between(&pool).await;
    SwapRequestRepo::update_status(
        &pool,
        request.id,
        SwapStatus::Pending.id(),
        SwapStatus::Accepted.id(),
    )
    .await
    .unwrap();
    SwapRequestRepo::update_status(
        &pool,
        request.id,
        SwapStatus::Accepted.id(),
        SwapStatus::Completed.id(),
    )
    .await
    .unwrap();

    assert!(!RatingRepo::exists_for(&pool, request.id, alice.id)
        .await
        .unwrap());

    let rating = RatingRepo::create(
        &pool,
        &CreateRating {
            swap_request_id: request.id,
            from_user_id: alice.id,
            to_user_id: bob.id,
            rating: 5,
            feedback: Some("Great teacher, very patient".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(rating.rating, 5);

    assert!(RatingRepo::exists_for(&pool, request.id, alice.id)
        .await
        .unwrap());

    // A second rating from the same participant violates the unique
    // constraint; the other participant can still rate.
    let duplicate = RatingRepo::create(
        &pool,
        &CreateRating {
            swap_request_id: request.id,
            from_user_id: alice.id,
            to_user_id: bob.id,
            rating: 4,
            feedback: None,
        },
    )
    .await;
    assert!(duplicate.is_err());

    let reciprocal = RatingRepo::create(
        &pool,
        &CreateRating {
            swap_request_id: request.id,
            from_user_id: bob.id,
            to_user_id: alice.id,
            rating: 4,
            feedback: None,
        },
    )
    .await;
    assert!(reciprocal.is_ok());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rating_aggregate_recomputes_average(pool: PgPool) {
    let (alice, bob, request) = request_between(&pool).await;
    SwapRequestRepo::update_status(
        &pool,
        request.id,
        SwapStatus::Pending.id(),
        SwapStatus::Accepted.id(),
    )
    .await
    .unwrap();
    SwapRequestRepo::update_status(
        &pool,
        request.id,
        SwapStatus::Accepted.id(),
        SwapStatus::Completed.id(),
    )
    .await
    .unwrap();

    RatingRepo::create(
        &pool,
        &CreateRating {
            swap_request_id: request.id,
            from_user_id: alice.id,
            to_user_id: bob.id,
            rating: 4,
            feedback: None,
        },
    )
    .await
    .unwrap();

    let average = RatingRepo::average_for_user(&pool, bob.id).await.unwrap();
    assert_eq!(average, Some(4.0));

    UserRepo::recompute_rating(&pool, bob.id).await.unwrap();
    let profile = UserRepo::find_profile(&pool, bob.id).await.unwrap().unwrap();
    assert!((profile.rating - 4.0).abs() < f64::EPSILON);

    // Nobody has rated Alice yet.
    assert_eq!(RatingRepo::average_for_user(&pool, alice.id).await.unwrap(), None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn total_swaps_increment_covers_both_participants(pool: PgPool) {
    let (alice, bob, _request) = request_between(&pool).await;

    UserRepo::increment_total_swaps(&pool, alice.id, bob.id)
        .await
        .unwrap();

    let alice_profile = UserRepo::find_profile(&pool, alice.id).await.unwrap().unwrap();
    let bob_profile = UserRepo::find_profile(&pool, bob.id).await.unwrap().unwrap();
    assert_eq!(alice_profile.total_swaps, 1);
    assert_eq!(bob_profile.total_swaps, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ratings_list_joins_rater_details(pool: PgPool) {
    let (alice, bob, request) = request_between(&pool).await;
    SwapRequestRepo::update_status(
        &pool,
        request.id,
        SwapStatus::Pending.id(),
        SwapStatus::Accepted.id(),
    )
    .await
    .unwrap();
    SwapRequestRepo::update_status(
        &pool,
        request.id,
        SwapStatus::Accepted.id(),
        SwapStatus::Completed.id(),
    )
    .await
    .unwrap();
    RatingRepo::create(
        &pool,
        &CreateRating {
            swap_request_id: request.id,
            from_user_id: alice.id,
            to_user_id: bob.id,
            rating: 5,
            feedback: Some("Wonderful exchange".to_string()),
        },
    )
    .await
    .unwrap();

    let received = RatingRepo::list_for_user(&pool, bob.id).await.unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].from_name, "Alice");
    assert_eq!(received[0].rating, 5);
    assert_eq!(received[0].feedback.as_deref(), Some("Wonderful exchange"));
}
