//! Integration tests for the skill directory and per-user skill listings.
//!
//! Exercises the repository layer against a real database:
//! - Lazy skill creation and lookup idempotence
//! - Idempotent add / no-op remove of user skill entries
//! - Direction grouping for profile views

use skillswap_core::roles::ROLE_MEMBER;
use skillswap_core::skill::{Direction, DEFAULT_CATEGORY};
use sqlx::PgPool;

use skillswap_db::models::user::{CreateUser, User};
use skillswap_db::repositories::{RoleRepo, SkillRepo, UserRepo, UserSkillRepo};

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

// ---------------------------------------------------------------------------
// Skill directory
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn resolve_or_create_is_idempotent(pool: PgPool) {
    let first = SkillRepo::resolve_or_create(&pool, "Guitar").await.unwrap();
    let second = SkillRepo::resolve_or_create(&pool, "Guitar").await.unwrap();
    assert_eq!(first, second);

    let skill = SkillRepo::find_by_id(&pool, first).await.unwrap().unwrap();
    assert_eq!(skill.name, "Guitar");
    assert_eq!(skill.category, DEFAULT_CATEGORY);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn lookup_is_case_sensitive(pool: PgPool) {
    let lower = SkillRepo::resolve_or_create(&pool, "guitar").await.unwrap();
    let upper = SkillRepo::resolve_or_create(&pool, "Guitar").await.unwrap();
    assert_ne!(lower, upper);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn id_for_missing_skill_is_none(pool: PgPool) {
    let found = SkillRepo::id_for(&pool, "Nonexistent").await.unwrap();
    assert!(found.is_none());
}

// ---------------------------------------------------------------------------
// User skill entries
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_is_idempotent(pool: PgPool) {
    let user = create_member(&pool, "alice@example.com", "Alice").await;
    let skill_id = SkillRepo::resolve_or_create(&pool, "Guitar").await.unwrap();

    let inserted = UserSkillRepo::add(&pool, user.id, skill_id, Direction::Offered)
        .await
        .unwrap();
    assert!(inserted);

    let second = UserSkillRepo::add(&pool, user.id, skill_id, Direction::Offered)
        .await
        .unwrap();
    assert!(!second, "duplicate add must be a no-op");

    let set = UserSkillRepo::list_for(&pool, user.id).await.unwrap();
    assert_eq!(set.offered, vec!["Guitar"]);
    assert!(set.wanted.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn same_skill_in_both_directions_is_allowed(pool: PgPool) {
    let user = create_member(&pool, "alice@example.com", "Alice").await;
    let skill_id = SkillRepo::resolve_or_create(&pool, "Spanish").await.unwrap();

    assert!(UserSkillRepo::add(&pool, user.id, skill_id, Direction::Offered)
        .await
        .unwrap());
    assert!(UserSkillRepo::add(&pool, user.id, skill_id, Direction::Wanted)
        .await
        .unwrap());

    let set = UserSkillRepo::list_for(&pool, user.id).await.unwrap();
    assert_eq!(set.offered, vec!["Spanish"]);
    assert_eq!(set.wanted, vec!["Spanish"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn remove_missing_entry_is_noop(pool: PgPool) {
    let user = create_member(&pool, "alice@example.com", "Alice").await;
    let skill_id = SkillRepo::resolve_or_create(&pool, "Guitar").await.unwrap();

    let removed = UserSkillRepo::remove(&pool, user.id, skill_id, Direction::Wanted)
        .await
        .unwrap();
    assert!(!removed, "removing an absent entry is not an error");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn remove_only_touches_the_named_direction(pool: PgPool) {
    let user = create_member(&pool, "alice@example.com", "Alice").await;
    let skill_id = SkillRepo::resolve_or_create(&pool, "Spanish").await.unwrap();
    UserSkillRepo::add(&pool, user.id, skill_id, Direction::Offered)
        .await
        .unwrap();
    UserSkillRepo::add(&pool, user.id, skill_id, Direction::Wanted)
        .await
        .unwrap();

    let removed = UserSkillRepo::remove(&pool, user.id, skill_id, Direction::Offered)
        .await
        .unwrap();
    assert!(removed);

    let set = UserSkillRepo::list_for(&pool, user.id).await.unwrap();
    assert!(set.offered.is_empty());
    assert_eq!(set.wanted, vec!["Spanish"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn named_entries_cover_multiple_users(pool: PgPool) {
    let alice = create_member(&pool, "alice@example.com", "Alice").await;
    let bob = create_member(&pool, "bob@example.com", "Bob").await;
    let guitar = SkillRepo::resolve_or_create(&pool, "Guitar").await.unwrap();
    let spanish = SkillRepo::resolve_or_create(&pool, "Spanish").await.unwrap();

    UserSkillRepo::add(&pool, alice.id, guitar, Direction::Offered)
        .await
        .unwrap();
    UserSkillRepo::add(&pool, bob.id, spanish, Direction::Offered)
        .await
        .unwrap();

    let rows = UserSkillRepo::list_named_for_users(&pool, &[alice.id, bob.id])
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows
        .iter()
        .any(|r| r.user_id == alice.id && r.skill_name == "Guitar" && r.direction == "offered"));
    assert!(rows
        .iter()
        .any(|r| r.user_id == bob.id && r.skill_name == "Spanish" && r.direction == "offered"));
}
