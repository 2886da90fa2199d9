//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod admin_action_repo;
pub mod admin_message_repo;
pub mod rating_repo;
pub mod role_repo;
pub mod session_repo;
pub mod skill_repo;
pub mod swap_request_repo;
pub mod user_repo;
pub mod user_skill_repo;

pub use admin_action_repo::AdminActionRepo;
pub use admin_message_repo::AdminMessageRepo;
pub use rating_repo::RatingRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use skill_repo::SkillRepo;
pub use swap_request_repo::SwapRequestRepo;
pub use user_repo::UserRepo;
pub use user_skill_repo::UserSkillRepo;
