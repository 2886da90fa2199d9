//! Skill naming rules and listing directions.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Category assigned to skills created lazily on first reference.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Maximum length of a skill name.
pub const MAX_SKILL_NAME_LEN: usize = 100;

/// Whether a user lists a skill as something they teach or something they
/// want to learn. A user may list the same skill in both directions, but
/// never twice in the same direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Offered,
    Wanted,
}

impl Direction {
    /// The value stored in the `user_skills.direction` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Offered => "offered",
            Direction::Wanted => "wanted",
        }
    }
}

/// Validate a skill name before lookup or creation.
///
/// Names are matched case-sensitively, so leading/trailing whitespace would
/// silently split one skill into several; reject it outright.
pub fn validate_skill_name(name: &str) -> Result<(), CoreError> {
    if name.is_empty() {
        return Err(CoreError::Validation("Skill name must not be empty".to_string()));
    }
    if name.trim() != name {
        return Err(CoreError::Validation(
            "Skill name must not have leading or trailing whitespace".to_string(),
        ));
    }
    if name.chars().count() > MAX_SKILL_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Skill name must be no more than {MAX_SKILL_NAME_LEN} characters long"
        )));
    }
    Ok(())
}
