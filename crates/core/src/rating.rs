//! Rating bounds and feedback validation.

use crate::error::CoreError;
use crate::swap_lifecycle::{status_name, STATUS_COMPLETED};

/// Lowest rating a participant can give.
pub const MIN_RATING: i16 = 1;

/// Highest rating a participant can give.
pub const MAX_RATING: i16 = 5;

/// Maximum length of the optional free-text feedback.
pub const MAX_FEEDBACK_LEN: usize = 1000;

/// Validate a rating value.
pub fn validate_rating(rating: i16) -> Result<(), CoreError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}"
        )));
    }
    Ok(())
}

/// Validate the optional feedback text.
pub fn validate_feedback(feedback: Option<&str>) -> Result<(), CoreError> {
    if let Some(text) = feedback {
        if text.chars().count() > MAX_FEEDBACK_LEN {
            return Err(CoreError::Validation(format!(
                "Feedback must be no more than {MAX_FEEDBACK_LEN} characters long"
            )));
        }
    }
    Ok(())
}

/// Only completed exchanges can be rated.
pub fn ensure_rateable(status: i16) -> Result<(), CoreError> {
    if status != STATUS_COMPLETED {
        return Err(CoreError::SwapNotCompleted {
            status: status_name(status),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratings_within_bounds_accepted() {
        for value in MIN_RATING..=MAX_RATING {
            assert!(validate_rating(value).is_ok());
        }
    }

    #[test]
    fn ratings_outside_bounds_rejected() {
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
        assert!(validate_rating(-1).is_err());
    }

    #[test]
    fn absent_feedback_is_fine() {
        assert!(validate_feedback(None).is_ok());
    }

    #[test]
    fn overlong_feedback_rejected() {
        let text = "f".repeat(MAX_FEEDBACK_LEN + 1);
        assert!(validate_feedback(Some(&text)).is_err());
        let ok = "f".repeat(MAX_FEEDBACK_LEN);
        assert!(validate_feedback(Some(&ok)).is_ok());
    }

    #[test]
    fn only_completed_swaps_are_rateable() {
        use crate::swap_lifecycle::{
            STATUS_ACCEPTED, STATUS_CANCELLED, STATUS_PENDING, STATUS_REJECTED,
        };

        assert!(ensure_rateable(STATUS_COMPLETED).is_ok());
        for status in [STATUS_PENDING, STATUS_ACCEPTED, STATUS_REJECTED, STATUS_CANCELLED] {
            let result = ensure_rateable(status);
            assert!(matches!(
                result,
                Err(CoreError::SwapNotCompleted { .. })
            ));
        }
    }
}
