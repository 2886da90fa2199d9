//! Swap request lifecycle state machine.
//!
//! A swap request starts `pending` and moves through the table below. Every
//! mutation is tied to an acting participant: the recipient decides
//! accept/reject, the requester may cancel, and either side may mark an
//! accepted exchange completed. Anything else is an invalid transition.
//!
//! This module lives in `core` (zero internal deps) so it can be used by
//! both the API layer and the repository integration tests.

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Status IDs matching the `swap_request_statuses` seed data (1-based
/// SMALLSERIAL). Intentionally duplicated from the `db` crate's
/// `SwapStatus` enum because `core` must have zero internal deps.
pub const STATUS_PENDING: i16 = 1;
pub const STATUS_ACCEPTED: i16 = 2;
pub const STATUS_REJECTED: i16 = 3;
pub const STATUS_COMPLETED: i16 = 4;
pub const STATUS_CANCELLED: i16 = 5;

/// Minimum length of the introduction message, in characters after trimming.
pub const MIN_MESSAGE_LEN: usize = 20;

/// Maximum length of the introduction message.
pub const MAX_MESSAGE_LEN: usize = 1000;

/// Human-readable name for a status ID (for error messages and payloads).
pub fn status_name(id: i16) -> &'static str {
    match id {
        STATUS_PENDING => "pending",
        STATUS_ACCEPTED => "accepted",
        STATUS_REJECTED => "rejected",
        STATUS_COMPLETED => "completed",
        STATUS_CANCELLED => "cancelled",
        _ => "unknown",
    }
}

/// Whether a status admits no further transitions.
pub fn is_terminal(status: i16) -> bool {
    matches!(status, STATUS_REJECTED | STATUS_COMPLETED | STATUS_CANCELLED)
}

/// Returns the set of valid target status IDs reachable from `from_status`.
///
/// Terminal states return an empty slice because no further transitions are
/// allowed; a request is never resurrected.
pub fn valid_transitions(from_status: i16) -> &'static [i16] {
    match from_status {
        STATUS_PENDING => &[STATUS_ACCEPTED, STATUS_REJECTED, STATUS_CANCELLED],
        STATUS_ACCEPTED => &[STATUS_COMPLETED],
        _ => &[],
    }
}

/// Check whether a transition from `from` to `to` is valid, ignoring actors.
pub fn can_transition(from: i16, to: i16) -> bool {
    valid_transitions(from).contains(&to)
}

// ---------------------------------------------------------------------------
// Actors and actions
// ---------------------------------------------------------------------------

/// Which side of a swap request a user is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    /// The user who sent the request (`from_user_id`).
    Requester,
    /// The user the request was sent to (`to_user_id`).
    Recipient,
}

/// A lifecycle action a participant can take on an existing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapAction {
    Accept,
    Reject,
    Cancel,
    Complete,
}

impl SwapAction {
    /// Lowercase verb used in error messages and event payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            SwapAction::Accept => "accept",
            SwapAction::Reject => "reject",
            SwapAction::Cancel => "cancel",
            SwapAction::Complete => "complete",
        }
    }

    /// The status the request must currently be in for this action.
    pub fn required_status(self) -> i16 {
        match self {
            SwapAction::Accept | SwapAction::Reject | SwapAction::Cancel => STATUS_PENDING,
            SwapAction::Complete => STATUS_ACCEPTED,
        }
    }

    /// The status the request moves to when this action succeeds.
    pub fn target_status(self) -> i16 {
        match self {
            SwapAction::Accept => STATUS_ACCEPTED,
            SwapAction::Reject => STATUS_REJECTED,
            SwapAction::Cancel => STATUS_CANCELLED,
            SwapAction::Complete => STATUS_COMPLETED,
        }
    }

    /// Whether the given side of the request may take this action.
    pub fn allowed_for(self, party: Party) -> bool {
        match self {
            SwapAction::Accept | SwapAction::Reject => party == Party::Recipient,
            SwapAction::Cancel => party == Party::Requester,
            SwapAction::Complete => true,
        }
    }
}

/// Resolve which side of a request a user is on, if any.
pub fn party_of(user_id: DbId, from_user_id: DbId, to_user_id: DbId) -> Option<Party> {
    if user_id == from_user_id {
        Some(Party::Requester)
    } else if user_id == to_user_id {
        Some(Party::Recipient)
    } else {
        None
    }
}

/// Validate one actor applying one action to a request in `current_status`.
///
/// Returns the target status ID on success. Authorization is checked before
/// state: a non-participant (or a participant acting from the wrong side)
/// gets [`CoreError::NotParticipant`] regardless of the stored status, and
/// only then is the transition itself validated.
pub fn apply(
    current_status: i16,
    action: SwapAction,
    user_id: DbId,
    from_user_id: DbId,
    to_user_id: DbId,
) -> Result<i16, CoreError> {
    let party = party_of(user_id, from_user_id, to_user_id).ok_or_else(|| {
        CoreError::NotParticipant(format!("user {user_id} is not part of this swap request"))
    })?;

    if !action.allowed_for(party) {
        let side = match party {
            Party::Requester => "requester",
            Party::Recipient => "recipient",
        };
        return Err(CoreError::NotParticipant(format!(
            "the {side} may not {} this swap request",
            action.as_str()
        )));
    }

    if current_status != action.required_status() {
        return Err(CoreError::InvalidTransition {
            from: status_name(current_status),
            action: action.as_str(),
        });
    }

    Ok(action.target_status())
}

// ---------------------------------------------------------------------------
// Creation preconditions
// ---------------------------------------------------------------------------

/// Validate the introduction message attached to a new request.
///
/// Length is measured on the trimmed message, matching what the user
/// actually submitted rather than surrounding whitespace.
pub fn validate_message(message: &str) -> Result<(), CoreError> {
    let len = message.trim().chars().count();
    if len < MIN_MESSAGE_LEN {
        return Err(CoreError::Validation(format!(
            "Message must be at least {MIN_MESSAGE_LEN} characters long"
        )));
    }
    if len > MAX_MESSAGE_LEN {
        return Err(CoreError::Validation(format!(
            "Message must be no more than {MAX_MESSAGE_LEN} characters long"
        )));
    }
    Ok(())
}

/// Validate the participant pair for a new request.
pub fn validate_participants(from_user_id: DbId, to_user_id: DbId) -> Result<(), CoreError> {
    if from_user_id == to_user_id {
        return Err(CoreError::Validation(
            "Cannot send a swap request to yourself".to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const ALL_STATUSES: [i16; 5] = [
        STATUS_PENDING,
        STATUS_ACCEPTED,
        STATUS_REJECTED,
        STATUS_COMPLETED,
        STATUS_CANCELLED,
    ];

    const ALL_ACTIONS: [SwapAction; 4] = [
        SwapAction::Accept,
        SwapAction::Reject,
        SwapAction::Cancel,
        SwapAction::Complete,
    ];

    const FROM_USER: DbId = 10;
    const TO_USER: DbId = 20;
    const STRANGER: DbId = 30;

    /// The user that is allowed to perform a given action.
    fn actor_for(action: SwapAction) -> DbId {
        match action {
            SwapAction::Accept | SwapAction::Reject | SwapAction::Complete => TO_USER,
            SwapAction::Cancel => FROM_USER,
        }
    }

    // -----------------------------------------------------------------------
    // Legal transitions
    // -----------------------------------------------------------------------

    #[test]
    fn recipient_accepts_pending() {
        let next = apply(STATUS_PENDING, SwapAction::Accept, TO_USER, FROM_USER, TO_USER);
        assert_eq!(next.unwrap(), STATUS_ACCEPTED);
    }

    #[test]
    fn recipient_rejects_pending() {
        let next = apply(STATUS_PENDING, SwapAction::Reject, TO_USER, FROM_USER, TO_USER);
        assert_eq!(next.unwrap(), STATUS_REJECTED);
    }

    #[test]
    fn requester_cancels_pending() {
        let next = apply(STATUS_PENDING, SwapAction::Cancel, FROM_USER, FROM_USER, TO_USER);
        assert_eq!(next.unwrap(), STATUS_CANCELLED);
    }

    #[test]
    fn either_participant_completes_accepted() {
        let by_requester = apply(
            STATUS_ACCEPTED,
            SwapAction::Complete,
            FROM_USER,
            FROM_USER,
            TO_USER,
        );
        assert_eq!(by_requester.unwrap(), STATUS_COMPLETED);

        let by_recipient = apply(
            STATUS_ACCEPTED,
            SwapAction::Complete,
            TO_USER,
            FROM_USER,
            TO_USER,
        );
        assert_eq!(by_recipient.unwrap(), STATUS_COMPLETED);
    }

    // -----------------------------------------------------------------------
    // Totality: every other (status, action) pair is rejected
    // -----------------------------------------------------------------------

    #[test]
    fn transition_table_is_total() {
        for status in ALL_STATUSES {
            for action in ALL_ACTIONS {
                let result = apply(status, action, actor_for(action), FROM_USER, TO_USER);
                if status == action.required_status() {
                    assert!(
                        result.is_ok(),
                        "{} on {} should succeed",
                        action.as_str(),
                        status_name(status)
                    );
                } else {
                    assert_matches!(
                        result,
                        Err(CoreError::InvalidTransition { .. }),
                        "{} on {} should be an invalid transition",
                        action.as_str(),
                        status_name(status)
                    );
                }
            }
        }
    }

    #[test]
    fn double_accept_is_invalid_transition() {
        let first = apply(STATUS_PENDING, SwapAction::Accept, TO_USER, FROM_USER, TO_USER);
        let status = first.unwrap();
        let second = apply(status, SwapAction::Accept, TO_USER, FROM_USER, TO_USER);
        assert_matches!(second, Err(CoreError::InvalidTransition { from, action }) => {
            assert_eq!(from, "accepted");
            assert_eq!(action, "accept");
        });
    }

    #[test]
    fn terminal_statuses_have_no_transitions() {
        for status in [STATUS_REJECTED, STATUS_COMPLETED, STATUS_CANCELLED] {
            assert!(is_terminal(status));
            assert!(valid_transitions(status).is_empty());
        }
        assert!(!is_terminal(STATUS_PENDING));
        assert!(!is_terminal(STATUS_ACCEPTED));
    }

    // -----------------------------------------------------------------------
    // Actor constraints
    // -----------------------------------------------------------------------

    #[test]
    fn requester_may_not_accept_own_request() {
        let result = apply(STATUS_PENDING, SwapAction::Accept, FROM_USER, FROM_USER, TO_USER);
        assert_matches!(result, Err(CoreError::NotParticipant(_)));
    }

    #[test]
    fn recipient_may_not_cancel() {
        let result = apply(STATUS_PENDING, SwapAction::Cancel, TO_USER, FROM_USER, TO_USER);
        assert_matches!(result, Err(CoreError::NotParticipant(_)));
    }

    #[test]
    fn stranger_is_rejected_for_every_action() {
        for status in ALL_STATUSES {
            for action in ALL_ACTIONS {
                let result = apply(status, action, STRANGER, FROM_USER, TO_USER);
                assert_matches!(result, Err(CoreError::NotParticipant(_)));
            }
        }
    }

    #[test]
    fn authorization_is_checked_before_state() {
        // Wrong actor on a terminal request: the actor error wins.
        let result = apply(STATUS_COMPLETED, SwapAction::Cancel, TO_USER, FROM_USER, TO_USER);
        assert_matches!(result, Err(CoreError::NotParticipant(_)));
    }

    #[test]
    fn party_of_resolves_both_sides() {
        assert_eq!(party_of(FROM_USER, FROM_USER, TO_USER), Some(Party::Requester));
        assert_eq!(party_of(TO_USER, FROM_USER, TO_USER), Some(Party::Recipient));
        assert_eq!(party_of(STRANGER, FROM_USER, TO_USER), None);
    }

    // -----------------------------------------------------------------------
    // Creation preconditions
    // -----------------------------------------------------------------------

    #[test]
    fn message_below_minimum_is_rejected() {
        let result = validate_message("too short");
        assert_matches!(result, Err(CoreError::Validation(msg)) => {
            assert!(msg.contains("at least 20"));
        });
    }

    #[test]
    fn message_at_boundaries_is_accepted() {
        assert!(validate_message(&"x".repeat(MIN_MESSAGE_LEN)).is_ok());
        assert!(validate_message(&"x".repeat(MAX_MESSAGE_LEN)).is_ok());
    }

    #[test]
    fn message_above_maximum_is_rejected() {
        let result = validate_message(&"x".repeat(MAX_MESSAGE_LEN + 1));
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn message_length_ignores_surrounding_whitespace() {
        // 19 visible characters padded with whitespace still fails.
        let padded = format!("   {}   ", "x".repeat(MIN_MESSAGE_LEN - 1));
        assert_matches!(validate_message(&padded), Err(CoreError::Validation(_)));
    }

    #[test]
    fn self_request_is_rejected() {
        let result = validate_participants(FROM_USER, FROM_USER);
        assert_matches!(result, Err(CoreError::Validation(_)));
        assert!(validate_participants(FROM_USER, TO_USER).is_ok());
    }
}
