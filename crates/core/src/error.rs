use crate::types::DbId;

/// Domain-level error taxonomy shared by the repository and API layers.
///
/// The swap-lifecycle variants (`InvalidTransition`, `NotParticipant`,
/// `AlreadyRated`, `SwapNotCompleted`) carry enough context to render a
/// useful message without another database round trip.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid transition: cannot {action} a {from} request")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },

    #[error("Not a participant: {0}")]
    NotParticipant(String),

    #[error("Swap request {swap_request_id} has already been rated by this user")]
    AlreadyRated { swap_request_id: DbId },

    #[error("Swap request is {status}, not completed; rating is not allowed")]
    SwapNotCompleted { status: &'static str },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
