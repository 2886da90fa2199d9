//! Well-known admin action and platform message constants.
//!
//! These must match the values stored in the `admin_actions.action` and
//! `admin_messages.message_type` columns.

/// An administrator banned a user.
pub const ACTION_BAN_USER: &str = "ban_user";

/// An administrator lifted a ban.
pub const ACTION_UNBAN_USER: &str = "unban_user";

/// An administrator published a platform-wide message.
pub const ACTION_SEND_MESSAGE: &str = "send_message";

/// Informational platform message.
pub const MESSAGE_TYPE_INFO: &str = "info";

/// Warning banner.
pub const MESSAGE_TYPE_WARNING: &str = "warning";

/// Scheduled maintenance announcement.
pub const MESSAGE_TYPE_MAINTENANCE: &str = "maintenance";

/// New feature announcement.
pub const MESSAGE_TYPE_FEATURE: &str = "feature";

/// All valid platform message types.
pub const VALID_MESSAGE_TYPES: &[&str] = &[
    MESSAGE_TYPE_INFO,
    MESSAGE_TYPE_WARNING,
    MESSAGE_TYPE_MAINTENANCE,
    MESSAGE_TYPE_FEATURE,
];

/// Validate that a platform message type is one of the accepted values.
pub fn validate_message_type(message_type: &str) -> Result<(), String> {
    if VALID_MESSAGE_TYPES.contains(&message_type) {
        Ok(())
    } else {
        Err(format!(
            "Invalid message type '{message_type}'. Must be one of: {}",
            VALID_MESSAGE_TYPES.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_types_accepted() {
        for t in VALID_MESSAGE_TYPES {
            assert!(validate_message_type(t).is_ok());
        }
    }

    #[test]
    fn unknown_type_rejected() {
        let result = validate_message_type("urgent");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid message type"));
    }
}
