use crate::error::TicketDeskError;
use serde::Serialize;
use std::fmt;

/// Outcome tone of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient, dismissible message shown after a user action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.kind, NoticeKind::Error)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// User-initiated actions that produce a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    LoadTickets,
    LoadStats,
    Create,
    Update,
    Delete,
    Login,
    Signup,
    Logout,
}

impl Action {
    /// Loads succeed silently; only user mutations announce success
    #[must_use]
    pub const fn success_message(self) -> Option<&'static str> {
        match self {
            Self::LoadTickets | Self::LoadStats => None,
            Self::Create => Some("Ticket created successfully!"),
            Self::Update => Some("Ticket updated successfully!"),
            Self::Delete => Some("Ticket deleted successfully!"),
            Self::Login => Some("Login successful!"),
            Self::Signup => Some("Account created successfully!"),
            Self::Logout => Some("Logged out successfully!"),
        }
    }

    /// Generic retry prompt; causes are not distinguished beyond the action
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::LoadTickets => "Failed to load tickets. Please try again.",
            Self::LoadStats => "Failed to load statistics. Please try again.",
            Self::Create | Self::Update => "Failed to save ticket. Please try again.",
            Self::Delete => "Failed to delete ticket. Please try again.",
            Self::Login => "Login failed. Please try again.",
            Self::Signup => "Registration failed. Please try again.",
            Self::Logout => "Logout failed. Please try again.",
        }
    }

    #[must_use]
    pub fn succeeded(self) -> Option<Notice> {
        self.success_message().map(Notice::success)
    }

    /// Notice for a caught failure
    ///
    /// Credential mismatches keep their own message; everything else gets the
    /// action's generic one.
    #[must_use]
    pub fn failed(self, error: &TicketDeskError) -> Notice {
        match error {
            TicketDeskError::InvalidCredentials => {
                Notice::error("Invalid email or password. Please try again.")
            },
            _ => Notice::error(self.failure_message()),
        }
    }

    /// Wrap a persistence failure in the action's generic message
    ///
    /// Other errors (validation, authentication) pass through unchanged.
    #[must_use]
    pub fn escalate(self, error: TicketDeskError) -> TicketDeskError {
        if !error.is_persistence() || matches!(error, TicketDeskError::ActionFailed { .. }) {
            return error;
        }
        tracing::warn!(action = ?self, error = %error, "action failed");
        TicketDeskError::ActionFailed {
            message: self.failed(&error).message,
            source: Box::new(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_messages_are_generic() {
        let quota = TicketDeskError::QuotaExceeded {
            key: "tickets".to_string(),
            needed: 2,
            limit: 1,
        };
        let io = TicketDeskError::Storage("gone".to_string());

        assert_eq!(Action::Create.failed(&quota), Action::Create.failed(&io));
        assert_eq!(
            Action::Delete.failed(&io).message,
            "Failed to delete ticket. Please try again."
        );
        assert!(Action::LoadTickets.failed(&io).is_error());
    }

    #[test]
    fn test_invalid_credentials_message() {
        let notice = Action::Login.failed(&TicketDeskError::InvalidCredentials);
        assert_eq!(notice.message, "Invalid email or password. Please try again.");
    }

    #[test]
    fn test_escalate_only_wraps_persistence_errors() {
        let wrapped = Action::Update.escalate(TicketDeskError::Storage("gone".to_string()));
        assert_eq!(wrapped.to_string(), "Failed to save ticket. Please try again.");
        assert!(wrapped.is_persistence());

        let passed = Action::Update.escalate(TicketDeskError::NotAuthenticated);
        assert!(matches!(passed, TicketDeskError::NotAuthenticated));
    }

    #[test]
    fn test_success_messages() {
        let notice = Action::Update.succeeded().unwrap();
        assert_eq!(notice.to_string(), "Ticket updated successfully!");
        assert!(!notice.is_error());
        assert!(Action::LoadTickets.succeeded().is_none());
        assert!(Action::LoadStats.succeeded().is_none());
    }
}
