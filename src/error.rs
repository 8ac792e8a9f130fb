//! Error types for ticket-desk
//!
//! All fallible operations in the crate return [`Result`], whose error side is
//! [`TicketDeskError`]. The binary turns these into user-facing messages via
//! [`TicketDeskError::user_message`] and [`TicketDeskError::suggestions`].

use crate::core::ValidationErrors;
use thiserror::Error;

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, TicketDeskError>;

/// Main error type for ticket-desk
#[derive(Error, Debug)]
pub enum TicketDeskError {
    /// I/O errors from the file-backed store or the terminal
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A write would exceed the storage quota
    #[error("Storage quota exceeded while writing '{key}' ({needed} bytes, limit {limit})")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },

    /// The storage backend is unavailable or misbehaving
    #[error("Storage error: {0}")]
    Storage(String),

    /// Storage keys are restricted to a safe character set
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// One or more form fields failed validation
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Login credentials did not match the demo account
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// No parsable session is stored
    #[error("Not logged in")]
    NotAuthenticated,

    /// Ticket lookup by the front end failed
    #[error("Ticket not found: {id}")]
    TicketNotFound { id: String },

    /// Unknown status text
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    /// Unknown priority text
    #[error("Invalid priority: {0}")]
    InvalidPriority(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Interactive prompt failed
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// A user action failed on persistence; carries the notice text
    #[error("{message}")]
    ActionFailed {
        message: String,
        #[source]
        source: Box<TicketDeskError>,
    },

    #[error("{0}")]
    Custom(String),
}

impl TicketDeskError {
    /// Create a custom error with a message
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    /// Whether this error came from reading or writing persisted state
    #[must_use]
    pub const fn is_persistence(&self) -> bool {
        matches!(
            self,
            Self::Io(_)
                | Self::Serialization(_)
                | Self::QuotaExceeded { .. }
                | Self::Storage(_)
                | Self::ActionFailed { .. }
        )
    }

    /// Whether retrying the same action might succeed
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Io(_)
                | Self::QuotaExceeded { .. }
                | Self::Storage(_)
                | Self::ActionFailed { .. }
                | Self::Validation(_)
                | Self::InvalidCredentials
                | Self::NotAuthenticated
        )
    }

    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Message suitable for showing to the user
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotAuthenticated => "You are not logged in.".to_string(),
            Self::InvalidCredentials => "Invalid email or password. Please try again.".to_string(),
            Self::Validation(errors) => {
                let mut message = "Please fix the following:".to_string();
                for (field, problem) in errors.iter() {
                    message.push_str(&format!("\n  {field}: {problem}"));
                }
                message
            },
            Self::QuotaExceeded { .. } => "Local storage is full.".to_string(),
            _ => self.to_string(),
        }
    }

    /// Hints for resolving the error
    #[must_use]
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NotAuthenticated => vec![
                "Run 'ticket-desk login' to sign in".to_string(),
                "Run 'ticket-desk signup' to create an account".to_string(),
            ],
            Self::InvalidCredentials => {
                vec!["The demo account is demo@example.com / password123".to_string()]
            },
            Self::TicketNotFound { .. } => {
                vec!["Run 'ticket-desk ticket list' to see ticket IDs".to_string()]
            },
            Self::QuotaExceeded { .. } => vec![
                "Delete closed tickets to free space".to_string(),
                "Raise storage.quota_bytes in the configuration".to_string(),
            ],
            Self::InvalidStatus(_) => {
                vec!["Valid statuses: open, in_progress, closed".to_string()]
            },
            Self::InvalidPriority(_) => vec!["Valid priorities: low, medium, high".to_string()],
            Self::ActionFailed { source, .. } => source.suggestions(),
            Self::Config(_) => vec!["Check config.toml and TICKET_DESK__* variables".to_string()],
            _ => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistence_classification() {
        let quota = TicketDeskError::QuotaExceeded {
            key: "tickets".to_string(),
            needed: 10,
            limit: 5,
        };
        assert!(quota.is_persistence());
        assert!(quota.is_recoverable());
        assert!(!TicketDeskError::NotAuthenticated.is_persistence());
        assert!(!TicketDeskError::InvalidStatus("x".into()).is_recoverable());
    }

    #[test]
    fn test_suggestions() {
        assert_eq!(TicketDeskError::NotAuthenticated.suggestions().len(), 2);
        assert!(TicketDeskError::custom("boom").suggestions().is_empty());
    }

    #[test]
    fn test_user_message() {
        assert_eq!(
            TicketDeskError::NotAuthenticated.user_message(),
            "You are not logged in."
        );
        assert_eq!(TicketDeskError::custom("boom").user_message(), "boom");
    }
}
