use super::KeyValueStore;
use crate::error::{Result, TicketDeskError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default key holding the session record
pub const SESSION_KEY: &str = "ticketapp_session";

/// The signed-in principal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub name: String,
}

/// Locally persisted marker of the current user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Reads and writes the session record
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, SESSION_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The stored session, if present and parsable
    ///
    /// Read failures count as "no session".
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to read session");
                return None;
            },
        };

        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "stored session is malformed");
                None
            },
        }
    }

    /// The current session, or [`TicketDeskError::NotAuthenticated`]
    pub fn require(&self) -> Result<Session> {
        self.current().ok_or(TicketDeskError::NotAuthenticated)
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        let raw = serde_json::to_string(session)?;
        self.store.set(&self.key, &raw)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(&self.key)
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("store", &"Arc<dyn KeyValueStore>")
            .field("key", &self.key)
            .finish()
    }
}
