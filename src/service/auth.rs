//! Mock authentication
//!
//! There is no account registry. Login succeeds only for the configured demo
//! account; signup accepts any valid form. Both just write a session record.

use crate::core::{Clock, LoginForm, SignupForm, SystemClock};
use crate::error::{Result, TicketDeskError};
use crate::storage::{Session, SessionStore, User};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// The single hard-coded credential
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DemoAccount {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl Default for DemoAccount {
    fn default() -> Self {
        Self {
            email: "demo@example.com".to_string(),
            password: "password123".to_string(),
            name: "Demo User".to_string(),
        }
    }
}

pub struct Authenticator {
    sessions: SessionStore,
    account: DemoAccount,
    clock: Arc<dyn Clock>,
    latency: Duration,
}

impl Authenticator {
    pub fn new(sessions: SessionStore, account: DemoAccount) -> Self {
        Self {
            sessions,
            account,
            clock: Arc::new(SystemClock),
            latency: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Artificial delay applied to login and signup
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    #[must_use]
    pub const fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub async fn login(&self, form: &LoginForm) -> Result<Session> {
        let errors = form.errors();
        if !errors.is_empty() {
            return Err(TicketDeskError::Validation(errors));
        }
        self.simulate_latency().await;

        if form.email != self.account.email || form.password != self.account.password {
            tracing::info!(email = %form.email, "login rejected");
            return Err(TicketDeskError::InvalidCredentials);
        }

        let session = self.issue(User {
            email: form.email.clone(),
            name: self.account.name.clone(),
        })?;
        tracing::info!(email = %session.user.email, "logged in");
        Ok(session)
    }

    pub async fn signup(&self, form: &SignupForm) -> Result<Session> {
        let errors = form.errors();
        if !errors.is_empty() {
            return Err(TicketDeskError::Validation(errors));
        }
        self.simulate_latency().await;

        let session = self.issue(User {
            email: form.email.clone(),
            name: form.name.trim().to_string(),
        })?;
        tracing::info!(email = %session.user.email, "signed up");
        Ok(session)
    }

    pub fn logout(&self) -> Result<()> {
        self.sessions.clear()?;
        tracing::info!("logged out");
        Ok(())
    }

    fn issue(&self, user: User) -> Result<Session> {
        let session = Session {
            user,
            token: format!("mock-jwt-token-{}", self.clock.now().timestamp_millis()),
        };
        self.sessions.save(&session)?;
        Ok(session)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::test_utils::ManualClock;

    fn authenticator() -> Authenticator {
        let sessions = SessionStore::new(Arc::new(MemoryStore::new()));
        Authenticator::new(sessions, DemoAccount::default())
            .with_clock(Arc::new(ManualClock::default()))
    }

    #[tokio::test]
    async fn test_login_with_demo_account() {
        let auth = authenticator();
        let session = auth
            .login(&LoginForm::new("demo@example.com", "password123"))
            .await
            .unwrap();

        assert_eq!(session.user.name, "Demo User");
        assert_eq!(
            session.token,
            format!("mock-jwt-token-{}", ManualClock::start().timestamp_millis())
        );
        assert_eq!(auth.sessions().current(), Some(session));
    }

    #[tokio::test]
    async fn test_wrong_password_writes_no_session() {
        let auth = authenticator();
        let err = auth
            .login(&LoginForm::new("demo@example.com", "wrong-password"))
            .await
            .unwrap_err();

        assert!(matches!(err, TicketDeskError::InvalidCredentials));
        assert!(auth.sessions().current().is_none());
    }

    #[tokio::test]
    async fn test_invalid_login_form() {
        let auth = authenticator();
        let err = auth.login(&LoginForm::new("demo", "")).await.unwrap_err();

        let TicketDeskError::Validation(errors) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(errors.get("email"), Some("Email is invalid"));
        assert_eq!(errors.get("password"), Some("Password is required"));
    }

    #[tokio::test]
    async fn test_signup_then_logout() {
        let auth = authenticator();
        let form = SignupForm {
            name: "  Ada Lovelace ".to_string(),
            email: "ada@example.com".to_string(),
            password: "engine1".to_string(),
            confirm_password: "engine1".to_string(),
        };

        let session = auth.signup(&form).await.unwrap();
        assert_eq!(session.user.name, "Ada Lovelace");
        assert!(auth.sessions().require().is_ok());

        auth.logout().unwrap();
        assert!(auth.sessions().require().is_err());
        // logging out twice is harmless
        auth.logout().unwrap();
    }

    #[tokio::test]
    async fn test_custom_demo_account() {
        let sessions = SessionStore::new(Arc::new(MemoryStore::new()));
        let auth = Authenticator::new(
            sessions,
            DemoAccount {
                email: "ops@example.com".to_string(),
                password: "hunter22".to_string(),
                name: "Ops".to_string(),
            },
        );

        assert!(
            auth.login(&LoginForm::new("demo@example.com", "password123"))
                .await
                .is_err()
        );
        let session = auth
            .login(&LoginForm::new("ops@example.com", "hunter22"))
            .await
            .unwrap();
        assert_eq!(session.user.name, "Ops");
    }
}
