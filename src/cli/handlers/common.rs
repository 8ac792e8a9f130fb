use crate::cli::OutputFormatter;
use crate::config::{Config, LatencyConfig};
use crate::core::Ticket;
use crate::error::Result;
use crate::service::{Action, Authenticator, TicketStore};
use crate::storage::{FileStore, KeyValueStore, KvTicketRepository, Session, SessionStore};
use indicatif::ProgressBar;
use std::sync::Arc;

/// Common context for all handler operations
pub struct HandlerContext {
    store: Arc<dyn KeyValueStore>,
    config: Config,
}

impl HandlerContext {
    /// Open the file-backed store in the configured data directory
    pub fn new(config: Config) -> Self {
        let data_dir = config.data_dir();
        tracing::debug!(data_dir = %data_dir.display(), "opening store");
        let store = FileStore::new(data_dir).with_quota(config.storage.quota_bytes);
        Self::with_store(config, Arc::new(store))
    }

    pub fn with_store(config: Config, store: Arc<dyn KeyValueStore>) -> Self {
        Self { store, config }
    }

    #[must_use]
    pub const fn latency(&self) -> &LatencyConfig {
        &self.config.latency
    }

    #[must_use]
    pub fn sessions(&self) -> SessionStore {
        SessionStore::with_key(self.store.clone(), &self.config.storage.session_key)
    }

    #[must_use]
    pub fn authenticator(&self) -> Authenticator {
        Authenticator::new(self.sessions(), self.config.auth.clone())
            .with_latency(self.config.latency.auth())
    }

    /// The session gate for dashboard and ticket commands
    pub fn require_session(&self) -> Result<Session> {
        self.sessions().require()
    }

    /// A ticket store loaded for this invocation
    ///
    /// Load failures come back as the action's generic failure.
    pub async fn load_tickets(
        &self,
        action: Action,
        output: &OutputFormatter,
    ) -> Result<TicketStore<KvTicketRepository>> {
        let repo = KvTicketRepository::with_key(self.store.clone(), &self.config.storage.tickets_key);
        let mut store = TicketStore::new(repo).with_load_latency(self.config.latency.load());

        let spinner = output.spinner("Loading tickets...", self.config.latency.load());
        let loaded = store.load().await.map(|tickets| tickets.len());
        finish_spinner(spinner);

        let count = loaded.map_err(|e| action.escalate(e))?;
        tracing::debug!(count, "tickets loaded");
        Ok(store)
    }
}

pub(super) fn finish_spinner(spinner: Option<ProgressBar>) {
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
}

/// Print the success notice of `action`, or an object carrying it in JSON mode
pub(super) fn report_success(
    output: &OutputFormatter,
    action: Action,
    fields: serde_json::Value,
) -> Result<()> {
    let notice = action.succeeded();
    if output.is_json() {
        let mut value = serde_json::json!({
            "status": "success",
            "message": notice.as_ref().map(|n| n.message.as_str()),
        });
        if let (Some(object), serde_json::Value::Object(extra)) = (value.as_object_mut(), fields) {
            object.extend(extra);
        }
        output.json(&value)
    } else {
        if let Some(notice) = &notice {
            output.notice(notice);
        }
        Ok(())
    }
}

pub(super) fn report_ticket(output: &OutputFormatter, action: Action, ticket: &Ticket) -> Result<()> {
    report_success(output, action, serde_json::json!({ "ticket": ticket }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use tempfile::TempDir;

    fn config(dir: &TempDir) -> Config {
        let file = dir.path().join("config.toml");
        std::fs::write(
            &file,
            format!(
                "[storage]\ndata_dir = {:?}\n\n[latency]\nload_ms = 0\nauth_ms = 0\n",
                dir.path().join("data")
            ),
        )
        .unwrap();
        Config::load(Some(&file)).unwrap()
    }

    #[tokio::test]
    #[serial_test::serial]
    async fn test_session_gate() {
        let dir = TempDir::new().unwrap();
        let ctx = HandlerContext::with_store(config(&dir), Arc::new(MemoryStore::new()));
        assert!(ctx.require_session().is_err());

        ctx.authenticator()
            .login(&crate::core::LoginForm::new("demo@example.com", "password123"))
            .await
            .unwrap();
        assert_eq!(ctx.require_session().unwrap().user.name, "Demo User");
    }

    #[tokio::test]
    #[serial_test::serial]
    async fn test_file_store_uses_configured_keys() {
        let dir = TempDir::new().unwrap();
        let ctx = HandlerContext::new(config(&dir));
        let output = OutputFormatter::new(true, true);

        let store = ctx.load_tickets(Action::LoadTickets, &output).await.unwrap();
        assert!(store.list().is_empty());

        ctx.authenticator()
            .login(&crate::core::LoginForm::new("demo@example.com", "password123"))
            .await
            .unwrap();
        assert!(dir.path().join("data").join("ticketapp_session.json").exists());
    }
}
