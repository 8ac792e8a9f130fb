use super::KeyValueStore;
use crate::core::Ticket;
use crate::error::Result;
use std::sync::Arc;

/// Default key holding the serialized ticket collection
pub const TICKETS_KEY: &str = "tickets";

/// Repository trait for ticket storage operations
///
/// The collection is always read and written as a whole.
pub trait TicketRepository: Send + Sync {
    /// Loads the full collection in stored order
    ///
    /// An absent or unparsable stored value yields an empty collection, and
    /// records that do not decode as tickets are skipped. Only failures of
    /// the backend itself are errors.
    fn load_all(&self) -> Result<Vec<Ticket>>;

    /// Replaces the stored collection
    fn save_all(&self, tickets: &[Ticket]) -> Result<()>;
}

/// Ticket repository storing a JSON array under one key
#[derive(Clone)]
pub struct KvTicketRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl KvTicketRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, TICKETS_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }
}

impl std::fmt::Debug for KvTicketRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KvTicketRepository")
            .field("store", &"Arc<dyn KeyValueStore>")
            .field("key", &self.key)
            .finish()
    }
}

impl TicketRepository for KvTicketRepository {
    fn load_all(&self) -> Result<Vec<Ticket>> {
        let Some(raw) = self.store.get(&self.key)? else {
            tracing::debug!(key = %self.key, "no stored tickets");
            return Ok(Vec::new());
        };

        let records = match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "stored tickets are malformed, treating as empty");
                return Ok(Vec::new());
            },
        };

        let total = records.len();
        let tickets: Vec<Ticket> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value::<Ticket>(record) {
                Ok(ticket) => Some(ticket),
                Err(e) => {
                    tracing::warn!(key = %self.key, index, error = %e, "skipping malformed ticket record");
                    None
                },
            })
            .collect();

        tracing::debug!(
            key = %self.key,
            count = tickets.len(),
            skipped = total - tickets.len(),
            "loaded tickets"
        );
        Ok(tickets)
    }

    fn save_all(&self, tickets: &[Ticket]) -> Result<()> {
        let raw = serde_json::to_string(tickets)?;
        self.store.set(&self.key, &raw)?;
        tracing::debug!(key = %self.key, count = tickets.len(), "saved tickets");
        Ok(())
    }
}
