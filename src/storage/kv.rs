use crate::error::{Result, TicketDeskError};
use std::collections::HashMap;
use std::sync::RwLock;

/// String-keyed persistent area, the only datastore the application has
///
/// Implementations replace values wholesale; there are no partial writes.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    /// Reads a value, `None` when the key is absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`; removing an absent key succeeds
    fn remove(&self, key: &str) -> Result<()>;
}

/// Volatile store backed by a `HashMap`
///
/// An optional byte quota over all stored values mimics the limit of a
/// browser's local storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    fn poisoned() -> TicketDeskError {
        TicketDeskError::Storage("memory store lock poisoned".to_string())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().map_err(|_| Self::poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| Self::poisoned())?;

        if let Some(limit) = self.quota_bytes {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > limit {
                return Err(TicketDeskError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| Self::poisoned())?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("tickets").unwrap(), None);

        store.set("tickets", "[]").unwrap();
        assert_eq!(store.get("tickets").unwrap().as_deref(), Some("[]"));

        store.set("tickets", "[1]").unwrap();
        assert_eq!(store.get("tickets").unwrap().as_deref(), Some("[1]"));

        store.remove("tickets").unwrap();
        store.remove("tickets").unwrap();
        assert_eq!(store.get("tickets").unwrap(), None);
    }

    #[test]
    fn test_quota_exceeded_keeps_previous_value() {
        let store = MemoryStore::with_quota(16);
        store.set("k", "short").unwrap();

        let err = store.set("k", "this value is far too long").unwrap_err();
        assert!(matches!(err, TicketDeskError::QuotaExceeded { limit: 16, .. }));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("short"));
    }

    #[test]
    fn test_quota_counts_other_keys() {
        let store = MemoryStore::with_quota(12);
        store.set("a", "12345").unwrap();
        // replacing the same key only counts the new value
        store.set("a", "1234567890").unwrap();
        assert!(store.set("b", "12345").is_err());
    }
}
