//! Persistence: the key-value area and the records kept in it
//!
//! Everything the application remembers lives in a [`KeyValueStore`]: the
//! ticket collection under one key and the session record under another.
//! [`MemoryStore`] is used by tests and [`FileStore`] by the binary.

mod file;
mod kv;
mod repository;
mod session;

pub use file::FileStore;
pub use kv::{KeyValueStore, MemoryStore};
pub use repository::{KvTicketRepository, TICKETS_KEY, TicketRepository};
pub use session::{SESSION_KEY, Session, SessionStore, User};

#[cfg(test)]
pub use kv::MockKeyValueStore;
