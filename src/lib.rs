//! ticket-desk - a local, single-user ticket tracker
//!
//! The crate provides:
//! - Ticket records with validated forms and status statistics
//! - A mock sign-in that persists a session record
//! - Pluggable key-value storage (in-memory or one JSON file per key)
//!
//! Every ticket mutation reads the whole collection, transforms it, and
//! writes it back. A failed write leaves the loaded collection as it was.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ticket_desk::core::{Priority, TicketForm};
//! use ticket_desk::service::TicketStore;
//! use ticket_desk::storage::{KvTicketRepository, MemoryStore};
//!
//! let mut store = TicketStore::new(KvTicketRepository::new(Arc::new(MemoryStore::new())));
//! store.load().await?;
//!
//! let form = TicketForm {
//!     title: "Fix login bug".to_string(),
//!     priority: Priority::High,
//!     ..TicketForm::default()
//! };
//! let ticket = store.create(form.validate()?)?;
//! assert_eq!(store.stats().open, 1);
//! ```

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::too_many_arguments)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod service;
pub mod storage;

#[cfg(test)]
pub mod test_utils;

pub use error::{Result, TicketDeskError};
