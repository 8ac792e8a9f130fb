//! Ticket repository operations over a view-owned collection
//!
//! A [`TicketStore`] is loaded once per view session and then owns the
//! collection for that view. Each mutation builds the next collection,
//! writes it back in full, and only then replaces the in-memory copy. When
//! the write fails the view keeps showing the previous collection.

use crate::core::{Clock, SystemClock, Ticket, TicketDraft, TicketId, TicketStats};
use crate::error::{Result, TicketDeskError};
use crate::storage::TicketRepository;
use std::sync::Arc;
use std::time::Duration;

pub struct TicketStore<R> {
    repo: R,
    clock: Arc<dyn Clock>,
    load_latency: Duration,
    tickets: Vec<Ticket>,
}

impl<R: TicketRepository> TicketStore<R> {
    /// Create an empty, not yet loaded store
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            clock: Arc::new(SystemClock),
            load_latency: Duration::ZERO,
            tickets: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Artificial delay applied before each load
    #[must_use]
    pub const fn with_load_latency(mut self, latency: Duration) -> Self {
        self.load_latency = latency;
        self
    }

    /// Load the persisted collection into the view
    ///
    /// On failure the previously loaded collection is kept.
    pub async fn load(&mut self) -> Result<&[Ticket]> {
        if !self.load_latency.is_zero() {
            tokio::time::sleep(self.load_latency).await;
        }
        self.tickets = self.repo.load_all()?;
        Ok(&self.tickets)
    }

    /// The collection in display order
    #[must_use]
    pub fn list(&self) -> &[Ticket] {
        &self.tickets
    }

    #[must_use]
    pub fn get(&self, id: &TicketId) -> Option<&Ticket> {
        self.tickets.iter().find(|t| &t.id == id)
    }

    /// Find a ticket by full ID or by an unambiguous ID prefix
    pub fn resolve(&self, reference: &str) -> Result<&Ticket> {
        let reference = reference.trim();
        if let Some(ticket) = self.tickets.iter().find(|t| t.id.as_str() == reference) {
            return Ok(ticket);
        }

        let mut matches = self
            .tickets
            .iter()
            .filter(|t| !reference.is_empty() && t.id.as_str().starts_with(reference));
        match (matches.next(), matches.next()) {
            (Some(ticket), None) => Ok(ticket),
            (Some(_), Some(_)) => Err(TicketDeskError::custom(format!(
                "Ticket ID prefix '{reference}' is ambiguous"
            ))),
            _ => Err(TicketDeskError::TicketNotFound {
                id: reference.to_string(),
            }),
        }
    }

    /// Status counts of the current collection
    #[must_use]
    pub fn stats(&self) -> TicketStats {
        TicketStats::from_tickets(&self.tickets)
    }

    /// Append a new ticket built from `draft`
    pub fn create(&mut self, draft: TicketDraft) -> Result<Ticket> {
        let mut ticket = Ticket::from_draft(draft, self.clock.now());
        while self.get(&ticket.id).is_some() {
            ticket.id = TicketId::new();
        }

        let mut next = self.tickets.clone();
        next.push(ticket.clone());
        self.commit(next)?;

        tracing::info!(id = %ticket.id, title = %ticket.title, "ticket created");
        Ok(ticket)
    }

    /// Replace every editable field of ticket `id`
    ///
    /// Returns `None` when no such ticket exists; the collection is still
    /// written back unchanged in that case.
    pub fn update(&mut self, id: &TicketId, draft: TicketDraft) -> Result<Option<Ticket>> {
        let now = self.clock.now();
        let mut next = self.tickets.clone();
        let updated = next.iter_mut().find(|t| &t.id == id).map(|ticket| {
            ticket.replace_fields(draft, now);
            ticket.clone()
        });
        self.commit(next)?;

        match &updated {
            Some(ticket) => tracing::info!(id = %ticket.id, status = %ticket.status, "ticket updated"),
            None => tracing::debug!(%id, "update target not found"),
        }
        Ok(updated)
    }

    /// Remove ticket `id` if present
    ///
    /// Removing an unknown ID is not an error; the collection is written back
    /// either way.
    pub fn delete(&mut self, id: &TicketId) -> Result<Option<Ticket>> {
        let mut next = self.tickets.clone();
        let removed = next
            .iter()
            .position(|t| &t.id == id)
            .map(|index| next.remove(index));
        self.commit(next)?;

        match &removed {
            Some(ticket) => tracing::info!(id = %ticket.id, "ticket deleted"),
            None => tracing::debug!(%id, "delete target not found"),
        }
        Ok(removed)
    }

    fn commit(&mut self, next: Vec<Ticket>) -> Result<()> {
        if let Err(e) = self.repo.save_all(&next) {
            tracing::warn!(error = %e, "failed to persist tickets, keeping previous state");
            return Err(e);
        }
        self.tickets = next;
        Ok(())
    }
}

impl<R> std::fmt::Debug for TicketStore<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketStore")
            .field("load_latency", &self.load_latency)
            .field("tickets", &self.tickets.len())
            .finish_non_exhaustive()
    }
}
